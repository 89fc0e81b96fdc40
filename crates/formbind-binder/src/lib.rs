//! # formbind-binder
//!
//! The binding engine: discovers which widget shows which model property,
//! converts values between the two sides, and synchronizes them in bulk.
//!
//! ## Modules
//!
//! - [`marker`] - Per-property `value_for` / `data_source` side-table
//! - [`convert`] - `change_type` coercion and the `Culture` it uses
//! - [`strategy`] - The `ConversionStrategy` trait and built-in strategies
//! - [`registry`] - Category to strategy lookup with ancestor fallback
//! - [`discovery`] - Naming-convention discovery and the binding/source maps
//! - [`sync`] - The lenient and strict synchronization passes
//! - [`report`] - Per-entry outcomes of lenient passes
//! - [`binder`] - `ModelViewBinder`, the entry point

pub mod binder;
pub mod convert;
pub mod discovery;
pub mod marker;
pub mod registry;
pub mod report;
pub mod strategy;
pub mod sync;

pub use binder::ModelViewBinder;
pub use convert::{change_type, Culture};
pub use discovery::{matches_convention, BindingMap, DiscoveryOptions, SourceMap};
pub use marker::{FieldMarker, Markers};
pub use registry::StrategyRegistry;
pub use report::{EntryOutcome, SyncReport};
pub use strategy::{
    CheckBoxStrategy, ComboBoxStrategy, ConversionStrategy, DateTimePickerStrategy, ListBoxStrategy,
    NumericUpDownStrategy, RadioButtonStrategy, TextBoxStrategy,
};
pub use sync::Synchronizer;
