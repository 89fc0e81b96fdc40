//! # formbind-core
//!
//! Foundation types shared by every formbind crate. Nothing here knows about
//! widgets; this crate describes models and values.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`value`] - `Value`, `ValueKind`, and the `FieldValue` mapping
//! - [`model`] - The `Model` trait and its property descriptor table
//! - [`settings`] - Binder settings
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod model;
pub mod settings;
pub mod settings_loader;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use error::{BindError, BindResult};
pub use model::{Model, ModelDescriptor, PropertyDescriptor};
pub use settings::{DuplicateBindingPolicy, Settings};
pub use value::{FieldValue, Value, ValueKind};
