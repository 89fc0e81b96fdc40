//! # formbind
//!
//! Model-view synchronization for form-based user interfaces.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. Depend on `formbind` to get everything, or on the individual
//! crates for finer-grained control.
//!
//! ```
//! use formbind::prelude::*;
//!
//! #[derive(Debug, Default, Model)]
//! #[bind(crate = "formbind::core")]
//! struct Person {
//!     name: String,
//!     active: bool,
//! }
//!
//! let name = WidgetRef::new(TextBox::new("name"));
//! let active = WidgetRef::new(Toggle::check_box("activeCheckBox"));
//! let form = WidgetRef::new(Container::panel("form").with_children([name.clone(), active]));
//!
//! let mut binder = ModelViewBinder::<Person>::new();
//! binder.discover(&[form], &DiscoveryOptions::default()).unwrap();
//! binder.model_to_view(&Person { name: "Ada".into(), active: true });
//! assert_eq!(name.display_value(), Value::from("Ada"));
//! ```

/// Values, model descriptors, settings, logging and error types.
pub use formbind_core as core;

/// The widget capability contract, categories and built-in widgets.
pub use formbind_widgets as widgets;

/// Discovery, conversion strategies and synchronization.
pub use formbind_binder as binder;

/// `#[derive(Model)]`.
#[cfg(feature = "macros")]
pub use formbind_macros as macros;

/// Third-party crates that appear in the public API.
pub use chrono;
pub use tracing;
pub use tracing_subscriber;

/// The types most programs need, in one import.
pub mod prelude {
    pub use formbind_binder::{
        ConversionStrategy, Culture, DiscoveryOptions, Markers, ModelViewBinder, SyncReport,
    };
    pub use formbind_core::{
        BindError, BindResult, DuplicateBindingPolicy, Model, Settings, Value, ValueKind,
    };
    #[cfg(feature = "macros")]
    pub use formbind_macros::Model;
    pub use formbind_widgets::{
        Container, DateTimePicker, Decoration, NumericUpDown, Selector, TextBox, Toggle, Widget,
        WidgetCategory, WidgetRef,
    };
}
