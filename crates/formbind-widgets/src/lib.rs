//! # formbind-widgets
//!
//! The widget side of formbind: the capability contract every toolkit
//! adapter implements, the category enumeration with its is-a table, and a
//! set of in-memory widgets covering the common form controls.

pub mod builtin;
pub mod category;
pub mod widget;

pub use builtin::{Container, DateTimePicker, Decoration, NumericUpDown, Selector, TextBox, Toggle};
pub use category::{CategoryHierarchy, WidgetCategory};
pub use widget::{find_by_name, walk_depth_first, Widget, WidgetRef};
