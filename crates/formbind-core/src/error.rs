//! Core error types for formbind.
//!
//! [`BindError`] covers every failure the binder can surface: a widget
//! category with no conversion strategy, an operation a strategy does not
//! support, a value that cannot be coerced to a property's declared type,
//! conflicting widget bindings, and configuration problems.

use thiserror::Error;

/// The primary error type for formbind.
///
/// Lenient passes (`push_data_sources`, `model_to_view`) record these per
/// entry and continue; the strict pass (`view_to_model`) returns the first
/// one it meets.
#[derive(Error, Debug)]
pub enum BindError {
    // ── Strategy resolution ──────────────────────────────────────────

    /// No conversion strategy resolves for the widget category, not even
    /// through one of its ancestors.
    #[error("Binding for category '{0}' not implemented")]
    UnregisteredCategory(String),

    /// A strategy was asked to perform an operation it does not support,
    /// e.g. installing a data source into a text box.
    #[error("Operation '{operation}' is not supported for category '{category}'")]
    Unsupported {
        /// The widget category the strategy handles.
        category: String,
        /// The rejected operation.
        operation: &'static str,
    },

    // ── Conversion ───────────────────────────────────────────────────

    /// A value could not be coerced into the requested kind.
    #[error("Cannot convert {value} to {target}")]
    TypeMismatch {
        /// Debug rendering of the offending value.
        value: String,
        /// The requested target kind.
        target: String,
    },

    /// A widget refused a display value, e.g. a spinner value outside its range.
    #[error("Widget '{widget}' rejected value: {reason}")]
    WidgetRejected {
        /// The widget name.
        widget: String,
        /// Why the value was refused.
        reason: String,
    },

    // ── Discovery ────────────────────────────────────────────────────

    /// Two properties claimed the same widget.
    #[error("Widget '{widget}' is already bound to '{existing}', cannot bind it to '{attempted}'")]
    DuplicateBinding {
        /// The contested widget name.
        widget: String,
        /// The property already holding the widget.
        existing: String,
        /// The property that tried to claim it.
        attempted: String,
    },

    /// A marker or lookup named a property the model does not declare.
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// Declaring a category parent would make the is-a relation cyclic.
    #[error("Category hierarchy cycle: '{child}' cannot inherit from '{parent}'")]
    HierarchyCycle {
        /// The category being declared.
        child: String,
        /// The requested parent.
        parent: String,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BindError {
    /// Builds a [`BindError::TypeMismatch`] from any debuggable value.
    pub fn mismatch(value: &impl std::fmt::Debug, target: impl std::fmt::Display) -> Self {
        Self::TypeMismatch {
            value: format!("{value:?}"),
            target: target.to_string(),
        }
    }

    /// Builds a [`BindError::Unsupported`] for the given category and operation.
    pub fn unsupported(category: impl std::fmt::Display, operation: &'static str) -> Self {
        Self::Unsupported {
            category: category.to_string(),
            operation,
        }
    }

    /// Returns `true` when a lenient pass may skip past this error.
    ///
    /// A missing strategy is not recoverable: it means an extension point was
    /// never filled in. Lenient passes still record it and move on, but
    /// callers inspecting a report should treat it as a setup bug.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnregisteredCategory(_))
    }
}

/// A convenience type alias for `Result<T, BindError>`.
pub type BindResult<T> = Result<T, BindError>;
