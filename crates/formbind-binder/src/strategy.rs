//! Per-category conversion strategies.
//!
//! A [`ConversionStrategy`] knows the native display representation of one
//! widget category. It coerces model values into that representation when
//! rendering, reads the representation back, and for list-like categories
//! installs candidate lists.
//!
//! Strategies never coerce to model property types; that is the job of
//! [`Culture::change_type`](crate::convert::Culture::change_type) inside the
//! synchronizer.

use std::fmt;

use formbind_core::{BindError, BindResult, Value, ValueKind};
use formbind_widgets::{Widget, WidgetCategory};

use crate::convert::Culture;

/// Converts values between a model and one widget category.
///
/// Register custom implementations with
/// [`StrategyRegistry::register`](crate::registry::StrategyRegistry::register).
///
/// # Examples
///
/// ```
/// use formbind_binder::{ConversionStrategy, Culture};
/// use formbind_core::{BindResult, Value, ValueKind};
/// use formbind_widgets::{Widget, WidgetCategory};
///
/// /// Shows numbers in a text widget as percentages.
/// #[derive(Debug)]
/// struct PercentStrategy;
///
/// impl ConversionStrategy for PercentStrategy {
///     fn widget_category(&self) -> WidgetCategory {
///         WidgetCategory::custom("PercentBox")
///     }
///
///     fn model_to_widget(&self, widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()> {
///         let ratio = culture.change_type(value, &ValueKind::Float)?;
///         let percent = match ratio {
///             Value::Float(f) => f * 100.0,
///             _ => 0.0,
///         };
///         widget.set_display_value(Value::String(format!("{percent}%")))
///     }
///
///     fn widget_to_model(&self, widget: &dyn Widget) -> BindResult<Value> {
///         Ok(widget.display_value())
///     }
/// }
/// ```
pub trait ConversionStrategy: fmt::Debug {
    /// The category this strategy handles; used as the registry key.
    fn widget_category(&self) -> WidgetCategory;

    /// Coerces `value` to the native representation and writes it into `widget`.
    fn model_to_widget(&self, widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()>;

    /// Reads the widget's display value in its native representation.
    fn widget_to_model(&self, widget: &dyn Widget) -> BindResult<Value>;

    /// Replaces the widget's candidate list.
    ///
    /// Scalar categories keep the default, which fails with
    /// [`BindError::Unsupported`].
    fn install_data_source(
        &self,
        _widget: &dyn Widget,
        _value: &Value,
        _culture: &Culture,
    ) -> BindResult<()> {
        Err(BindError::unsupported(
            self.widget_category(),
            "install_data_source",
        ))
    }
}

/// Coerces `value` to `kind` and writes it as the widget's display value.
fn write_native(widget: &dyn Widget, value: &Value, kind: &ValueKind, culture: &Culture) -> BindResult<()> {
    let native = culture.change_type(value, kind)?;
    widget.set_display_value(native)
}

/// Reads the display value and checks it is `kind` (or `Null`).
fn read_native(widget: &dyn Widget, kind: &ValueKind) -> BindResult<Value> {
    let value = widget.display_value();
    match value.kind() {
        None => Ok(value),
        Some(ref k) if k == kind => Ok(value),
        Some(_) => Err(BindError::mismatch(&value, kind)),
    }
}

// ── Text ─────────────────────────────────────────────────────────────

/// Text entry widgets. Native representation: a string.
///
/// Non-string values are formatted with the culture; `Null` clears the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBoxStrategy;

impl ConversionStrategy for TextBoxStrategy {
    fn widget_category(&self) -> WidgetCategory {
        WidgetCategory::TextBox
    }

    fn model_to_widget(&self, widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()> {
        let text = match value {
            Value::Null => return widget.set_display_value(Value::Null),
            Value::String(s) => s.clone(),
            Value::List(_) => return Err(BindError::mismatch(value, ValueKind::String)),
            other => culture.format(other),
        };
        widget.set_display_value(Value::String(text))
    }

    fn widget_to_model(&self, widget: &dyn Widget) -> BindResult<Value> {
        read_native(widget, &ValueKind::String)
    }
}

// ── Toggles ──────────────────────────────────────────────────────────

/// Check boxes. Native representation: a boolean.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckBoxStrategy;

impl ConversionStrategy for CheckBoxStrategy {
    fn widget_category(&self) -> WidgetCategory {
        WidgetCategory::CheckBox
    }

    fn model_to_widget(&self, widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()> {
        write_native(widget, value, &ValueKind::Bool, culture)
    }

    fn widget_to_model(&self, widget: &dyn Widget) -> BindResult<Value> {
        read_native(widget, &ValueKind::Bool)
    }
}

/// Radio buttons. Native representation: a boolean.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadioButtonStrategy;

impl ConversionStrategy for RadioButtonStrategy {
    fn widget_category(&self) -> WidgetCategory {
        WidgetCategory::RadioButton
    }

    fn model_to_widget(&self, widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()> {
        write_native(widget, value, &ValueKind::Bool, culture)
    }

    fn widget_to_model(&self, widget: &dyn Widget) -> BindResult<Value> {
        read_native(widget, &ValueKind::Bool)
    }
}

// ── Selection lists ──────────────────────────────────────────────────

/// Selects the candidate matching `value`.
///
/// `Null` and the empty string clear the selection. A value that is not a
/// candidate itself selects the first candidate it coerces to.
fn select_item(widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()> {
    if value.is_null() || value.as_str() == Some("") {
        return widget.clear_selection();
    }
    let candidates = widget.candidates();
    if candidates.contains(value) {
        return widget.set_display_value(value.clone());
    }
    let coerced = candidates.into_iter().find(|candidate| {
        candidate
            .kind()
            .and_then(|kind| culture.change_type(value, &kind).ok())
            .is_some_and(|converted| converted == *candidate)
    });
    widget.set_display_value(coerced.unwrap_or_else(|| value.clone()))
}

/// Installs a list value as the widget's candidates. `Null` empties the list.
fn install_candidates(widget: &dyn Widget, value: &Value) -> BindResult<()> {
    let items = match value {
        Value::List(items) => items.clone(),
        Value::Null => Vec::new(),
        other => return Err(BindError::mismatch(other, ValueKind::List)),
    };
    widget.set_candidates(items)
}

/// Dropdowns. Native representation: the selected candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComboBoxStrategy;

impl ConversionStrategy for ComboBoxStrategy {
    fn widget_category(&self) -> WidgetCategory {
        WidgetCategory::ComboBox
    }

    fn model_to_widget(&self, widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()> {
        select_item(widget, value, culture)
    }

    fn widget_to_model(&self, widget: &dyn Widget) -> BindResult<Value> {
        Ok(widget.display_value())
    }

    fn install_data_source(&self, widget: &dyn Widget, value: &Value, _culture: &Culture) -> BindResult<()> {
        install_candidates(widget, value)
    }
}

/// Lists. Native representation: the selected candidate.
///
/// Installing candidates always leaves the list with nothing selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListBoxStrategy;

impl ConversionStrategy for ListBoxStrategy {
    fn widget_category(&self) -> WidgetCategory {
        WidgetCategory::ListBox
    }

    fn model_to_widget(&self, widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()> {
        select_item(widget, value, culture)
    }

    fn widget_to_model(&self, widget: &dyn Widget) -> BindResult<Value> {
        Ok(widget.display_value())
    }

    fn install_data_source(&self, widget: &dyn Widget, value: &Value, _culture: &Culture) -> BindResult<()> {
        install_candidates(widget, value)?;
        widget.clear_selection()
    }
}

// ── Numbers and dates ────────────────────────────────────────────────

/// Numeric spinners. Native representation: a float.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericUpDownStrategy;

impl ConversionStrategy for NumericUpDownStrategy {
    fn widget_category(&self) -> WidgetCategory {
        WidgetCategory::NumericUpDown
    }

    fn model_to_widget(&self, widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()> {
        write_native(widget, value, &ValueKind::Float, culture)
    }

    fn widget_to_model(&self, widget: &dyn Widget) -> BindResult<Value> {
        read_native(widget, &ValueKind::Float)
    }
}

/// Date pickers. Native representation: a date-time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimePickerStrategy;

impl ConversionStrategy for DateTimePickerStrategy {
    fn widget_category(&self) -> WidgetCategory {
        WidgetCategory::DateTimePicker
    }

    fn model_to_widget(&self, widget: &dyn Widget, value: &Value, culture: &Culture) -> BindResult<()> {
        write_native(widget, value, &ValueKind::DateTime, culture)
    }

    fn widget_to_model(&self, widget: &dyn Widget) -> BindResult<Value> {
        read_native(widget, &ValueKind::DateTime)
    }
}

/// Every built-in strategy, one per built-in input category.
pub fn builtin_strategies() -> Vec<Box<dyn ConversionStrategy>> {
    vec![
        Box::new(TextBoxStrategy),
        Box::new(CheckBoxStrategy),
        Box::new(RadioButtonStrategy),
        Box::new(ComboBoxStrategy),
        Box::new(ListBoxStrategy),
        Box::new(NumericUpDownStrategy),
        Box::new(DateTimePickerStrategy),
    ]
}
