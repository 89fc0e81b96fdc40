//! Built-in in-memory widgets.
//!
//! These model the state of the common input controls of a desktop form:
//! text entry, toggles, selection lists, spinners, date pickers, plus
//! decorative widgets and layout containers. Each widget holds exactly the
//! display state the binder reads and writes.
//!
//! All widgets are built with a consuming builder and handed to the binder
//! as a [`WidgetRef`]:
//!
//! ```
//! use formbind_core::Value;
//! use formbind_widgets::{Container, TextBox, Widget, WidgetRef};
//!
//! let name = WidgetRef::new(TextBox::new("nameTextBox").with_tag("name"));
//! let form = Container::panel("form").with_child(name.clone());
//! assert_eq!(form.children().len(), 1);
//! assert_eq!(name.display_value(), Value::from(""));
//! ```

use std::cell::{Cell, RefCell};

use chrono::NaiveDateTime;

use formbind_core::{BindError, BindResult, Value};

use crate::category::WidgetCategory;
use crate::widget::{Widget, WidgetRef};

/// State shared by every built-in widget.
#[derive(Debug)]
struct WidgetBase {
    name: String,
    tag: Option<String>,
    visible: Cell<bool>,
}

impl WidgetBase {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            visible: Cell::new(true),
        }
    }

    fn reject(&self, reason: impl Into<String>) -> BindError {
        BindError::WidgetRejected {
            widget: self.name.clone(),
            reason: reason.into(),
        }
    }
}

/// Builder methods and the identity half of [`Widget`] shared by all built-ins.
macro_rules! widget_common {
    ($ty:ty) => {
        impl $ty {
            /// Sets the free-form tag.
            #[must_use]
            pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
                self.base.tag = Some(tag.into());
                self
            }

            /// Starts the widget hidden.
            #[must_use]
            pub fn hidden(self) -> Self {
                self.base.visible.set(false);
                self
            }

            /// Wraps the widget in a [`WidgetRef`].
            pub fn into_ref(self) -> WidgetRef {
                WidgetRef::new(self)
            }
        }
    };
}

macro_rules! widget_identity {
    () => {
        fn name(&self) -> &str {
            &self.base.name
        }

        fn tag(&self) -> Option<&str> {
            self.base.tag.as_deref()
        }

        fn category(&self) -> WidgetCategory {
            self.category.clone()
        }

        fn is_visible(&self) -> bool {
            self.base.visible.get()
        }

        fn set_visible(&self, visible: bool) {
            self.base.visible.set(visible);
        }
    };
}

// ---------------------------------------------------------------------------
// Text entry
// ---------------------------------------------------------------------------

/// A text entry widget. Display value: [`Value::String`], or [`Value::Null`]
/// after being cleared with a null value and before any text is entered.
#[derive(Debug)]
pub struct TextBox {
    base: WidgetBase,
    category: WidgetCategory,
    text: RefCell<Option<String>>,
}

impl TextBox {
    /// Creates a single-line text box.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::TextBox)
    }

    /// Creates a masked text box.
    pub fn masked(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::MaskedTextBox)
    }

    /// Creates a rich text box.
    pub fn rich(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::RichTextBox)
    }

    fn with_category(name: impl Into<String>, category: WidgetCategory) -> Self {
        Self {
            base: WidgetBase::new(name),
            category,
            text: RefCell::new(Some(String::new())),
        }
    }

    /// Sets the initial text.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        *self.text.borrow_mut() = Some(text.into());
        self
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.text.borrow().clone().unwrap_or_default()
    }
}

widget_common!(TextBox);

impl Widget for TextBox {
    widget_identity!();

    fn display_value(&self) -> Value {
        self.text.borrow().clone().map_or(Value::Null, Value::String)
    }

    fn set_display_value(&self, value: Value) -> BindResult<()> {
        match value {
            Value::Null => *self.text.borrow_mut() = None,
            Value::String(s) => *self.text.borrow_mut() = Some(s),
            other => return Err(self.base.reject(format!("expected text, got {other:?}"))),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Toggles
// ---------------------------------------------------------------------------

/// A check box or radio button. Display value: [`Value::Bool`].
#[derive(Debug)]
pub struct Toggle {
    base: WidgetBase,
    category: WidgetCategory,
    checked: Cell<bool>,
}

impl Toggle {
    /// Creates a check box.
    pub fn check_box(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::CheckBox)
    }

    /// Creates a radio button.
    pub fn radio_button(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::RadioButton)
    }

    fn with_category(name: impl Into<String>, category: WidgetCategory) -> Self {
        Self {
            base: WidgetBase::new(name),
            category,
            checked: Cell::new(false),
        }
    }

    /// Sets the initial state.
    #[must_use]
    pub fn checked(self, checked: bool) -> Self {
        self.checked.set(checked);
        self
    }

    /// Whether the toggle is checked.
    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }
}

widget_common!(Toggle);

impl Widget for Toggle {
    widget_identity!();

    fn display_value(&self) -> Value {
        Value::Bool(self.checked.get())
    }

    fn set_display_value(&self, value: Value) -> BindResult<()> {
        match value {
            Value::Bool(b) => self.checked.set(b),
            other => return Err(self.base.reject(format!("expected a boolean, got {other:?}"))),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Selection lists
// ---------------------------------------------------------------------------

/// A dropdown or list with a single selected item.
///
/// Display value: the selected candidate, or [`Value::Null`] when nothing is
/// selected. Replacing the candidates clears the selection.
#[derive(Debug)]
pub struct Selector {
    base: WidgetBase,
    category: WidgetCategory,
    items: RefCell<Vec<Value>>,
    selected: Cell<Option<usize>>,
}

impl Selector {
    /// Creates a dropdown.
    pub fn combo_box(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::ComboBox)
    }

    /// Creates a list box.
    pub fn list_box(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::ListBox)
    }

    /// Creates a checked list box.
    pub fn checked_list_box(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::CheckedListBox)
    }

    fn with_category(name: impl Into<String>, category: WidgetCategory) -> Self {
        Self {
            base: WidgetBase::new(name),
            category,
            items: RefCell::new(Vec::new()),
            selected: Cell::new(None),
        }
    }

    /// Sets the initial candidates.
    #[must_use]
    pub fn with_items(self, items: Vec<Value>) -> Self {
        *self.items.borrow_mut() = items;
        self
    }

    /// The index of the selected candidate.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.get()
    }
}

widget_common!(Selector);

impl Widget for Selector {
    widget_identity!();

    fn display_value(&self) -> Value {
        self.selected
            .get()
            .and_then(|i| self.items.borrow().get(i).cloned())
            .unwrap_or(Value::Null)
    }

    fn set_display_value(&self, value: Value) -> BindResult<()> {
        if value.is_null() {
            self.selected.set(None);
            return Ok(());
        }
        let position = self.items.borrow().iter().position(|item| *item == value);
        match position {
            Some(i) => {
                self.selected.set(Some(i));
                Ok(())
            }
            None => Err(self
                .base
                .reject(format!("{value} is not one of the available items"))),
        }
    }

    fn candidates(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    fn set_candidates(&self, items: Vec<Value>) -> BindResult<()> {
        *self.items.borrow_mut() = items;
        self.selected.set(None);
        Ok(())
    }

    fn clear_selection(&self) -> BindResult<()> {
        self.selected.set(None);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Numeric spinner
// ---------------------------------------------------------------------------

/// A numeric spinner. Display value: [`Value::Float`] within `[min, max]`.
#[derive(Debug)]
pub struct NumericUpDown {
    base: WidgetBase,
    category: WidgetCategory,
    value: Cell<f64>,
    min: f64,
    max: f64,
}

impl NumericUpDown {
    /// Creates an unbounded spinner starting at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name),
            category: WidgetCategory::NumericUpDown,
            value: Cell::new(0.0),
            min: f64::MIN,
            max: f64::MAX,
        }
    }

    /// Restricts the accepted range. The current value is clamped into it.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self.value.set(self.value.get().clamp(min, max));
        self
    }

    /// The current number.
    pub fn value(&self) -> f64 {
        self.value.get()
    }
}

widget_common!(NumericUpDown);

impl Widget for NumericUpDown {
    widget_identity!();

    fn display_value(&self) -> Value {
        Value::Float(self.value.get())
    }

    fn set_display_value(&self, value: Value) -> BindResult<()> {
        match value {
            Value::Float(n) if n.is_finite() && (self.min..=self.max).contains(&n) => {
                self.value.set(n);
                Ok(())
            }
            Value::Float(n) => Err(self.base.reject(format!(
                "{n} is outside [{}, {}]",
                self.min, self.max
            ))),
            other => Err(self.base.reject(format!("expected a number, got {other:?}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Date picker
// ---------------------------------------------------------------------------

/// A date/time picker. Display value: [`Value::DateTime`].
#[derive(Debug)]
pub struct DateTimePicker {
    base: WidgetBase,
    category: WidgetCategory,
    value: Cell<NaiveDateTime>,
}

impl DateTimePicker {
    /// Creates a picker showing the epoch.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name),
            category: WidgetCategory::DateTimePicker,
            value: Cell::new(NaiveDateTime::default()),
        }
    }

    /// The current date and time.
    pub fn value(&self) -> NaiveDateTime {
        self.value.get()
    }
}

widget_common!(DateTimePicker);

impl Widget for DateTimePicker {
    widget_identity!();

    fn display_value(&self) -> Value {
        Value::DateTime(self.value.get())
    }

    fn set_display_value(&self, value: Value) -> BindResult<()> {
        match value {
            Value::DateTime(dt) => self.value.set(dt),
            other => return Err(self.base.reject(format!("expected a date-time, got {other:?}"))),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Decorative widgets
// ---------------------------------------------------------------------------

/// A label, button or picture box. Display value: its caption text.
#[derive(Debug)]
pub struct Decoration {
    base: WidgetBase,
    category: WidgetCategory,
    text: RefCell<String>,
}

impl Decoration {
    /// Creates a static label.
    pub fn label(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::Label, text)
    }

    /// Creates a push button.
    pub fn button(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::Button, text)
    }

    /// Creates a picture box.
    pub fn picture_box(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::PictureBox, "")
    }

    fn with_category(
        name: impl Into<String>,
        category: WidgetCategory,
        text: impl Into<String>,
    ) -> Self {
        Self {
            base: WidgetBase::new(name),
            category,
            text: RefCell::new(text.into()),
        }
    }
}

widget_common!(Decoration);

impl Widget for Decoration {
    widget_identity!();

    fn display_value(&self) -> Value {
        Value::String(self.text.borrow().clone())
    }

    fn set_display_value(&self, value: Value) -> BindResult<()> {
        match value {
            Value::String(s) => *self.text.borrow_mut() = s,
            Value::Null => self.text.borrow_mut().clear(),
            other => return Err(self.base.reject(format!("expected text, got {other:?}"))),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

/// A panel or group box holding child widgets in layout order.
#[derive(Debug)]
pub struct Container {
    base: WidgetBase,
    category: WidgetCategory,
    children: RefCell<Vec<WidgetRef>>,
}

impl Container {
    /// Creates a panel.
    pub fn panel(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::Panel)
    }

    /// Creates a group box.
    pub fn group_box(name: impl Into<String>) -> Self {
        Self::with_category(name, WidgetCategory::GroupBox)
    }

    fn with_category(name: impl Into<String>, category: WidgetCategory) -> Self {
        Self {
            base: WidgetBase::new(name),
            category,
            children: RefCell::new(Vec::new()),
        }
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(self, child: WidgetRef) -> Self {
        self.add(child);
        self
    }

    /// Appends several children.
    #[must_use]
    pub fn with_children(self, children: impl IntoIterator<Item = WidgetRef>) -> Self {
        self.children.borrow_mut().extend(children);
        self
    }

    /// Appends a child to an existing container.
    pub fn add(&self, child: WidgetRef) {
        self.children.borrow_mut().push(child);
    }
}

widget_common!(Container);

impl Widget for Container {
    widget_identity!();

    fn children(&self) -> Vec<WidgetRef> {
        self.children.borrow().clone()
    }

    fn display_value(&self) -> Value {
        Value::Null
    }

    fn set_display_value(&self, _value: Value) -> BindResult<()> {
        Err(self.base.reject("containers have no display value"))
    }
}
