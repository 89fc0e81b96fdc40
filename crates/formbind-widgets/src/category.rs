//! Widget categories and the is-a relation between them.
//!
//! Every widget declares a [`WidgetCategory`]. Strategy lookup falls back
//! from a category to its nearest registered ancestor, and the ancestry is
//! an explicit table ([`CategoryHierarchy`]) rather than a class hierarchy.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use formbind_core::{BindError, BindResult};

/// Enumerates the built-in widget categories.
///
/// The category name doubles as the suffix in the naming convention: a
/// widget named `"emailTextBox"` matches the property `"email"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetCategory {
    /// Single-line text entry.
    TextBox,
    /// Text entry with an input mask; is-a `TextBox`.
    MaskedTextBox,
    /// Multi-line formatted text; is-a `TextBox`.
    RichTextBox,
    /// Two-state check box.
    CheckBox,
    /// Radio button (boolean toggle within a group).
    RadioButton,
    /// Single-selection dropdown.
    ComboBox,
    /// Single-selection list.
    ListBox,
    /// List with per-item check marks; is-a `ListBox`.
    CheckedListBox,
    /// Numeric spinner.
    NumericUpDown,
    /// Date/time picker.
    DateTimePicker,
    /// Static text.
    Label,
    /// Push button.
    Button,
    /// Image display.
    PictureBox,
    /// Layout-only container.
    Panel,
    /// Captioned layout container.
    GroupBox,
    /// A toolkit-specific category not known to formbind.
    Custom(String),
}

impl WidgetCategory {
    /// Creates a custom category.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Returns the category name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::TextBox => "TextBox",
            Self::MaskedTextBox => "MaskedTextBox",
            Self::RichTextBox => "RichTextBox",
            Self::CheckBox => "CheckBox",
            Self::RadioButton => "RadioButton",
            Self::ComboBox => "ComboBox",
            Self::ListBox => "ListBox",
            Self::CheckedListBox => "CheckedListBox",
            Self::NumericUpDown => "NumericUpDown",
            Self::DateTimePicker => "DateTimePicker",
            Self::Label => "Label",
            Self::Button => "Button",
            Self::PictureBox => "PictureBox",
            Self::Panel => "Panel",
            Self::GroupBox => "GroupBox",
            Self::Custom(name) => name,
        }
    }

    /// Categories never matched by naming convention unless configured otherwise.
    pub fn default_exclusions() -> Vec<Self> {
        vec![
            Self::Label,
            Self::Button,
            Self::PictureBox,
            Self::Panel,
            Self::GroupBox,
        ]
    }

    const BUILTIN_EDGES: [(Self, Self); 3] = [
        (Self::MaskedTextBox, Self::TextBox),
        (Self::RichTextBox, Self::TextBox),
        (Self::CheckedListBox, Self::ListBox),
    ];
}

impl fmt::Display for WidgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WidgetCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "TextBox" => Self::TextBox,
            "MaskedTextBox" => Self::MaskedTextBox,
            "RichTextBox" => Self::RichTextBox,
            "CheckBox" => Self::CheckBox,
            "RadioButton" => Self::RadioButton,
            "ComboBox" => Self::ComboBox,
            "ListBox" => Self::ListBox,
            "CheckedListBox" => Self::CheckedListBox,
            "NumericUpDown" => Self::NumericUpDown,
            "DateTimePicker" => Self::DateTimePicker,
            "Label" => Self::Label,
            "Button" => Self::Button,
            "PictureBox" => Self::PictureBox,
            "Panel" => Self::Panel,
            "GroupBox" => Self::GroupBox,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<String> for WidgetCategory {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<WidgetCategory> for String {
    fn from(category: WidgetCategory) -> Self {
        category.as_str().to_string()
    }
}

/// The explicit is-a relation between widget categories.
///
/// Each category has at most one parent. The relation is kept acyclic, so
/// walking ancestors always terminates.
///
/// # Examples
///
/// ```
/// use formbind_widgets::{CategoryHierarchy, WidgetCategory};
///
/// let mut hierarchy = CategoryHierarchy::new();
/// hierarchy
///     .declare(WidgetCategory::custom("CustomSlider"), WidgetCategory::NumericUpDown)
///     .unwrap();
/// assert!(hierarchy.is_a(&WidgetCategory::custom("CustomSlider"), &WidgetCategory::NumericUpDown));
/// assert!(hierarchy.is_a(&WidgetCategory::MaskedTextBox, &WidgetCategory::TextBox));
/// ```
#[derive(Debug, Clone)]
pub struct CategoryHierarchy {
    parents: HashMap<WidgetCategory, WidgetCategory>,
}

impl CategoryHierarchy {
    /// Creates a hierarchy seeded with the built-in is-a edges.
    pub fn new() -> Self {
        let parents = WidgetCategory::BUILTIN_EDGES.into_iter().collect();
        Self { parents }
    }

    /// Creates a hierarchy with no edges at all.
    pub fn empty() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }

    /// Declares `child` to be a specialization of `parent`.
    ///
    /// Replaces any previous parent of `child`. Fails if the edge would
    /// make the relation cyclic.
    pub fn declare(&mut self, child: WidgetCategory, parent: WidgetCategory) -> BindResult<()> {
        if child == parent || self.is_a(&parent, &child) {
            return Err(BindError::HierarchyCycle {
                child: child.to_string(),
                parent: parent.to_string(),
            });
        }
        self.parents.insert(child, parent);
        Ok(())
    }

    /// The direct parent of `category`, if declared.
    pub fn parent_of(&self, category: &WidgetCategory) -> Option<&WidgetCategory> {
        self.parents.get(category)
    }

    /// All ancestors of `category`, nearest first. The category itself is excluded.
    pub fn ancestors(&self, category: &WidgetCategory) -> Vec<WidgetCategory> {
        let mut chain = Vec::new();
        let mut current = category;
        while let Some(parent) = self.parents.get(current) {
            chain.push(parent.clone());
            current = parent;
        }
        chain
    }

    /// Returns `true` if `category` equals `ancestor` or descends from it.
    pub fn is_a(&self, category: &WidgetCategory, ancestor: &WidgetCategory) -> bool {
        category == ancestor || self.ancestors(category).contains(ancestor)
    }
}

impl Default for CategoryHierarchy {
    fn default() -> Self {
        Self::new()
    }
}
