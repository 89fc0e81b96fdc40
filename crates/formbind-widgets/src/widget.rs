//! The widget capability contract.
//!
//! The binder never sees a concrete toolkit. It talks to widgets through
//! the [`Widget`] trait: a stable name, an optional tag, a category, a
//! visibility flag, children for containers, and one characteristic display
//! value. List-like widgets additionally expose a candidate collection.
//!
//! Widgets are single-threaded handles: setters take `&self` and use interior
//! mutability, the way retained-mode toolkit handles behave, and
//! [`WidgetRef`] is `Rc`-based so it cannot leave the UI thread.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use formbind_core::{BindError, BindResult, Value};

use crate::category::WidgetCategory;

/// A trait for UI widgets the binder can read and write.
pub trait Widget: fmt::Debug {
    /// The stable widget name.
    fn name(&self) -> &str;

    /// The free-form tag, if any.
    fn tag(&self) -> Option<&str> {
        None
    }

    /// The widget's category.
    fn category(&self) -> WidgetCategory;

    /// Whether the widget is currently visible.
    fn is_visible(&self) -> bool;

    /// Shows or hides the widget.
    fn set_visible(&self, visible: bool);

    /// Child widgets in layout order. Empty for non-containers.
    fn children(&self) -> Vec<WidgetRef> {
        Vec::new()
    }

    /// The widget's current display value in its native representation.
    fn display_value(&self) -> Value;

    /// Replaces the display value. The value must already be in the
    /// widget's native representation.
    fn set_display_value(&self, value: Value) -> BindResult<()>;

    /// The candidate collection of a list-like widget.
    fn candidates(&self) -> Vec<Value> {
        Vec::new()
    }

    /// Replaces the candidate collection of a list-like widget.
    fn set_candidates(&self, _items: Vec<Value>) -> BindResult<()> {
        Err(BindError::unsupported(self.category(), "set_candidates"))
    }

    /// Clears the selection of a list-like widget.
    fn clear_selection(&self) -> BindResult<()> {
        Err(BindError::unsupported(self.category(), "clear_selection"))
    }
}

/// A shared handle to a widget with identity semantics.
///
/// Two handles are equal only when they point at the same widget instance,
/// so handles can key the binding and source maps.
#[derive(Clone)]
pub struct WidgetRef(Rc<dyn Widget>);

impl WidgetRef {
    /// Wraps a widget in a new handle.
    pub fn new<W: Widget + 'static>(widget: W) -> Self {
        Self(Rc::new(widget))
    }

    /// Wraps an existing shared widget, keeping the caller's typed handle valid.
    pub fn from_rc<W: Widget + 'static>(widget: Rc<W>) -> Self {
        Self(widget)
    }

    /// Borrows the widget as a trait object.
    pub fn as_widget(&self) -> &(dyn Widget + 'static) {
        &*self.0
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }
}

impl Deref for WidgetRef {
    type Target = dyn Widget;

    fn deref(&self) -> &Self::Target {
        self.as_widget()
    }
}

impl PartialEq for WidgetRef {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for WidgetRef {}

impl Hash for WidgetRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for WidgetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.category(), self.name())
    }
}

/// Collects `roots` and all their descendants, depth-first with parents
/// before children.
pub fn walk_depth_first(roots: &[WidgetRef]) -> Vec<WidgetRef> {
    let mut out = Vec::new();
    for root in roots {
        out.push(root.clone());
        out.extend(walk_depth_first(&root.children()));
    }
    out
}

/// Searches `roots` and all their descendants, in [`walk_depth_first`]
/// order, for the first widget with the given name.
pub fn find_by_name(roots: &[WidgetRef], name: &str) -> Option<WidgetRef> {
    for root in roots {
        if root.name() == name {
            return Some(root.clone());
        }
        if let Some(found) = find_by_name(&root.children(), name) {
            return Some(found);
        }
    }
    None
}
