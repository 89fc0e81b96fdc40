//! Field discovery: matching model properties to widgets.
//!
//! For each property, in declaration order:
//!
//! 1. A `value_for` marker binds that exact widget. Marked widgets are never
//!    matched by name anywhere else.
//! 2. Otherwise the current level is scanned for the first widget outside
//!    the excluded categories whose name equals the property name, whose tag
//!    equals it, or whose name is the property name followed by the widget's
//!    category name (`"emailTextBox"` for `"email"`).
//! 3. With recursion enabled, the scan is repeated for every child that has
//!    children of its own, depth-first, after its parent's level.
//!
//! A property's data source is recorded for whichever widget it binds.
//! Discovery calls are additive; conflicting claims on one widget are
//! settled by the [`DuplicateBindingPolicy`].

use std::collections::{HashMap, HashSet};

use formbind_core::{BindError, BindResult, DuplicateBindingPolicy, ModelDescriptor, Settings, Value};
use formbind_widgets::{WidgetCategory, WidgetRef};

use crate::marker::FieldMarker;

/// Options for one discovery call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Descend into children that have children of their own.
    pub recursive: bool,
    /// Categories never matched by naming convention.
    pub excluded: HashSet<WidgetCategory>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            excluded: WidgetCategory::default_exclusions().into_iter().collect(),
        }
    }
}

impl DiscoveryOptions {
    /// Builds options from the discovery fields of `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            recursive: settings.recursive_discovery,
            excluded: settings
                .excluded_categories
                .iter()
                .map(|name| WidgetCategory::from(name.clone()))
                .collect(),
        }
    }

    /// Enables or disables recursion.
    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Adds a category to the exclusion set.
    #[must_use]
    pub fn exclude(mut self, category: WidgetCategory) -> Self {
        self.excluded.insert(category);
        self
    }

    /// Removes a category from the exclusion set.
    #[must_use]
    pub fn include(mut self, category: &WidgetCategory) -> Self {
        self.excluded.remove(category);
        self
    }

    /// Returns `true` if `category` is excluded from name matching.
    pub fn is_excluded(&self, category: &WidgetCategory) -> bool {
        self.excluded.contains(category)
    }
}

/// Insertion-ordered widget to property-index map.
///
/// Each widget appears at most once. Entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct BindingMap {
    entries: Vec<(WidgetRef, usize)>,
    index: HashMap<WidgetRef, usize>,
}

impl BindingMap {
    /// The property index bound to `widget`.
    pub fn property_of(&self, widget: &WidgetRef) -> Option<usize> {
        self.index.get(widget).map(|&slot| self.entries[slot].1)
    }

    /// Returns `true` if `widget` is bound.
    pub fn contains(&self, widget: &WidgetRef) -> bool {
        self.index.contains_key(widget)
    }

    /// Entries in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&WidgetRef, usize)> {
        self.entries.iter().map(|(w, p)| (w, *p))
    }

    /// The widgets bound to the property at `property`, in binding order.
    pub fn widgets_for(&self, property: usize) -> Vec<WidgetRef> {
        self.entries
            .iter()
            .filter(|(_, p)| *p == property)
            .map(|(w, _)| w.clone())
            .collect()
    }

    /// The number of bound widgets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binds `widget`, replacing its property in place if already bound.
    fn upsert(&mut self, widget: WidgetRef, property: usize) {
        if let Some(&slot) = self.index.get(&widget) {
            self.entries[slot].1 = property;
        } else {
            self.index.insert(widget.clone(), self.entries.len());
            self.entries.push((widget, property));
        }
    }
}

/// Insertion-ordered widget to data-source map.
///
/// A later entry for the same widget replaces the value but keeps the
/// original position.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    entries: Vec<(WidgetRef, Value)>,
    index: HashMap<WidgetRef, usize>,
}

impl SourceMap {
    /// The data source recorded for `widget`.
    pub fn get(&self, widget: &WidgetRef) -> Option<&Value> {
        self.index.get(widget).map(|&slot| &self.entries[slot].1)
    }

    /// Entries in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&WidgetRef, &Value)> {
        self.entries.iter().map(|(w, v)| (w, v))
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no source is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a data source for `widget`.
    pub fn insert(&mut self, widget: WidgetRef, source: Value) {
        if let Some(&slot) = self.index.get(&widget) {
            self.entries[slot].1 = source;
        } else {
            self.index.insert(widget.clone(), self.entries.len());
            self.entries.push((widget, source));
        }
    }
}

/// A proposed binding produced by the scan, not yet committed.
#[derive(Debug)]
struct Claim {
    widget: WidgetRef,
    property: usize,
    data_source: Option<Value>,
}

/// Returns `true` if `widget` matches `property` by the naming convention.
pub fn matches_convention(widget: &WidgetRef, property: &str) -> bool {
    let name = widget.name();
    name == property
        || widget.tag() == Some(property)
        || name
            .strip_prefix(property)
            .is_some_and(|rest| rest == widget.category().as_str())
}

/// One discovery call over a model descriptor and its resolved markers.
pub struct FieldDiscovery<'a, M> {
    descriptor: &'a ModelDescriptor<M>,
    markers: &'a [FieldMarker],
    options: &'a DiscoveryOptions,
    marked: HashSet<WidgetRef>,
}

impl<'a, M> FieldDiscovery<'a, M> {
    /// Prepares a discovery call. `markers` is aligned with the descriptor.
    pub fn new(
        descriptor: &'a ModelDescriptor<M>,
        markers: &'a [FieldMarker],
        options: &'a DiscoveryOptions,
    ) -> Self {
        let marked = markers
            .iter()
            .filter_map(|m| m.value_for.clone())
            .collect();
        Self {
            descriptor,
            markers,
            options,
            marked,
        }
    }

    /// Scans `roots` and commits the result into `bindings` and `sources`.
    ///
    /// Each root's direct children form the first level. Returns the number
    /// of newly bound widgets. Under [`DuplicateBindingPolicy::Reject`] a
    /// conflicting claim fails the call and leaves both maps untouched.
    pub fn run(
        &self,
        roots: &[WidgetRef],
        policy: DuplicateBindingPolicy,
        bindings: &mut BindingMap,
        sources: &mut SourceMap,
    ) -> BindResult<usize> {
        let claims = self.claims(roots);

        let mut staged_bindings = bindings.clone();
        let mut staged_sources = sources.clone();
        let before = staged_bindings.len();

        for claim in claims {
            if let Some(existing) = staged_bindings.property_of(&claim.widget) {
                if existing != claim.property {
                    let existing_name = self.property_name(existing);
                    let attempted_name = self.property_name(claim.property);
                    match policy {
                        DuplicateBindingPolicy::Reject => {
                            return Err(BindError::DuplicateBinding {
                                widget: claim.widget.name().to_string(),
                                existing: existing_name.to_string(),
                                attempted: attempted_name.to_string(),
                            });
                        }
                        DuplicateBindingPolicy::KeepFirst => {
                            tracing::warn!(
                                "Widget '{}' stays bound to '{existing_name}', ignoring '{attempted_name}'",
                                claim.widget.name()
                            );
                            continue;
                        }
                        DuplicateBindingPolicy::Replace => {
                            tracing::warn!(
                                "Widget '{}' rebound from '{existing_name}' to '{attempted_name}'",
                                claim.widget.name()
                            );
                        }
                    }
                }
            }

            tracing::debug!(
                "Binding '{}' to widget {:?}",
                self.property_name(claim.property),
                claim.widget
            );
            if let Some(source) = claim.data_source {
                staged_sources.insert(claim.widget.clone(), source);
            }
            staged_bindings.upsert(claim.widget, claim.property);
        }

        let added = staged_bindings.len() - before;
        *bindings = staged_bindings;
        *sources = staged_sources;
        Ok(added)
    }

    /// Collects every claim of this call, marker claims first.
    fn claims(&self, roots: &[WidgetRef]) -> Vec<Claim> {
        let mut claims: Vec<Claim> = self
            .markers
            .iter()
            .enumerate()
            .filter_map(|(property, marker)| {
                marker.value_for.clone().map(|widget| Claim {
                    widget,
                    property,
                    data_source: marker.data_source.clone(),
                })
            })
            .collect();

        for root in roots {
            self.scan_level(&root.children(), &mut claims);
        }
        claims
    }

    fn scan_level(&self, level: &[WidgetRef], claims: &mut Vec<Claim>) {
        for (property, prop) in self.descriptor.properties().iter().enumerate() {
            let marker = self.markers.get(property);
            if marker.is_some_and(|m| m.value_for.is_some()) {
                continue;
            }
            let found = level.iter().find(|w| {
                !self.marked.contains(*w)
                    && !self.options.is_excluded(&w.category())
                    && matches_convention(w, prop.name())
            });
            if let Some(widget) = found {
                claims.push(Claim {
                    widget: widget.clone(),
                    property,
                    data_source: marker.and_then(|m| m.data_source.clone()),
                });
            }
        }

        if self.options.recursive {
            for widget in level {
                let children = widget.children();
                if !children.is_empty() {
                    self.scan_level(&children, claims);
                }
            }
        }
    }

    fn property_name(&self, index: usize) -> &'static str {
        self.descriptor.get(index).map_or("?", |p| p.name())
    }
}
