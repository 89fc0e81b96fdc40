//! Per-property binding markers.
//!
//! A marker is plain data: an explicit target widget (`value_for`) and/or a
//! candidate list to install into that widget (`data_source`). Markers live in
//! a side-table keyed by property name and are handed to the binder at
//! construction, so model types carry no UI references themselves.

use std::collections::HashMap;

use formbind_core::{BindError, BindResult, ModelDescriptor, Value};
use formbind_widgets::WidgetRef;

/// The markers attached to one property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMarker {
    /// Bind exactly this widget, bypassing the naming convention.
    pub value_for: Option<WidgetRef>,
    /// Install this value as the bound widget's candidate list.
    pub data_source: Option<Value>,
}

impl FieldMarker {
    /// Returns `true` when neither marker is set.
    pub const fn is_empty(&self) -> bool {
        self.value_for.is_none() && self.data_source.is_none()
    }
}

/// A side-table of markers keyed by property name.
///
/// Setting the same marker twice for a property replaces the earlier value.
///
/// # Examples
///
/// ```
/// use formbind_binder::Markers;
/// use formbind_core::Value;
/// use formbind_widgets::{Selector, WidgetRef};
///
/// let picker = WidgetRef::new(Selector::combo_box("countryPicker"));
/// let markers = Markers::new()
///     .value_for("country", picker.clone())
///     .data_source("country", Value::list(["NL", "SE"]));
/// assert_eq!(markers.get("country").unwrap().value_for, Some(picker));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Markers {
    entries: HashMap<String, FieldMarker>,
}

impl Markers {
    /// Creates an empty side-table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the widget bound to `property`.
    #[must_use]
    pub fn value_for(mut self, property: impl Into<String>, widget: WidgetRef) -> Self {
        self.entries.entry(property.into()).or_default().value_for = Some(widget);
        self
    }

    /// Declares the candidate list for the widget bound to `property`.
    #[must_use]
    pub fn data_source(mut self, property: impl Into<String>, source: impl Into<Value>) -> Self {
        self.entries.entry(property.into()).or_default().data_source = Some(source.into());
        self
    }

    /// The markers declared for `property`.
    pub fn get(&self, property: &str) -> Option<&FieldMarker> {
        self.entries.get(property)
    }

    /// The number of properties with markers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no property has markers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the effective marker of every property of a model type.
    ///
    /// The result is aligned with the descriptor's declaration order. Data
    /// sources declared on the descriptor are used unless this table
    /// overrides them. Fails with [`BindError::UnknownProperty`] if the table
    /// names a property the model does not declare.
    pub fn resolve<M>(&self, descriptor: &ModelDescriptor<M>) -> BindResult<Vec<FieldMarker>> {
        if let Some(unknown) = self
            .entries
            .keys()
            .find(|name| descriptor.property(name).is_none())
        {
            return Err(BindError::UnknownProperty(format!(
                "{}.{unknown}",
                descriptor.type_name()
            )));
        }

        Ok(descriptor
            .properties()
            .iter()
            .map(|prop| {
                let declared = self.entries.get(prop.name());
                FieldMarker {
                    value_for: declared.and_then(|m| m.value_for.clone()),
                    data_source: declared
                        .and_then(|m| m.data_source.clone())
                        .or_else(|| prop.data_source().cloned()),
                }
            })
            .collect())
    }
}
