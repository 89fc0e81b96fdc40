//! Bulk synchronization over the binding and source maps.
//!
//! `push_data_sources` and `model_to_view` are lenient: each entry is
//! attempted, failures are logged and recorded in a [`SyncReport`], and the
//! pass continues. `view_to_model` is strict and runs in two phases. Every
//! entry is resolved, read, coerced and checked before the first property is
//! written, so a failing entry leaves the model untouched.

use formbind_core::logging::sync_span;
use formbind_core::{BindError, BindResult, ModelDescriptor, PropertyDescriptor, Value};
use formbind_widgets::WidgetRef;

use crate::convert::Culture;
use crate::discovery::{BindingMap, SourceMap};
use crate::registry::StrategyRegistry;
use crate::report::SyncReport;

/// Runs synchronization passes against one registry and culture.
#[derive(Debug, Clone, Copy)]
pub struct Synchronizer<'a> {
    registry: &'a StrategyRegistry,
    culture: &'a Culture,
}

impl<'a> Synchronizer<'a> {
    /// Creates a synchronizer.
    pub const fn new(registry: &'a StrategyRegistry, culture: &'a Culture) -> Self {
        Self { registry, culture }
    }

    /// Installs every recorded data source into its widget.
    pub fn push_data_sources(&self, sources: &SourceMap) -> SyncReport {
        let span = sync_span("push_data_sources", "-");
        let _guard = span.enter();

        let mut report = SyncReport::new();
        for (widget, source) in sources.iter() {
            let result = self
                .registry
                .resolve(&widget.category())
                .and_then(|strategy| strategy.install_data_source(widget.as_widget(), source, self.culture));
            if let Err(e) = &result {
                tracing::warn!("Skipping data source for {widget:?}: {e}");
            }
            report.record(widget.name(), None, result);
        }
        report
    }

    /// Renders every bound property of `model` into its widget.
    pub fn model_to_view<M>(
        &self,
        descriptor: &ModelDescriptor<M>,
        bindings: &BindingMap,
        model: &M,
    ) -> SyncReport {
        let span = sync_span("model_to_view", descriptor.type_name());
        let _guard = span.enter();

        let mut report = SyncReport::new();
        for (widget, index) in bindings.iter() {
            let (property, result) = match property_at(descriptor, index) {
                Ok(prop) => (Some(prop.name()), self.render(widget, prop, model)),
                Err(e) => (None, Err(e)),
            };
            match &result {
                Ok(()) => tracing::debug!("Rendered '{}' into {widget:?}", property.unwrap_or("?")),
                Err(e) => tracing::warn!("Skipping {widget:?}: {e}"),
            }
            report.record(widget.name(), property, result);
        }
        report
    }

    /// Reads every bound widget back into `model`.
    ///
    /// Widgets that are hidden are skipped unless `include_hidden` is set.
    /// Fails with the first error met; the model is only written once every
    /// entry has been read and checked.
    pub fn view_to_model<M>(
        &self,
        descriptor: &ModelDescriptor<M>,
        bindings: &BindingMap,
        model: &mut M,
        include_hidden: bool,
    ) -> BindResult<()> {
        let span = sync_span("view_to_model", descriptor.type_name());
        let _guard = span.enter();

        let mut staged: Vec<(&PropertyDescriptor<M>, Value)> = Vec::with_capacity(bindings.len());
        for (widget, index) in bindings.iter() {
            if !include_hidden && !widget.is_visible() {
                tracing::debug!("Skipping hidden widget {widget:?}");
                continue;
            }
            let prop = property_at(descriptor, index)?;
            let value = self.read(widget, prop)?;
            staged.push((prop, value));
        }

        for (prop, value) in staged {
            prop.set(model, &value)?;
        }
        Ok(())
    }

    fn render<M>(&self, widget: &WidgetRef, prop: &PropertyDescriptor<M>, model: &M) -> BindResult<()> {
        let strategy = self.registry.resolve(&widget.category())?;
        strategy.model_to_widget(widget.as_widget(), &prop.get(model), self.culture)
    }

    fn read<M>(&self, widget: &WidgetRef, prop: &PropertyDescriptor<M>) -> BindResult<Value> {
        let strategy = self.registry.resolve(&widget.category())?;
        let raw = strategy.widget_to_model(widget.as_widget())?;
        let value = self.culture.change_type(&raw, prop.kind())?;
        prop.check(&value)?;
        tracing::debug!("Read '{}' from {widget:?}: {value}", prop.name());
        Ok(value)
    }
}

fn property_at<M>(descriptor: &ModelDescriptor<M>, index: usize) -> BindResult<&PropertyDescriptor<M>> {
    descriptor
        .get(index)
        .ok_or_else(|| BindError::UnknownProperty(format!("{}#{index}", descriptor.type_name())))
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use formbind_core::{DuplicateBindingPolicy, Model, PropertyDescriptor};
    use formbind_widgets::{Container, NumericUpDown, TextBox};

    use super::*;
    use crate::discovery::{DiscoveryOptions, FieldDiscovery};
    use crate::marker::FieldMarker;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        title: String,
        count: i32,
    }

    impl Model for Item {
        fn descriptor() -> &'static ModelDescriptor<Self> {
            static DESCRIPTOR: LazyLock<ModelDescriptor<Item>> = LazyLock::new(|| {
                ModelDescriptor::new(
                    "Item",
                    vec![
                        PropertyDescriptor::new("title", |m: &Item| &m.title, |m| &mut m.title),
                        PropertyDescriptor::new("count", |m: &Item| &m.count, |m| &mut m.count),
                    ],
                )
            });
            &DESCRIPTOR
        }
    }

    fn bind(children: Vec<WidgetRef>) -> BindingMap {
        let form = WidgetRef::new(Container::panel("form").with_children(children));
        let markers = vec![FieldMarker::default(); 2];
        let options = DiscoveryOptions::default();
        let mut bindings = BindingMap::default();
        let mut sources = SourceMap::default();
        FieldDiscovery::new(Item::descriptor(), &markers, &options)
            .run(&[form], DuplicateBindingPolicy::Reject, &mut bindings, &mut sources)
            .unwrap();
        bindings
    }

    #[test]
    fn test_model_to_view_continues_past_failures() {
        let title = WidgetRef::new(TextBox::new("title"));
        let count = WidgetRef::new(NumericUpDown::new("count").with_range(0.0, 5.0));
        let bindings = bind(vec![count.clone(), title.clone()]);
        let registry = StrategyRegistry::with_builtins();
        let culture = Culture::invariant();
        let sync = Synchronizer::new(&registry, &culture);

        let item = Item { title: "Lamp".into(), count: 9 };
        let report = sync.model_to_view(Item::descriptor(), &bindings, &item);
        assert_eq!(report.applied(), 1);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(title.display_value(), Value::from("Lamp"));
        assert_eq!(count.display_value(), Value::Float(0.0));
    }

    #[test]
    fn test_view_to_model_writes_nothing_on_failure() {
        let title = WidgetRef::new(TextBox::new("title").with_text("Desk"));
        let count = WidgetRef::new(TextBox::new("countTextBox").with_text("many"));
        let bindings = bind(vec![title, count]);
        let registry = StrategyRegistry::with_builtins();
        let culture = Culture::invariant();
        let sync = Synchronizer::new(&registry, &culture);

        let mut item = Item { title: "Before".into(), count: 1 };
        let err = sync
            .view_to_model(Item::descriptor(), &bindings, &mut item, true)
            .unwrap_err();
        assert!(matches!(err, BindError::TypeMismatch { .. }));
        assert_eq!(item, Item { title: "Before".into(), count: 1 });
    }

    #[test]
    fn test_view_to_model_range_checked_before_write() {
        let title = WidgetRef::new(TextBox::new("title").with_text("Desk"));
        let count = WidgetRef::new(TextBox::new("count").with_text("99999999999"));
        let bindings = bind(vec![title, count]);
        let registry = StrategyRegistry::with_builtins();
        let culture = Culture::invariant();
        let sync = Synchronizer::new(&registry, &culture);

        let mut item = Item::default();
        assert!(sync
            .view_to_model(Item::descriptor(), &bindings, &mut item, true)
            .is_err());
        assert_eq!(item, Item::default());
    }

    #[test]
    fn test_view_to_model_skips_hidden() {
        let title = WidgetRef::new(TextBox::new("title").with_text("Chair"));
        let count = WidgetRef::new(TextBox::new("count").with_text("oops").hidden());
        let bindings = bind(vec![title, count]);
        let registry = StrategyRegistry::with_builtins();
        let culture = Culture::invariant();
        let sync = Synchronizer::new(&registry, &culture);

        let mut item = Item { title: String::new(), count: 3 };
        sync.view_to_model(Item::descriptor(), &bindings, &mut item, false)
            .unwrap();
        assert_eq!(item, Item { title: "Chair".into(), count: 3 });
        assert!(sync
            .view_to_model(Item::descriptor(), &bindings, &mut item, true)
            .is_err());
    }

    #[test]
    fn test_push_data_sources_reports_unsupported() {
        let title = WidgetRef::new(TextBox::new("title"));
        let mut sources = SourceMap::default();
        sources.insert(title, Value::list(["x"]));
        let registry = StrategyRegistry::with_builtins();
        let culture = Culture::invariant();
        let report = Synchronizer::new(&registry, &culture).push_data_sources(&sources);
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.failures().next().unwrap().error(),
            Some(BindError::Unsupported { .. })
        ));
    }
}
