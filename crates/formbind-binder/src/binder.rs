//! The model-view binder.
//!
//! [`ModelViewBinder`] ties everything together for one model type: it owns
//! the resolved markers, the strategy registry, the culture, and the
//! binding and source maps built by discovery, and it runs the
//! synchronization passes on demand.

use formbind_core::{
    BindResult, DuplicateBindingPolicy, Model, ModelDescriptor, PropertyDescriptor, Settings,
};
use formbind_widgets::{WidgetCategory, WidgetRef};

use crate::convert::Culture;
use crate::discovery::{BindingMap, DiscoveryOptions, FieldDiscovery, SourceMap};
use crate::marker::{FieldMarker, Markers};
use crate::registry::StrategyRegistry;
use crate::report::SyncReport;
use crate::strategy::ConversionStrategy;
use crate::sync::Synchronizer;

/// Synchronizes one model type with a tree of widgets.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
/// use formbind_binder::{DiscoveryOptions, ModelViewBinder};
/// use formbind_core::{Model, ModelDescriptor, PropertyDescriptor, Value};
/// use formbind_widgets::{Container, TextBox, Toggle, Widget, WidgetRef};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person {
///     name: String,
///     active: bool,
/// }
///
/// impl Model for Person {
///     fn descriptor() -> &'static ModelDescriptor<Self> {
///         static DESCRIPTOR: LazyLock<ModelDescriptor<Person>> = LazyLock::new(|| {
///             ModelDescriptor::new(
///                 "Person",
///                 vec![
///                     PropertyDescriptor::new("name", |m: &Person| &m.name, |m| &mut m.name),
///                     PropertyDescriptor::new("active", |m: &Person| &m.active, |m| &mut m.active),
///                 ],
///             )
///         });
///         &DESCRIPTOR
///     }
/// }
///
/// let name = WidgetRef::new(TextBox::new("nameTextBox"));
/// let active = WidgetRef::new(Toggle::check_box("active"));
/// let form = WidgetRef::new(
///     Container::panel("form").with_child(name.clone()).with_child(active.clone()),
/// );
///
/// let mut binder = ModelViewBinder::<Person>::new();
/// binder.discover(&[form], &DiscoveryOptions::default()).unwrap();
///
/// let ada = Person { name: "Ada".into(), active: true };
/// assert!(binder.model_to_view(&ada).is_clean());
/// assert_eq!(name.display_value(), Value::from("Ada"));
///
/// let back = binder.read_view().unwrap();
/// assert_eq!(back, ada);
/// ```
#[derive(Debug)]
pub struct ModelViewBinder<M: Model> {
    descriptor: &'static ModelDescriptor<M>,
    markers: Vec<FieldMarker>,
    registry: StrategyRegistry,
    culture: Culture,
    settings: Settings,
    bindings: BindingMap,
    sources: SourceMap,
}

impl<M: Model + Default> ModelViewBinder<M> {
    /// Creates a binder with default settings and no markers.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Creates a binder configured by `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        let descriptor = M::descriptor();
        let markers = descriptor
            .properties()
            .iter()
            .map(|prop| FieldMarker {
                value_for: None,
                data_source: prop.data_source().cloned(),
            })
            .collect();
        tracing::debug!(
            "Creating binder for '{}' with {} properties",
            descriptor.type_name(),
            descriptor.len()
        );
        Self {
            descriptor,
            markers,
            registry: StrategyRegistry::with_builtins(),
            culture: Culture::from_settings(&settings),
            settings,
            bindings: BindingMap::default(),
            sources: SourceMap::default(),
        }
    }

    /// Attaches a marker side-table, merged over the model's declared data
    /// sources. Fails if the table names an unknown property.
    pub fn with_markers(mut self, markers: &Markers) -> BindResult<Self> {
        self.markers = markers.resolve(self.descriptor)?;
        Ok(self)
    }

    /// Replaces the conversion culture.
    #[must_use]
    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    // ── Registry ─────────────────────────────────────────────────────

    /// Registers a conversion strategy, replacing any for the same category.
    pub fn register_strategy(&mut self, strategy: impl ConversionStrategy + 'static) {
        self.registry.register(strategy);
    }

    /// Declares `child` a specialization of `parent` for strategy fallback.
    pub fn declare_category(&mut self, child: WidgetCategory, parent: WidgetCategory) -> BindResult<()> {
        self.registry.declare(child, parent)
    }

    /// The strategy registry.
    pub const fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Mutable access to the strategy registry.
    pub fn registry_mut(&mut self) -> &mut StrategyRegistry {
        &mut self.registry
    }

    // ── Discovery ────────────────────────────────────────────────────

    /// Discovery options derived from the binder's settings.
    pub fn default_options(&self) -> DiscoveryOptions {
        DiscoveryOptions::from_settings(&self.settings)
    }

    /// Binds widgets under `roots` to model properties.
    ///
    /// Each root's direct children are scanned; with `options.recursive`
    /// nested containers are scanned too. Returns the number of newly bound
    /// widgets. Calls are additive.
    pub fn discover(&mut self, roots: &[WidgetRef], options: &DiscoveryOptions) -> BindResult<usize> {
        let added = FieldDiscovery::new(self.descriptor, &self.markers, options).run(
            roots,
            self.settings.duplicate_bindings,
            &mut self.bindings,
            &mut self.sources,
        )?;
        tracing::info!(
            "Discovered {added} binding(s) for '{}' ({} total)",
            self.descriptor.type_name(),
            self.bindings.len()
        );
        Ok(added)
    }

    /// Records data sources from the properties of an auxiliary model.
    ///
    /// Each property name has the first matching prefix stripped (the
    /// configured `strip_prefixes` when `prefixes` is empty). The first bound
    /// widget named after the result, optionally followed by its category
    /// name, receives the property's value. Returns the number of sources
    /// recorded.
    pub fn add_data_sources<S: Model>(&mut self, source: &S, prefixes: &[&str]) -> usize {
        let configured: Vec<&str> = self.settings.strip_prefixes.iter().map(String::as_str).collect();
        let prefixes = if prefixes.is_empty() { &configured[..] } else { prefixes };

        let mut recorded = 0;
        for prop in S::descriptor().properties() {
            let name = prop.name();
            let derived = prefixes
                .iter()
                .find_map(|prefix| name.strip_prefix(prefix))
                .unwrap_or(name);
            let target = self.bindings.iter().map(|(w, _)| w).find(|w| {
                let widget_name = w.name();
                widget_name == derived
                    || widget_name
                        .strip_prefix(derived)
                        .is_some_and(|rest| rest == w.category().as_str())
            });
            if let Some(widget) = target.cloned() {
                tracing::debug!("Data source '{name}' recorded for {widget:?}");
                self.sources.insert(widget, prop.get(source));
                recorded += 1;
            }
        }
        recorded
    }

    /// The binding map.
    pub const fn bindings(&self) -> &BindingMap {
        &self.bindings
    }

    /// The source map.
    pub const fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// The name of the property bound to `widget`.
    pub fn property_for(&self, widget: &WidgetRef) -> Option<&'static str> {
        self.bindings
            .property_of(widget)
            .and_then(|i| self.descriptor.get(i))
            .map(PropertyDescriptor::name)
    }

    // ── Synchronization ──────────────────────────────────────────────

    fn synchronizer(&self) -> Synchronizer<'_> {
        Synchronizer::new(&self.registry, &self.culture)
    }

    /// Installs every recorded data source. Never fails.
    pub fn push_data_sources(&self) -> SyncReport {
        self.synchronizer().push_data_sources(&self.sources)
    }

    /// Renders `model` into the bound widgets. Never fails.
    pub fn model_to_view(&self, model: &M) -> SyncReport {
        self.synchronizer()
            .model_to_view(self.descriptor, &self.bindings, model)
    }

    /// Installs data sources, then renders `model`, in one report.
    pub fn refresh_view(&self, model: &M) -> SyncReport {
        let mut report = self.push_data_sources();
        report.merge(self.model_to_view(model));
        report
    }

    /// Reads the bound widgets back into `model`.
    ///
    /// Hidden widgets are skipped unless `include_hidden` is set. On error
    /// `model` is left exactly as it was.
    pub fn view_to_model<'m>(&self, model: &'m mut M, include_hidden: bool) -> BindResult<&'m mut M> {
        self.synchronizer()
            .view_to_model(self.descriptor, &self.bindings, model, include_hidden)?;
        Ok(model)
    }

    /// Builds a fresh model from the bound widgets, honoring the configured
    /// `include_hidden_widgets`.
    pub fn read_view(&self) -> BindResult<M> {
        let mut model = M::default();
        self.view_to_model(&mut model, self.settings.include_hidden_widgets)?;
        Ok(model)
    }

    /// The settings the binder was created with.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The policy applied to conflicting discovery claims.
    pub const fn duplicate_policy(&self) -> DuplicateBindingPolicy {
        self.settings.duplicate_bindings
    }
}

impl<M: Model + Default> Default for ModelViewBinder<M> {
    fn default() -> Self {
        Self::new()
    }
}
