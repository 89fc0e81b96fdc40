//! The strategy registry.
//!
//! Maps widget categories to [`ConversionStrategy`] implementations. Lookup
//! is exact first, then by the nearest registered ancestor in the
//! registry's [`CategoryHierarchy`].

use std::collections::HashMap;

use formbind_core::{BindError, BindResult};
use formbind_widgets::{CategoryHierarchy, WidgetCategory};

use crate::strategy::{builtin_strategies, ConversionStrategy};

/// One strategy per widget category, plus the is-a table used for fallback.
///
/// # Examples
///
/// ```
/// use formbind_binder::StrategyRegistry;
/// use formbind_widgets::WidgetCategory;
///
/// let mut registry = StrategyRegistry::with_builtins();
/// let phone = WidgetCategory::custom("PhoneBox");
/// assert!(registry.resolve(&phone).is_err());
///
/// registry.declare(phone.clone(), WidgetCategory::MaskedTextBox).unwrap();
/// let strategy = registry.resolve(&phone).unwrap();
/// assert_eq!(strategy.widget_category(), WidgetCategory::TextBox);
/// ```
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<WidgetCategory, Box<dyn ConversionStrategy>>,
    hierarchy: CategoryHierarchy,
}

impl StrategyRegistry {
    /// Creates a registry with no strategies and the built-in hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with every built-in strategy.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for strategy in builtin_strategies() {
            registry.insert(strategy);
        }
        registry
    }

    /// Registers a strategy under its own category, returning the one it replaced.
    pub fn register(
        &mut self,
        strategy: impl ConversionStrategy + 'static,
    ) -> Option<Box<dyn ConversionStrategy>> {
        self.insert(Box::new(strategy))
    }

    /// Registers a boxed strategy, returning the one it replaced.
    pub fn insert(
        &mut self,
        strategy: Box<dyn ConversionStrategy>,
    ) -> Option<Box<dyn ConversionStrategy>> {
        let category = strategy.widget_category();
        tracing::debug!("Registering conversion strategy for '{category}'");
        self.strategies.insert(category, strategy)
    }

    /// Resolves the strategy for `category`.
    ///
    /// Tries an exact match, then each ancestor nearest first. Fails with
    /// [`BindError::UnregisteredCategory`] when nothing matches.
    pub fn resolve(&self, category: &WidgetCategory) -> BindResult<&dyn ConversionStrategy> {
        if let Some(strategy) = self.strategies.get(category) {
            return Ok(strategy.as_ref());
        }
        for ancestor in self.hierarchy.ancestors(category) {
            if let Some(strategy) = self.strategies.get(&ancestor) {
                tracing::trace!("Category '{category}' resolved through ancestor '{ancestor}'");
                return Ok(strategy.as_ref());
            }
        }
        Err(BindError::UnregisteredCategory(category.to_string()))
    }

    /// Returns `true` if a strategy is registered for exactly `category`.
    pub fn contains(&self, category: &WidgetCategory) -> bool {
        self.strategies.contains_key(category)
    }

    /// The number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns `true` if no strategy is registered.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Declares `child` to be a specialization of `parent` for fallback.
    pub fn declare(&mut self, child: WidgetCategory, parent: WidgetCategory) -> BindResult<()> {
        self.hierarchy.declare(child, parent)
    }

    /// The is-a table used for fallback.
    pub const fn hierarchy(&self) -> &CategoryHierarchy {
        &self.hierarchy
    }

    /// Mutable access to the is-a table.
    pub fn hierarchy_mut(&mut self) -> &mut CategoryHierarchy {
        &mut self.hierarchy
    }
}
