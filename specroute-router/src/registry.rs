//! Named resource constructors.
//!
//! Handlers are registered under their module path and class name, either
//! explicitly on a [`HandlerRegistry`] or at compile time with
//! [`register_resource!`](crate::register_resource), which submits a
//! [`ResourceRegistration`] to `inventory`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::destination::Destination;
use crate::error::RouterError;
use crate::resource::Resource;

pub type ResourceFactory = fn() -> Arc<dyn Resource>;

/// Compile-time registration entry collected with `inventory`.
pub struct ResourceRegistration {
    pub module: &'static str,
    pub class: &'static str,
    pub factory: ResourceFactory,
}

impl ResourceRegistration {
    pub const fn new(module: &'static str, class: &'static str, factory: ResourceFactory) -> Self {
        Self { module, class, factory }
    }
}

inventory::collect!(ResourceRegistration);

/// Factory for any `Default` resource, usable in `register_resource!`.
pub fn default_factory<R: Resource + Default>() -> Arc<dyn Resource> {
    Arc::new(R::default())
}

/// Registers a resource class at compile time.
///
/// ```ignore
/// specroute_router::register_resource!("controllers.foo", "Foo", default_factory::<Foo>);
/// ```
#[macro_export]
macro_rules! register_resource {
    ($module:expr, $class:expr, $factory:expr) => {
        $crate::inventory::submit! {
            $crate::ResourceRegistration::new($module, $class, $factory)
        }
    };
}

#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    modules: HashMap<String, HashMap<String, ResourceFactory>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything submitted with `register_resource!` in the linked binary.
    pub fn collected() -> Self {
        let mut registry = Self::new();
        for reg in inventory::iter::<ResourceRegistration> {
            registry.register(reg.module, reg.class, reg.factory);
        }
        registry
    }

    pub fn register(&mut self, module: &str, class: &str, factory: ResourceFactory) -> &mut Self {
        let previous = self
            .modules
            .entry(module.to_string())
            .or_default()
            .insert(class.to_string(), factory);
        if previous.is_some() {
            tracing::warn!(module, class, "resource registered twice; keeping the latest");
        }
        self
    }

    pub fn with(mut self, module: &str, class: &str, factory: ResourceFactory) -> Self {
        self.register(module, class, factory);
        self
    }

    pub fn contains(&self, module: &str, class: &str) -> bool {
        self.modules.get(module).is_some_and(|m| m.contains_key(class))
    }

    pub fn len(&self) -> usize {
        self.modules.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn instantiate(&self, dest: &Destination) -> Result<Arc<dyn Resource>, RouterError> {
        let classes = self.modules.get(&dest.module).ok_or_else(|| RouterError::ModuleNotFound {
            module: dest.module.clone(),
            location: dest.location.clone(),
        })?;
        let factory = classes.get(&dest.class).ok_or_else(|| RouterError::ClassNotFound {
            module: dest.module.clone(),
            class: dest.class.clone(),
        })?;
        Ok(factory())
    }
}
