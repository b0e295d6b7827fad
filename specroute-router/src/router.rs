use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use specroute_core::{Contract, ContractSource, RequestContext};

use crate::destination::{resolve_destination, Destination};
use crate::error::RouterError;
use crate::registry::HandlerRegistry;
use crate::resource::{Resource, Responder, Response};

/// Upper-cased HTTP method → bound responder.
pub type MethodMap = BTreeMap<String, Responder>;

/// The routing table a framework provides.
pub trait RouteTable {
    fn add_route(&mut self, path: &str, method_map: &MethodMap, resource: Arc<dyn Resource>);
}

/// One resolved operation, before any handler is instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRoute {
    pub path: String,
    pub method: String,
    pub destination: Destination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedOperation {
    pub path: String,
    pub method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub base_path: String,
    pub routes: Vec<PlannedRoute>,
    pub skipped: Vec<SkippedOperation>,
}

/// Resolves every operation's destination without touching the registry.
pub fn plan_routes(contract: &Contract, app_dir: &Path) -> RoutePlan {
    let base_path = contract.base_path();
    let mut plan = RoutePlan {
        base_path: base_path.to_string(),
        ..RoutePlan::default()
    };

    for op in contract.operations() {
        let path = format!("{base_path}{}", op.template);
        let method = op.method.to_uppercase();
        match resolve_destination(op.definition, op.method, app_dir) {
            Some(destination) => plan.routes.push(PlannedRoute {
                path,
                method,
                destination,
            }),
            None => {
                tracing::debug!(%path, %method, "no operationId or x-falcon; operation not routed");
                plan.skipped.push(SkippedOperation { path, method });
            }
        }
    }
    plan
}

pub struct Route {
    path: String,
    resource_name: String,
    resource: Arc<dyn Resource>,
    responders: MethodMap,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("resource", &self.resource_name)
            .field("methods", &self.responders.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Route {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `module.Class` of the resource serving this path.
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn resource(&self) -> &Arc<dyn Resource> {
        &self.resource
    }

    pub fn method_map(&self) -> &MethodMap {
        &self.responders
    }

    pub fn responder(&self, method: &str) -> Option<&Responder> {
        self.responders.get(&method.to_ascii_uppercase())
    }

    /// Declared methods plus `OPTIONS`, which is always answered.
    pub fn allowed_methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.responders.keys().map(|m| m.as_str()).collect();
        if !self.responders.contains_key("OPTIONS") {
            methods.push("OPTIONS");
        }
        methods
    }

    /// Runs the responder for `method`. Undeclared methods get `405` with an
    /// `Allow` header; an undeclared `OPTIONS` gets `200` with the same header.
    pub fn dispatch(&self, method: &str, req: &RequestContext, resp: &mut Response) {
        if let Some(responder) = self.responder(method) {
            responder(req, resp);
            return;
        }
        resp.status = if method.eq_ignore_ascii_case("OPTIONS") { 200 } else { 405 };
        resp.headers
            .insert("Allow".to_string(), self.allowed_methods().join(", "));
    }
}

/// Contract-driven routes: one [`Route`] per full path, each backed by a
/// single resource instance.
#[derive(Debug)]
pub struct OpenApiRouter {
    base_path: String,
    routes: BTreeMap<String, Route>,
}

impl OpenApiRouter {
    pub fn new(source: ContractSource, registry: &HandlerRegistry, app_dir: &Path) -> Result<Self, RouterError> {
        let contract = Contract::load(source, app_dir)?;
        Self::from_contract(&contract, registry, app_dir)
    }

    pub fn from_contract(contract: &Contract, registry: &HandlerRegistry, app_dir: &Path) -> Result<Self, RouterError> {
        let plan = plan_routes(contract, app_dir);
        let skipped = plan.skipped.len();

        // One instance per `module.Class` for the whole contract.
        let mut instances: HashMap<String, Arc<dyn Resource>> = HashMap::new();
        let mut routes: BTreeMap<String, Route> = BTreeMap::new();

        for planned in plan.routes {
            let dest = &planned.destination;
            let class_name = dest.qualified_class();

            let resource = match instances.get(&class_name) {
                Some(existing) => existing.clone(),
                None => {
                    let created = registry.instantiate(dest)?;
                    tracing::debug!(class = %class_name, "instantiated resource");
                    instances.insert(class_name.clone(), created.clone());
                    created
                }
            };

            let responder = resource
                .clone()
                .bind(&dest.responder)
                .ok_or_else(|| RouterError::ResponderNotFound {
                    class: class_name.clone(),
                    responder: dest.responder.clone(),
                })?;

            let route = routes.entry(planned.path.clone()).or_insert_with(|| Route {
                path: planned.path.clone(),
                resource_name: class_name.clone(),
                resource: resource.clone(),
                responders: MethodMap::new(),
            });
            if route.resource_name != class_name {
                return Err(RouterError::ConflictingResources {
                    path: planned.path,
                    existing: route.resource_name.clone(),
                    incoming: class_name,
                });
            }
            route.responders.insert(planned.method, responder);
        }

        tracing::info!(
            routes = routes.len(),
            resources = instances.len(),
            skipped,
            "built router from contract"
        );

        Ok(Self {
            base_path: plan.base_path,
            routes,
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Route registered for exactly `path` (base path included).
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.get(path)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn register_into<T: RouteTable + ?Sized>(&self, table: &mut T) {
        for route in self.routes.values() {
            table.add_route(&route.path, &route.responders, route.resource.clone());
        }
    }
}
