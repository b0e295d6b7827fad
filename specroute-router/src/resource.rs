use std::collections::BTreeMap;
use std::sync::Arc;

use specroute_core::RequestContext;

/// A responder bound to its resource instance.
pub type Responder = Arc<dyn Fn(&RequestContext, &mut Response) + Send + Sync>;

/// A handler class. Responders are looked up by name: `on_get`, `on_post`
/// and friends for the HTTP verbs, plus whatever extra names a contract's
/// `operationId`s or extensions refer to.
pub trait Resource: Send + Sync + 'static {
    fn bind(self: Arc<Self>, name: &str) -> Option<Responder>;
}

/// Binds `f` to `resource`.
pub fn responder<R: Resource>(resource: Arc<R>, f: fn(&R, &RequestContext, &mut Response)) -> Responder {
    Arc::new(move |req, resp| f(&resource, req, resp))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub json: Option<serde_json::Value>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: 200,
            headers: BTreeMap::new(),
            json: None,
        }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }
}
