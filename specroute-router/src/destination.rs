use std::path::{Path, PathBuf};

use serde::Serialize;

/// Vendor extension naming a handler explicitly.
pub const VENDOR_EXTENSION: &str = "x-falcon";
/// Prefix of the responder name used when the extension names none.
pub const FALLBACK_PREFIX: &str = "on_";
const HANDLER_FILE_EXTENSION: &str = "rs";

/// Where an operation is handled: `module.Class.responder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub module: String,
    pub class: String,
    pub responder: String,
    /// Source location the module path maps to, relative to the application
    /// directory. Informational; handlers are looked up by name.
    pub location: PathBuf,
}

impl Destination {
    /// `module.Class`, the key resource instances are shared under.
    pub fn qualified_class(&self) -> String {
        if self.module.is_empty() {
            self.class.clone()
        } else {
            format!("{}.{}", self.module, self.class)
        }
    }
}

/// Destination of one operation, or `None` when the operation names none.
///
/// `operationId` takes precedence over the vendor extension. An
/// `operationId` needs at least `Class.responder`; anything shorter does not
/// name a handler.
pub fn resolve_destination(definition: &serde_json::Value, http_method: &str, app_dir: &Path) -> Option<Destination> {
    if let Some(op_id) = definition.get("operationId").and_then(|v| v.as_str()) {
        let mut parts: Vec<&str> = op_id.split('.').collect();
        if parts.len() < 2 {
            return None;
        }
        let responder = parts.pop()?.to_string();
        let class = parts.pop()?.to_string();
        let module = parts.join(".");
        return Some(Destination {
            location: module_location(app_dir, &module),
            module,
            class,
            responder,
        });
    }

    let ext = definition.get(VENDOR_EXTENSION)?;
    let module = ext.get("module")?.as_str()?.to_string();
    let class = ext.get("class")?.as_str()?.to_string();
    let responder = match ext.get("method").and_then(|v| v.as_str()) {
        Some(m) => m.to_string(),
        None => format!("{FALLBACK_PREFIX}{}", http_method.to_lowercase()),
    };
    Some(Destination {
        location: module_location(app_dir, &module),
        module,
        class,
        responder,
    })
}

fn module_location(app_dir: &Path, module: &str) -> PathBuf {
    let relative = format!("{}.{HANDLER_FILE_EXTENSION}", module.replace('.', "/"));
    app_dir.join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operation_id_splits_right_to_left() {
        let d = resolve_destination(
            &json!({"operationId": "controllers.foo.Foo.on_get"}),
            "get",
            Path::new("/app"),
        )
        .unwrap();
        assert_eq!(d.module, "controllers.foo");
        assert_eq!(d.class, "Foo");
        assert_eq!(d.responder, "on_get");
        assert_eq!(d.location, PathBuf::from("/app/controllers/foo.rs"));
        assert_eq!(d.qualified_class(), "controllers.foo.Foo");
    }

    #[test]
    fn operation_id_wins_over_extension() {
        let d = resolve_destination(
            &json!({
                "operationId": "a.B.c",
                "x-falcon": {"module": "x.y", "class": "Z"}
            }),
            "get",
            Path::new("/app"),
        )
        .unwrap();
        assert_eq!(d.qualified_class(), "a.B");
    }

    #[test]
    fn extension_falls_back_to_http_method() {
        let d = resolve_destination(
            &json!({"x-falcon": {"module": "controllers.foo", "class": "Foo"}}),
            "POST",
            Path::new("/app"),
        )
        .unwrap();
        assert_eq!(d.responder, "on_post");

        let d = resolve_destination(
            &json!({"x-falcon": {"module": "controllers.foo", "class": "Foo", "method": "do_a_put"}}),
            "put",
            Path::new("/app"),
        )
        .unwrap();
        assert_eq!(d.responder, "do_a_put");
    }

    #[test]
    fn unroutable_definitions() {
        let dir = Path::new("/app");
        assert_eq!(resolve_destination(&json!({}), "get", dir), None);
        assert_eq!(resolve_destination(&json!({"operationId": "listPets"}), "get", dir), None);
        assert_eq!(resolve_destination(&json!({"x-falcon": {"module": "m"}}), "get", dir), None);
        assert_eq!(resolve_destination(&json!({"x-falcon": "m.C"}), "get", dir), None);
    }
}
