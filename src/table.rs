//! JSON route tables
//!
//! Accepts the same shapes as the in-code API: a path string, an object with
//! `path`, `name`, `meta` and `children`, or an array of either. Children
//! may use the same shapes.
//!
//! ```
//! use router_mock::routes_from_json;
//!
//! let routes = routes_from_json(r#"[
//!     "/",
//!     {
//!         "path": "/user",
//!         "name": "parent",
//!         "children": ["", { "path": ":userId", "name": "child" }]
//!     }
//! ]"#).unwrap();
//!
//! assert_eq!(routes.len(), 2);
//! assert_eq!(routes[1].children.len(), 2);
//! ```

use crate::error::RouteError;
use crate::route::RouteDefinition;
use crate::{debug_log, error_log};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTable {
    Many(Vec<RawRoute>),
    One(RawRoute),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRoute {
    Path(String),
    Full {
        path: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        meta: HashMap<String, String>,
        #[serde(default)]
        children: Vec<RawRoute>,
    },
}

impl TryFrom<RawRoute> for RouteDefinition {
    type Error = RouteError;

    fn try_from(raw: RawRoute) -> Result<Self, Self::Error> {
        match raw {
            RawRoute::Path(path) => RouteDefinition::try_new(path),
            RawRoute::Full {
                path,
                name,
                meta,
                children,
            } => {
                let mut route = RouteDefinition::try_new(path)?;
                route.name = name;
                route.meta = meta;
                let children = children
                    .into_iter()
                    .map(RouteDefinition::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(route.children(children))
            }
        }
    }
}

/// Parse a JSON route table into top-level route definitions
pub fn routes_from_json(json: &str) -> Result<Vec<RouteDefinition>, RouteError> {
    let raw: RawTable = serde_json::from_str(json).map_err(|err| {
        error_log!("Failed to parse route table: {}", err);
        RouteError::from(err)
    })?;

    let raw = match raw {
        RawTable::Many(routes) => routes,
        RawTable::One(route) => vec![route],
    };

    let routes = raw
        .into_iter()
        .map(RouteDefinition::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    debug_log!("Loaded {} route(s) from JSON", routes.len());
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_string() {
        let routes = routes_from_json(r#""/users""#).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/users");
    }

    #[test]
    fn test_single_object() {
        let routes =
            routes_from_json(r#"{"path": "/users/add", "meta": {"title": "some title"}}"#).unwrap();
        assert_eq!(routes[0].meta.get("title"), Some(&"some title".to_string()));
        assert!(routes[0].name.is_none());
    }

    #[test]
    fn test_nested_children() {
        let routes = routes_from_json(
            r#"[{"path": "/users", "children": [{"path": "add", "children": [":many"]}]}]"#,
        )
        .unwrap();

        let add = &routes[0].children[0];
        assert_eq!(add.path, "add");
        assert_eq!(add.children[0].path, ":many");
    }

    #[test]
    fn test_invalid_path_is_reported() {
        let err = routes_from_json(r#"["/users//x"]"#).unwrap_err();
        assert!(err.is_invalid_path());
    }

    #[test]
    fn test_malformed_json() {
        let err = routes_from_json("[").unwrap_err();
        assert!(matches!(err, RouteError::InvalidTable { .. }));
    }

    #[test]
    fn test_wrong_shape() {
        let err = routes_from_json(r#"[{"name": "no path"}]"#).unwrap_err();
        assert!(matches!(err, RouteError::InvalidTable { .. }));
    }
}
