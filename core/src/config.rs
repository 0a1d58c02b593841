//! Declarative route tables.
//!
//! A route table deserializes from JSON or YAML and is loaded into a runtime
//! [`Router`] with [`RoutesConfig::build`]:
//!
//! ```yaml
//! routes:
//!   - method: GET
//!     path: /users/:id
//!     data: get_user
//!   - path: /health        # no method: answers any method
//!     data: health
//! ```

use crate::{Router, RouterError};
use serde::Deserialize;

/// A route table: routes registered in order, later duplicates overwrite.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RoutesConfig<T> {
    /// Routes to register.
    pub routes: Vec<RouteConfig<T>>,
}

/// One route of a [`RoutesConfig`].
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RouteConfig<T> {
    /// HTTP method. Omitted or empty registers for any method.
    #[serde(default)]
    pub method: String,

    /// Route pattern.
    pub path: String,

    /// Payload returned on match.
    pub data: T,
}

impl<T> RoutesConfig<T> {
    /// Register every route into a fresh [`Router`].
    ///
    /// Paths are normalized exactly as [`Router::add`] does, so an empty
    /// `path` registers the root.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] for the first route whose
    /// constraint does not compile.
    pub fn build(self) -> Result<Router<T>, RouterError> {
        let mut router = Router::new();
        for route in self.routes {
            router.add(&route.method, &route.path, route.data)?;
        }
        tracing::debug!(routes = router.len(), "route table loaded");
        Ok(router)
    }
}

impl<T> TryFrom<RoutesConfig<T>> for Router<T> {
    type Error = RouterError;

    fn try_from(config: RoutesConfig<T>) -> Result<Self, Self::Error> {
        config.build()
    }
}
