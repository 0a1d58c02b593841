//! fastroute-test: helpers for conformance testing
//!
//! Builds routers from compact route lists and renders match results in a
//! stable, comparable form. The `fixtures` feature adds the YAML fixture
//! runner used by the conformance suite.
//!
//! # Example
//!
//! ```
//! use fastroute_test::prelude::*;
//!
//! let router = router_from(&[
//!     ("GET", "/users/:id", "user"),
//!     ("", "/health", "health"),
//! ]);
//!
//! let m = router.find("GET", "/users/42").unwrap();
//! assert_eq!(m.data, "user");
//! assert_eq!(sorted_params(m.params.as_ref()), vec![("id".into(), "42".into())]);
//! ```

use fastroute::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Build a `Router<String>` from `(method, pattern, data)` triples.
///
/// # Panics
///
/// Panics if a pattern fails to register.
#[must_use]
pub fn router_from(routes: &[(&str, &str, &str)]) -> Router<String> {
    let mut router = Router::new();
    for &(method, pattern, data) in routes {
        if let Err(e) = router.add(method, pattern, data.to_owned()) {
            panic!("failed to register {method} {pattern}: {e}");
        }
    }
    router
}

/// Parameters as `(name, value)` pairs sorted by name. `None` is empty.
#[must_use]
pub fn sorted_params(params: Option<&Params>) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .flat_map(Params::iter)
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    pairs.sort();
    pairs
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{router_from, sorted_params};
    pub use fastroute::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_from_registers_every_route() {
        let router = router_from(&[
            ("GET", "/a", "a"),
            ("POST", "/a", "a_post"),
            ("GET", "/b/:id", "b"),
        ]);

        assert_eq!(router.len(), 3);
        assert_eq!(router.find("POST", "/a").unwrap().data, "a_post");
    }

    #[test]
    #[should_panic(expected = "failed to register GET /x/:id([)")]
    fn router_from_panics_on_bad_pattern() {
        let _ = router_from(&[("GET", "/x/:id([)", "x")]);
    }

    #[test]
    fn sorted_params_orders_by_name() {
        let router = router_from(&[("GET", "/:b/:a", "r")]);
        let m = router.find("GET", "/2/1").unwrap();

        assert_eq!(
            sorted_params(m.params.as_ref()),
            vec![("a".into(), "1".into()), ("b".into(), "2".into())]
        );
        assert!(sorted_params(None).is_empty());
    }
}
