//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against a [`Router`].
//!
//! ```yaml
//! name: precedence
//! description: literal beats parameter
//! routes:
//!   - { method: GET, path: '/users/:id', data: by_id }
//!   - { method: GET, path: /users/admin, data: admin }
//! removals:
//!   - { method: GET, path: '/users/:id', expect: true }
//! cases:
//!   - name: literal
//!     method: GET
//!     path: /users/admin
//!     expect: admin
//! ```

use crate::sorted_params;
use fastroute::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub removals: Vec<Removal>,
    pub cases: Vec<TestCase>,
}

/// A route to register, in order
#[derive(Debug, Deserialize)]
pub struct RouteEntry {
    #[serde(default)]
    pub method: String,
    pub path: String,
    pub data: String,
}

/// A removal applied after registration, before any case runs
#[derive(Debug, Deserialize)]
pub struct Removal {
    #[serde(default)]
    pub method: String,
    pub path: String,
    pub expect: bool,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub method: String,
    pub path: String,
    /// Extract parameters (`find_with` option).
    #[serde(default = "default_true")]
    pub params: bool,
    /// Expected payload, `None` for no match.
    pub expect: Option<String>,
    /// Expected parameters. Absent means not checked; `{}` means none bound.
    #[serde(default)]
    pub expect_params: Option<HashMap<String, String>>,
}

fn default_true() -> bool {
    true
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case or removal
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Build the router described by `routes`.
    pub fn build(&self) -> Result<Router<String>, RouterError> {
        let mut router = Router::new();
        for route in &self.routes {
            router.add(&route.method, &route.path, route.data.clone())?;
        }
        Ok(router)
    }

    /// Run all removals and test cases and return results
    ///
    /// # Panics
    ///
    /// Panics if a route fails to register.
    pub fn run(&self) -> Vec<CaseResult> {
        let mut router = self
            .build()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to build: {e}", self.name));

        let mut results: Vec<CaseResult> = self
            .removals
            .iter()
            .map(|removal| {
                let removed = router.remove(&removal.method, &removal.path);
                CaseResult {
                    case_name: format!("remove {} {}", removal.method, removal.path),
                    passed: removed == removal.expect,
                    expected: removal.expect.to_string(),
                    actual: removed.to_string(),
                }
            })
            .collect();

        results.extend(self.cases.iter().map(|case| case.run(&router)));
        results
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {}, got {}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

impl TestCase {
    fn run(&self, router: &Router<String>) -> CaseResult {
        let options = FindOptions::new().with_params(self.params);
        let found = router.find_with(&self.method, &self.path, options);

        let actual_data = found.as_ref().map(|m| m.data.clone());
        let actual_params = sorted_params(found.as_ref().and_then(|m| m.params.as_ref()));

        let mut passed = actual_data == self.expect;
        let mut expected = format!("{:?}", self.expect);
        let mut actual = format!("{actual_data:?}");

        if let Some(expect_params) = &self.expect_params {
            let mut expect_sorted: Vec<(String, String)> = expect_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            expect_sorted.sort();
            passed &= actual_params == expect_sorted;
            expected = format!("{expected} with params {expect_sorted:?}");
            actual = format!("{actual} with params {actual_params:?}");
        }

        CaseResult {
            case_name: self.name.clone(),
            passed,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r"
name: inline
routes:
  - { method: GET, path: '/users/:id', data: user }
  - { path: /health, data: health }
removals:
  - { method: POST, path: '/users/:id', expect: false }
cases:
  - name: param
    method: GET
    path: /users/7
    expect: user
    expect_params: { id: '7' }
  - name: no params requested
    method: GET
    path: /users/7
    params: false
    expect: user
    expect_params: {}
  - name: any method
    method: PATCH
    path: /health
    expect: health
  - name: miss
    method: GET
    path: /nope
    expect: null
";

    #[test]
    fn parse_and_run_inline_fixture() {
        let fixture = Fixture::from_yaml(YAML).unwrap();
        assert_eq!(fixture.routes[1].method, "");
        assert!(fixture.cases[0].params);

        let results = fixture.run();
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.passed), "{results:#?}");
    }

    #[test]
    fn failing_case_is_reported() {
        let yaml = r"
name: wrong
routes:
  - { method: GET, path: /a, data: a }
cases:
  - { name: mismatch, method: GET, path: /a, expect: b }
";
        let results = Fixture::from_yaml(yaml).unwrap().run();
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, r#"Some("a")"#);
    }

    #[test]
    fn multi_document_yaml() {
        let yaml = format!("{YAML}---\n{YAML}");
        assert_eq!(Fixture::from_yaml_multi(&yaml).unwrap().len(), 2);
    }
}
