use std::collections::HashMap;
use std::sync::Mutex;

use super::*;

/// Stub lookup backed by a fixed table; records every postcode it is asked for.
struct StubLookup {
    known: HashMap<&'static str, (f64, f64)>,
    calls: Mutex<Vec<String>>,
}

impl StubLookup {
    fn new(known: &[(&'static str, (f64, f64))]) -> Self {
        Self {
            known: known.iter().copied().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl PostcodeLookup for StubLookup {
    async fn lookup(&self, postcode: &str) -> Result<Coordinate, GeocodeError> {
        self.calls.lock().unwrap().push(postcode.to_owned());
        self.known
            .get(postcode)
            .and_then(|&(lat, lon)| Coordinate::new(lat, lon))
            .ok_or_else(|| GeocodeError::NotFound {
                postcode: postcode.to_owned(),
            })
    }
}

fn stub() -> StubLookup {
    StubLookup::new(&[
        ("SW1A1AA", (51.501_009, -0.141_588)),
        ("M11AE", (53.480_198, -2.240_862)),
    ])
}

#[test]
fn normalize_strips_whitespace_and_upper_cases() {
    assert_eq!(normalize_postcode(" sw1a 1aa "), "SW1A1AA");
    assert_eq!(normalize_postcode("m1\t1ae"), "M11AE");
    assert_eq!(normalize_postcode("   "), "");
}

#[tokio::test]
async fn equivalent_spellings_share_one_lookup() {
    let mut resolver = CoordinateResolver::new(stub());

    let first = resolver.resolve("sw1a 1aa").await.expect("known postcode");
    let second = resolver.resolve("SW1A1AA").await.expect("known postcode");

    assert_eq!(first, second);
    assert_eq!(resolver.external_calls(), 1);
    assert_eq!(resolver.cache_len(), 1);
    assert_eq!(*resolver.lookup.calls.lock().unwrap(), vec!["SW1A1AA"]);
}

#[tokio::test]
async fn failures_are_cached_and_not_retried() {
    let mut resolver = CoordinateResolver::new(stub());

    assert_eq!(resolver.resolve("ZZ99 9ZZ").await, Err(LookupFailure));
    assert_eq!(resolver.resolve("zz999zz").await, Err(LookupFailure));

    assert_eq!(resolver.external_calls(), 1);
    assert_eq!(resolver.cache_len(), 1);
}

#[tokio::test]
async fn blank_input_never_reaches_the_service() {
    let mut resolver = CoordinateResolver::new(stub());

    assert_eq!(resolver.resolve("").await, Err(LookupFailure));
    assert_eq!(resolver.resolve("  \t ").await, Err(LookupFailure));

    assert_eq!(resolver.external_calls(), 0);
    assert_eq!(resolver.cache_len(), 0);
}

#[tokio::test]
async fn with_home_sets_base_coordinate() {
    let resolver = CoordinateResolver::new(stub()).with_home(" m1 1ae").await;

    assert_eq!(resolver.base_postcode(), Some("m1 1ae"));
    let base = resolver.base_coordinate().expect("home should resolve");
    assert!((base.latitude() - 53.480_198).abs() < 1e-9);
}

#[tokio::test]
async fn with_home_failure_leaves_resolver_usable() {
    let mut resolver = CoordinateResolver::new(stub()).with_home("XX1 1XX").await;

    assert!(resolver.base_coordinate().is_none());
    assert!(resolver.resolve("M1 1AE").await.is_ok());
    assert_eq!(resolver.external_calls(), 2);
}

#[tokio::test]
async fn external_calls_are_spaced_by_min_interval() {
    let interval = Duration::from_millis(40);
    let mut resolver = CoordinateResolver::new(stub()).with_min_interval(interval);

    let started = std::time::Instant::now();
    resolver.resolve("SW1A 1AA").await.unwrap();
    resolver.resolve("M1 1AE").await.unwrap();
    assert!(started.elapsed() >= interval);
}

#[tokio::test]
async fn cache_hits_skip_the_pacing_delay() {
    let interval = Duration::from_millis(500);
    let mut resolver = CoordinateResolver::new(stub()).with_min_interval(interval);

    resolver.resolve("SW1A 1AA").await.unwrap();
    let started = std::time::Instant::now();
    for _ in 0..5 {
        resolver.resolve("sw1a1aa").await.unwrap();
    }
    assert!(started.elapsed() < interval);
}
