//! Driver version surface — the two readings the wrapper layer gates on.
//!
//! The wrapper parses both readings as semantic versions, so they must stay
//! in plain `major.minor.patch` form with no prefix or padding.

use ledger_driver::{core_library_version, driver_version, CORE_LIBRARY_VERSION, DRIVER_VERSION};

fn is_plain_triple(s: &str) -> bool {
    let core = s.split(['-', '+']).next().unwrap_or("");
    let parts: Vec<&str> = core.split('.').collect();
    parts.len() == 3
        && parts.iter().all(|p| {
            !p.is_empty()
                && p.chars().all(|c| c.is_ascii_digit())
                && (p.len() == 1 || !p.starts_with('0'))
        })
}

#[test]
fn driver_version_matches_package_version() {
    assert_eq!(driver_version(), env!("CARGO_PKG_VERSION"));
    assert_eq!(driver_version(), DRIVER_VERSION);
}

#[test]
fn core_library_version_matches_constant() {
    assert_eq!(core_library_version(), CORE_LIBRARY_VERSION);
}

#[test]
fn readings_are_plain_semver_triples() {
    assert!(is_plain_triple(&driver_version()), "bad driver version {:?}", driver_version());
    assert!(
        is_plain_triple(&core_library_version()),
        "bad core library version {:?}",
        core_library_version()
    );
}

#[test]
fn readings_are_stable_across_calls() {
    for _ in 0..3 {
        assert_eq!(driver_version(), DRIVER_VERSION);
        assert_eq!(core_library_version(), CORE_LIBRARY_VERSION);
    }
}
