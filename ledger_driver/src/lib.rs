#![forbid(unsafe_code)]

//! Ledger driver — low-level bridge to the core ledger library.
//!
//! The only surface the wrapper layer relies on is the pair of live version
//! readings below. Ledger operations are exposed elsewhere and are not
//! consumed by the compatibility guard.

/// Version of this driver build.
pub const DRIVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the core ledger library embedded in this driver.
pub const CORE_LIBRARY_VERSION: &str = "0.1.0";

/// Version of the driver currently loaded.
pub fn driver_version() -> String {
    DRIVER_VERSION.to_string()
}

/// Version of the core ledger library in use by the loaded driver.
///
/// This is the library the driver runs against, not necessarily the one it
/// was compiled against.
pub fn core_library_version() -> String {
    CORE_LIBRARY_VERSION.to_string()
}
