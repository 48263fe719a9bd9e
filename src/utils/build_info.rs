//! Compile-time build information (generated by build.rs).

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `canton-run <version> (<date>, <commit>)`
pub fn version_line() -> String {
    format!(
        "canton-run {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
