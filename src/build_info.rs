//! Compile-time build information, shown by `--version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string: package version, build date and commit.
pub fn version_line() -> String {
    format!(
        "billy-run {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
