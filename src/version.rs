//! Build metadata, printed by `--version`.
//!
//! Crate version and toolchain come from the build script; commit hash and
//! build id are injected by the release pipeline through `APPINIT_COMMIT`
//! and `APPINIT_BUILD` at compile time.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const RUSTC: &str = env!("VERGEN_RUSTC_SEMVER");
pub const COMMIT: Option<&str> = option_env!("APPINIT_COMMIT");
pub const BUILD: Option<&str> = option_env!("APPINIT_BUILD");

const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

pub fn show() {
    for line in report() {
        println!("{line}");
    }
}

fn report() -> [String; 4] {
    [
        format!("version: {VERSION}"),
        format!("rustc: {RUSTC}"),
        format!("commit: {}", COMMIT.unwrap_or("unknown")),
        format!("build: {}", BUILD.unwrap_or(BUILD_TIMESTAMP)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_has_one_line_per_field() {
        let lines = report();

        assert!(lines[0].starts_with("version: "));
        assert!(lines[1].starts_with("rustc: "));
        assert!(lines[2].starts_with("commit: "));
        assert!(lines[3].starts_with("build: "));
    }

    #[test]
    fn version_matches_manifest() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
