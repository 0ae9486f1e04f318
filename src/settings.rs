// Launch settings - `key=value` tokens read once when the run starts

use std::path::PathBuf;

pub const TARGET_KEY: &str = "results-target";
pub const FILES_KEY: &str = "results-files";
pub const CONFIG_KEY: &str = "results-config";
pub const BUILD_NAME_KEY: &str = "results-build-name";
pub const BUILD_DESC_KEY: &str = "results-build-desc";
pub const BUILD_RESULT_KEY: &str = "results-build-result";
pub const BUILD_REASON_KEY: &str = "results-build-reason";

/// Settings extracted from launch arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchSettings {
    /// Destination token. Absent means the reporter is disabled.
    pub target: Option<String>,
    /// Root of the `<root>/<suite>/<name>/` attachment tree
    pub files: Option<PathBuf>,
    /// Path to the TOML config file
    pub config: Option<PathBuf>,
    pub build_name: Option<String>,
    pub build_desc: Option<String>,
    pub build_result: Option<String>,
    pub build_reason: Option<String>,
}

impl LaunchSettings {
    /// Parse settings from argument tokens.
    ///
    /// Only tokens of the form `key=value` with a recognised key are used. The
    /// value is everything after the first `=` and may be empty. A later token
    /// for the same key replaces an earlier one.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut settings = Self::default();

        for token in tokens {
            let Some((key, value)) = token.as_ref().split_once('=') else {
                continue;
            };
            let value = value.to_string();

            match key {
                TARGET_KEY => settings.target = Some(value),
                FILES_KEY => settings.files = Some(PathBuf::from(value)),
                CONFIG_KEY => settings.config = Some(PathBuf::from(value)),
                BUILD_NAME_KEY => settings.build_name = Some(value),
                BUILD_DESC_KEY => settings.build_desc = Some(value),
                BUILD_RESULT_KEY => settings.build_result = Some(value),
                BUILD_REASON_KEY => settings.build_reason = Some(value),
                _ => {}
            }
        }

        settings
    }

    /// True when a destination target was supplied
    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }
}
