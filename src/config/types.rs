use serde::{Deserialize, Serialize};

use crate::report::Verbosity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Terse shows index and description only; verbose shows every field
    #[serde(default = "default_verbosity")]
    pub verbosity: Verbosity,

    /// Caption shown above (or on) the report
    #[serde(default = "default_title")]
    pub title: String,

    /// Present the report in a blocking dialog instead of on stdout
    /// (Windows only; ignored elsewhere)
    #[serde(default)]
    pub dialog: bool,
}

fn default_verbosity() -> Verbosity {
    Verbosity::Verbose
}

fn default_title() -> String {
    "devices".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbosity: default_verbosity(),
            title: default_title(),
            dialog: false,
        }
    }
}
