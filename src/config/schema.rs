use serde::{Deserialize, Serialize};

use crate::report::DEFAULT_TITLE;
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Page title of the HTML report (default: "Player Analysis")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Config {
    pub fn title(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|r| r.title.as_deref())
            .unwrap_or(DEFAULT_TITLE)
    }
}
