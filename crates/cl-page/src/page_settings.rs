use std::time::Duration;

use cl_config::PageConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub status_dismiss: Duration,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::from(&PageConfig::default())
    }
}

impl From<&PageConfig> for PageSettings {
    fn from(config: &PageConfig) -> Self {
        Self {
            status_dismiss: config.status_dismiss(),
        }
    }
}
