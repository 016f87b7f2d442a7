pub mod action_latch;
pub mod bootstrap;
pub mod controller;
pub mod error;
pub mod logger;
pub mod page_settings;
pub mod page_state;
pub mod page_view;
pub mod provider_status;
pub mod reports;
pub mod status_banner;

pub use action_latch::{ActionLatch, LatchGuard};
pub use bootstrap::{build_controller, open_store};
pub use controller::{PageController, RESET_PROMPT};
pub use error::{PageError, Result};
pub use page_settings::PageSettings;
pub use page_state::PageState;
pub use page_view::PageView;
pub use provider_status::ProviderStatus;
pub use reports::{LoadReport, RecordSource, RecoveryReport, ResetOutcome, SaveReport};
pub use status_banner::{Severity, StatusBanner};

#[cfg(test)]
mod tests;
