use crate::{Severity, StatusBanner};

use cl_core::{FieldSet, UserIdentity};

/// Everything the controller needs from the page it drives.
pub trait PageView: FieldSet {
    /// Save, load and reset buttons.
    fn set_controls_enabled(&self, enabled: bool);

    fn show_status(&self, banner: StatusBanner);

    /// Persistent line describing where data is synced.
    fn set_sync_info(&self, text: &str, severity: Severity);

    fn show_sign_in_prompt(&self);

    fn show_welcome(&self, identity: &UserIdentity);

    /// Blocking yes/no question.
    fn confirm(&self, prompt: &str) -> bool;
}
