use std::time::Duration;

use crate::domain::models::SiteProfile;

#[derive(Debug, Clone)]
pub enum Command {
    LoadSites,
    SaveSite(SiteProfile),
    DeleteSite(String),
    /// Arm the hover-preview debounce timer. The runtime sleeps for `delay`
    /// and sends `Action::PaletteHoverElapsed(generation)` back; at most one
    /// such timer is live per palette session.
    SchedulePreview { generation: u64, delay: Duration },
}
