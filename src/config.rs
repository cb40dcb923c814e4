//! # Configuration
//!
//! The editor's ambient configuration. There are no configuration files (a deliberate
//! limitation, not an oversight): `Config` is built once from fixed defaults at startup.

use std::time::Duration;

/// The editor's configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// The size of a tab, in columns. Must be > 0.
    pub(crate) tab_stop: usize,
    /// The number of confirmations needed before quitting, when changes have been made since the
    /// file was last opened or saved.
    pub(crate) quit_times: usize,
    /// The duration for which status messages are shown in the message bar.
    pub(crate) message_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self { tab_stop: 4, quit_times: 3, message_duration: Duration::from_secs(5) }
    }
}
