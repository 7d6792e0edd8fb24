//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled job settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the background scheduler runs in this process.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the reservation auto-close sweep.
    #[serde(default = "default_auto_close_cron")]
    pub auto_close_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_close_cron: default_auto_close_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_auto_close_cron() -> String {
    // Every 10 minutes.
    "0 */10 * * * *".to_string()
}
