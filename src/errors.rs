use thiserror::Error;

use lifedash_config::ConfigError;
use lifedash_core::CoreError;

/// Error type surfaced by the dashboard layer.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to load dashboard data: {0}. Please verify the backend setup and try again.")]
    LoadFailed(String),
}
