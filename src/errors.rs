use std::result::Result as StdResult;

use cuentas_config::ConfigError;
use cuentas_core::CoreError;
use thiserror::Error;

/// Unified error type for the session layer.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// True when the error came from rejected user input rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Core(CoreError::Validation(_)))
    }
}

pub type Result<T> = StdResult<T, AppError>;
