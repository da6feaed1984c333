use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Bad flags or missing settings. Nothing has been touched yet.
    #[error("{0}")]
    Config(String),

    /// Store, recognition service or filesystem failed.
    #[error("{0:#}")]
    Collaborator(#[from] anyhow::Error),
}

impl CliError {
    pub fn status(&self) -> u8 {
        match self {
            CliError::Config(_) => 2,
            CliError::Collaborator(_) => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_collaborator_message_keeps_chain() {
        let inner: anyhow::Result<()> = Err(anyhow::anyhow!("connection refused"));
        let err: CliError = inner.context("Failed to connect to Postgres").unwrap_err().into();

        assert_eq!(err.to_string(), "Failed to connect to Postgres: connection refused");
        assert_eq!(err.status(), 1);
    }

    #[test]
    fn test_config_exit_code() {
        let err = CliError::Config("--limit must be > 0".to_string());
        assert_eq!(err.status(), 2);
    }
}
