//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::NodeId;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("item not found: {0}")]
    NotFound(NodeId),

    #[error("{0}")]
    Usage(String),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Io(_) => crate::exitcode::IOERR,
            CliError::NotFound(_) => crate::exitcode::NOT_FOUND,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) | ApplicationError::InvalidInput { .. } => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_error_kinds_when_mapping_then_sysexits_codes() {
        let cycle = CliError::from(ApplicationError::from(DomainError::CycleDetected(NodeId::from(2))));
        assert_eq!(cycle.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(
            CliError::from(ApplicationError::invalid_input("x")).exit_code(),
            crate::exitcode::DATAERR
        );
        assert_eq!(CliError::NotFound(NodeId::from(9)).exit_code(), crate::exitcode::NOT_FOUND);
        assert_eq!(CliError::Usage("x".into()).exit_code(), crate::exitcode::USAGE);
        let closed = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(CliError::from(closed).exit_code(), crate::exitcode::IOERR);
    }
}
