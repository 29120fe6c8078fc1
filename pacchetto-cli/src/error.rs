//! CLI error type.

use std::fmt;

use pacchetto::PacchettoError;

/// Errors reported to the user before exiting with a non-zero status.
#[derive(Debug)]
pub enum CliError {
    /// Configuration or environment problem.
    Config(String),

    /// Locating, packaging or installing failed.
    Pacchetto(PacchettoError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Pacchetto(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::Pacchetto(e) => Some(e),
        }
    }
}

impl From<PacchettoError> for CliError {
    fn from(e: PacchettoError) -> Self {
        CliError::Pacchetto(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("no home directory".to_string());
        assert_eq!(err.to_string(), "Configuration error: no home directory");
    }

    #[test]
    fn test_from_library_error() {
        let err: CliError = PacchettoError::NotFound.into();
        assert!(matches!(err, CliError::Pacchetto(PacchettoError::NotFound)));
        assert_eq!(err.to_string(), "failed to locate Assetto Corsa directory");
    }
}
