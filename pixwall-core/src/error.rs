use std::{error, fmt, io};

#[derive(Debug)]
pub enum Error {
    NetworkError(String),
    ParseError(String),
    StorageReadError(String),
    StorageWriteError(String),
    PermissionError(String),
    ConfigError(String),
    IoError(io::Error),
}

/// How an error should reach the user.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Severity {
    /// Shown in place of the result list.
    Inline,
    /// Logged only.
    Silent,
    /// Blocking alert.
    Alert,
}

impl Error {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NetworkError(_) | Self::ParseError(_) => Severity::Inline,
            Self::StorageReadError(_) | Self::StorageWriteError(_) => Severity::Silent,
            Self::PermissionError(_) | Self::ConfigError(_) | Self::IoError(_) => Severity::Alert,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionError(_))
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkError(err) => write!(f, "Network error: {err}"),
            Self::ParseError(err) => write!(f, "Malformed response: {err}"),
            Self::StorageReadError(err) => write!(f, "Failed to read storage: {err}"),
            Self::StorageWriteError(err) => write!(f, "Failed to write storage: {err}"),
            Self::PermissionError(err) => write!(f, "Permission denied: {err}"),
            Self::ConfigError(err) => write!(f, "Invalid configuration: {err}"),
            Self::IoError(err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Error::PermissionError(err.to_string())
        } else {
            Error::IoError(err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_io_becomes_permission_error() {
        let err = Error::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(err.is_permission_denied());
        assert_eq!(err.severity(), Severity::Alert);
    }

    #[test]
    fn other_io_stays_io() {
        let err = Error::from(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn storage_errors_are_silent() {
        assert_eq!(
            Error::StorageReadError("corrupt".into()).severity(),
            Severity::Silent
        );
        assert_eq!(
            Error::StorageWriteError("disk full".into()).severity(),
            Severity::Silent
        );
    }

    #[test]
    fn json_errors_are_parse_errors() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = Error::from(err);
        assert!(matches!(err, Error::ParseError(_)));
        assert_eq!(err.severity(), Severity::Inline);
    }
}
