use thiserror::Error;

/// Numeric result codes reported to location listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    ConnectionError = 1,
    ServerError = 2,
    ParsingResponseError = 3,
    IoError = 4,
    WifiDisabled = 6,
    ThreadAlreadyRunning = 7,
    GenericError = 100,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

#[derive(Error, Debug, Clone)]
pub enum LocateError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Server rejected the request: {0}")]
    ParsingResponse(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("WiFi is disabled")]
    WifiDisabled,

    #[error("A position request is already in flight")]
    ThreadAlreadyRunning,

    #[error("No usable WiFi networks in scan results")]
    NoWifiSignal,

    #[error("Network access disabled for this request")]
    NetworkAccessDisabled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LocateError {
    /// Listener-facing code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            LocateError::Connection(_) => ErrorCode::ConnectionError,
            LocateError::Server(_) => ErrorCode::ServerError,
            LocateError::ParsingResponse(_) => ErrorCode::ParsingResponseError,
            LocateError::Io(_) => ErrorCode::IoError,
            LocateError::WifiDisabled => ErrorCode::WifiDisabled,
            LocateError::ThreadAlreadyRunning => ErrorCode::ThreadAlreadyRunning,
            LocateError::NoWifiSignal
            | LocateError::NetworkAccessDisabled
            | LocateError::Internal(_) => ErrorCode::GenericError,
        }
    }
}

pub type Result<T> = std::result::Result<T, LocateError>;
