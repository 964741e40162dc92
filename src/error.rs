use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwayFocusError {
    #[error("{0}")]
    Error(String),

    #[error("Connection to the window manager lost: {0}")]
    ConnectionLost(String),

    #[error("No IPC socket found (SWAYSOCK and I3SOCK are unset)")]
    NoSocket,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl SwayFocusError {
    pub fn new<S: ToString>(err: S) -> Self {
        SwayFocusError::Error(err.to_string())
    }

    /// Whether the error means the IPC connection can no longer be used.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SwayFocusError::ConnectionLost(_) | SwayFocusError::Io(_) | SwayFocusError::NoSocket
        )
    }
}

impl From<swayipc::Error> for SwayFocusError {
    fn from(err: swayipc::Error) -> Self {
        match err {
            // Every IO error swayipc reports comes from the socket itself.
            swayipc::Error::Io(e) => SwayFocusError::ConnectionLost(e.to_string()),
            swayipc::Error::SerdeJson(e) => SwayFocusError::Json(e),
            swayipc::Error::CommandFailed(msg) => SwayFocusError::CommandFailed(msg),
            other => SwayFocusError::Protocol(other.to_string()),
        }
    }
}

pub type SwayFocusResult<T> = Result<T, SwayFocusError>;
