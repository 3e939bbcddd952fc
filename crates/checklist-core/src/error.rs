use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("remote not configured: run 'checklist config set-remote <URL>' first")]
    RemoteNotConfigured,

    #[error("checklist is not loaded yet")]
    NotReady,

    #[error("invalid checklist document: {0}")]
    InvalidDocument(String),

    #[error("invalid identity '{0}': must be alphanumeric with '.', '_' or '-'")]
    InvalidIdentity(String),

    #[error("not signed in: remote sync requires an identity")]
    NoIdentity,

    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("remote store returned {status}: {message}")]
    RemoteBackend { status: u16, message: String },

    #[error("malformed remote payload: {0}")]
    RemoteMalformed(String),

    #[error("record database error: {0}")]
    RecordDb(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ChecklistError {
    /// True for remote failures where the backend answered but the record
    /// could not be used, as opposed to the backend being unreachable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ChecklistError::RemoteMalformed(_))
    }
}

pub type Result<T> = std::result::Result<T, ChecklistError>;
