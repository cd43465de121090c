/// Error kinds surfaced by the simulation core.
///
/// The HTTP adapter maps each variant to a status code and a `{code,
/// message}` JSON body; nothing below this type knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("map not found: {0}")]
    MapNotFound(String),

    #[error("user name must not be empty")]
    InvalidName,

    #[error("missing or malformed Authorization header")]
    InvalidToken,

    #[error("token is not bound to a live player")]
    UnknownToken,

    #[error("unrecognized move command: {0:?}")]
    InvalidAction(String),

    #[error("malformed request body: {0}")]
    ParseError(String),

    #[error("snapshot references a dog that no longer exists: {0}")]
    RestoreError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl Error {
    /// The wire-level error code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::MapNotFound(_) => "mapNotFound",
            Error::InvalidName => "invalidArgument",
            Error::InvalidToken => "invalidToken",
            Error::UnknownToken => "unknownToken",
            Error::InvalidAction(_) => "invalidArgument",
            Error::ParseError(_) => "invalidArgument",
            Error::RestoreError(_) => "restoreError",
            Error::InternalError(_) => "internalError",
        }
    }
}
