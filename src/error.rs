/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum MediNetError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code, with the message extracted from the
    /// portal's error envelope (or the generic fallback text).
    #[error("api error {status}: {message}")]
    Api {
        status: u16,
        /// Server-supplied `error` field, or the fallback message when the
        /// body carried none.
        message: String,
    },
    /// Response decoding or payload-shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
    /// Credential context could not be assembled (missing or empty value).
    #[error("credential error: {0}")]
    Credentials(String),
}

impl MediNetError {
    /// Human-readable message of a terminal failure, as handed to the
    /// banner layer.
    pub fn message(&self) -> String {
        match self {
            Self::Transport(err) => err.to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Decode(message) => message.clone(),
            Self::Credentials(message) => message.clone(),
        }
    }
}
