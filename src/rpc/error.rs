use thiserror::Error;

/// Failure of a single remote method call.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request never produced a response (connect, TLS, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response without a recognizable server exception.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend raised an exception while handling the call.
    #[error("{exc_type}: {message}")]
    Server {
        status: u16,
        exc_type: String,
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response envelope carried no `message` member.
    #[error("response contained no message")]
    MissingMessage,

    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid header value for {0}")]
    Header(&'static str),

    #[error("cannot build URL for method {0}")]
    Url(String),
}
