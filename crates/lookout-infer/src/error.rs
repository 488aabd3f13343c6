use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// The configured endpoint is not a usable http(s) URL.
    Config(String),
    /// Connect, timeout, or transport failure before a status was received.
    Network(String),
    /// The server answered with a non-2xx status.
    Server { status: u16 },
    /// The response body is not the expected prediction document.
    Parse(String),
    /// The blocking request task could not run to completion.
    Runtime(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::Config(msg) => write!(f, "config error: {msg}"),
            InferError::Network(msg) => write!(f, "network error: {msg}"),
            InferError::Server { status } => write!(f, "server error: status {status}"),
            InferError::Parse(msg) => write!(f, "parse error: {msg}"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<url::ParseError> for InferError {
    fn from(err: url::ParseError) -> Self {
        InferError::Config(err.to_string())
    }
}
