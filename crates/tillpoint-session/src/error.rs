/// Failures while establishing a client session.
///
/// The guard treats every variant the same way (not authenticated); the
/// distinction only reaches logs.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("identity request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("identity request returned status {0}")]
    Status(u16),
    #[error("identity response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}
