use strum::Display;

/// Configuration errors, raised synchronously while building a client or
/// resolving a request url. Never retried.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TypeError {
    #[strum(to_string = "baseUrl doesn't include a protocol")]
    BaseUrlWithoutProtocol,
    #[strum(to_string = "url doesn't include a protocol and baseUrl isn't set")]
    UrlWithoutProtocol,
}

impl std::error::Error for TypeError {}

/// Whatever the underlying transport failed with.
///
/// The client hands it back to the caller exactly as the transport produced it.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;
