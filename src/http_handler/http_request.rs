use super::http_method::HTTPMethod;

/// Per-call options passed to [`WebClient::request`](super::web_client::WebClient::request).
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// The verb to use. Falls back to the client's default method when `None`.
    #[serde(default)]
    pub method: Option<HTTPMethod>,
    /// Absolute (`http:`/`https:`) or relative to the client's base url.
    pub url: String,
}

impl RequestOptions {
    pub fn new(url: impl Into<String>) -> Self { Self { method: None, url: url.into() } }

    #[must_use]
    pub fn with_method(mut self, method: HTTPMethod) -> Self {
        self.method = Some(method);
        self
    }
}

impl From<&str> for RequestOptions {
    fn from(url: &str) -> Self { Self::new(url) }
}

impl From<String> for RequestOptions {
    fn from(url: String) -> Self { Self::new(url) }
}

/// Request options after defaults were filled in and the url was made absolute.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequestOptions {
    method: HTTPMethod,
    url: String,
}

impl ResolvedRequestOptions {
    pub(crate) fn new(method: HTTPMethod, url: String) -> Self { Self { method, url } }

    pub fn method(&self) -> HTTPMethod { self.method }
    /// Always carries an `http:` or `https:` scheme.
    pub fn url(&self) -> &str { &self.url }
}

/// Options handed to a [`Transport`](super::transport::Transport) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    pub method: HTTPMethod,
}
