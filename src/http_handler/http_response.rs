use super::http_request::ResolvedRequestOptions;
use std::collections::HashMap;

/// A response header value. Headers received more than once keep every value.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// Appends another occurrence of the same header.
    pub(crate) fn push(&mut self, value: String) {
        match self {
            HeaderValue::Single(first) => {
                *self = HeaderValue::Multiple(vec![std::mem::take(first), value]);
            }
            HeaderValue::Multiple(values) => values.push(value),
        }
    }

    /// The first received value.
    pub fn first(&self) -> Option<&str> {
        match self {
            HeaderValue::Single(v) => Some(v),
            HeaderValue::Multiple(values) => values.first().map(String::as_str),
        }
    }
}

/// Header names are lowercase.
pub type Headers = HashMap<String, HeaderValue>;
pub type Trailers = HashMap<String, Option<String>>;

/// The raw, fully buffered result of one transport call.
#[derive(serde::Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InternalResponse {
    pub headers: Headers,
    /// The complete response body as received, without any decoding by content type.
    pub raw_data: String,
    pub status_code: u16,
    pub status_message: String,
    pub trailers: Trailers,
}

/// A completed request: the transport result together with the options that produced it.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Response {
    #[serde(flatten)]
    inner: InternalResponse,
    request_options: ResolvedRequestOptions,
}

impl Response {
    pub(crate) fn new(inner: InternalResponse, request_options: ResolvedRequestOptions) -> Self {
        Self { inner, request_options }
    }

    pub fn headers(&self) -> &Headers { &self.inner.headers }
    /// Case-insensitive single header lookup.
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.inner.headers.get(&name.to_ascii_lowercase())
    }
    pub fn raw_data(&self) -> &str { &self.inner.raw_data }
    pub fn status_code(&self) -> u16 { self.inner.status_code }
    pub fn status_message(&self) -> &str { &self.inner.status_message }
    pub fn trailers(&self) -> &Trailers { &self.inner.trailers }
    pub fn request_options(&self) -> &ResolvedRequestOptions { &self.request_options }

    /// `true` for any 2xx status code.
    pub fn is_success(&self) -> bool { (200..300).contains(&self.inner.status_code) }

    /// Gives up the response, keeping only the body.
    pub fn into_raw_data(self) -> String { self.inner.raw_data }
}
