use strum::{AsRefStr, Display, EnumString};

/// The HTTP verbs understood by the [`WebClient`](super::web_client::WebClient).
///
/// Displays as the uppercase verb, e.g. `GET`. Parsing is case-insensitive.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HTTPMethod {
    Connect,
    Delete,
    #[default]
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

impl HTTPMethod {
    /// Every supported verb, in alphabetical order.
    pub const ALL: [HTTPMethod; 9] = [
        HTTPMethod::Connect,
        HTTPMethod::Delete,
        HTTPMethod::Get,
        HTTPMethod::Head,
        HTTPMethod::Options,
        HTTPMethod::Patch,
        HTTPMethod::Post,
        HTTPMethod::Put,
        HTTPMethod::Trace,
    ];
}

impl From<HTTPMethod> for reqwest::Method {
    fn from(value: HTTPMethod) -> Self {
        match value {
            HTTPMethod::Connect => reqwest::Method::CONNECT,
            HTTPMethod::Delete => reqwest::Method::DELETE,
            HTTPMethod::Get => reqwest::Method::GET,
            HTTPMethod::Head => reqwest::Method::HEAD,
            HTTPMethod::Options => reqwest::Method::OPTIONS,
            HTTPMethod::Patch => reqwest::Method::PATCH,
            HTTPMethod::Post => reqwest::Method::POST,
            HTTPMethod::Put => reqwest::Method::PUT,
            HTTPMethod::Trace => reqwest::Method::TRACE,
        }
    }
}
