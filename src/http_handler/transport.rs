use super::common::TransportError;
use super::http_request::TransportOptions;
use super::http_response::{HeaderValue, Headers, InternalResponse, Trailers};
use async_trait::async_trait;
use http_body_util::BodyExt;
use std::sync::Arc;

/// One network round trip: send a request, buffer the whole response.
///
/// Implementations resolve exactly once. On error no partial response is returned.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the request.
    ///
    /// # Arguments
    /// * `url` – Absolute target url.
    /// * `options` – Per-request transport options (the method).
    /// * `body` – Written to the request before it is ended, if present.
    /// * `secure` – Selects the TLS path.
    async fn send(
        &self,
        url: String,
        options: TransportOptions,
        body: Option<String>,
        secure: bool,
    ) -> Result<InternalResponse, TransportError>;
}

/// A transport shared between a client, its limiter and its in-flight requests.
pub type SharedTransport = Arc<dyn Transport>;

/// The default [`Transport`], backed by `reqwest`.
///
/// Keeps one client for plain http and one restricted to https. No timeout is
/// set, redirects are never followed and bodies are never decompressed.
#[derive(Debug, Clone)]
pub struct HTTPTransport {
    /// Used when `secure` is `false`.
    plain: reqwest::Client,
    /// Used when `secure` is `true`, refuses anything but `https:`.
    secure: reqwest::Client,
}

impl HTTPTransport {
    /// Builds both underlying clients.
    ///
    /// # Errors
    /// Fails if the TLS backend cannot be initialised.
    pub fn try_new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            plain: Self::client_builder().build()?,
            secure: Self::client_builder().https_only(true).build()?,
        })
    }

    fn client_builder() -> reqwest::ClientBuilder {
        reqwest::Client::builder().redirect(reqwest::redirect::Policy::none())
    }

    fn client(&self, secure: bool) -> &reqwest::Client {
        if secure { &self.secure } else { &self.plain }
    }
}

impl Default for HTTPTransport {
    /// # Panics
    /// Panics if the TLS backend cannot be initialised, like `reqwest::Client::new`.
    fn default() -> Self {
        Self::try_new().expect("failed to initialise the TLS backend")
    }
}

#[async_trait]
impl Transport for HTTPTransport {
    async fn send(
        &self,
        url: String,
        options: TransportOptions,
        body: Option<String>,
        secure: bool,
    ) -> Result<InternalResponse, TransportError> {
        let mut request = self.client(secure).request(options.method.into(), url);
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send().await?;

        let status = response.status();
        let status_message = status_message(&response);
        let headers = collect_headers(response.headers());
        let mut body = reqwest::Body::from(response);

        let mut raw_data = Vec::new();
        let mut trailers = Trailers::new();
        while let Some(frame) = body.frame().await {
            match frame?.into_data() {
                Ok(chunk) => raw_data.extend_from_slice(&chunk),
                Err(frame) => {
                    if let Ok(trailer_map) = frame.into_trailers() {
                        trailers.extend(trailer_map.iter().map(|(name, value)| {
                            (name.to_string(), value.to_str().ok().map(str::to_owned))
                        }));
                    }
                }
            }
        }

        Ok(InternalResponse {
            headers,
            raw_data: String::from_utf8_lossy(&raw_data).into_owned(),
            status_code: status.as_u16(),
            status_message,
            trailers,
        })
    }
}

/// The reason phrase as sent by the server, the canonical one if it sent none.
fn status_message(response: &reqwest::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response.status().canonical_reason().unwrap_or_default().to_owned(),
    }
}

fn collect_headers(header_map: &http::HeaderMap) -> Headers {
    let mut headers = Headers::new();
    for (name, value) in header_map {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match headers.get_mut(name.as_str()) {
            Some(existing) => existing.push(value),
            None => {
                headers.insert(name.to_string(), HeaderValue::Single(value));
            }
        }
    }
    headers
}
