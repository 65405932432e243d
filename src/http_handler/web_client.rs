use super::common::{TransportError, TypeError};
use super::http_method::HTTPMethod;
use super::http_request::{RequestOptions, ResolvedRequestOptions, TransportOptions};
use super::http_response::Response;
use super::limiter::Limiter;
use super::transport::{HTTPTransport, SharedTransport};
use crate::{event, warn};
use futures::FutureExt;
use futures::future::BoxFuture;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static PROTOCOL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?:").expect("valid protocol regex"));

/// The asynchronous half of [`WebClient::request`].
pub type PendingResponse = BoxFuture<'static, Result<Response, TransportError>>;

/// Configuration of a [`WebClient`].
///
/// Every field is optional. [`WebClient::extend`] merges a second set of
/// options on top, `Some` fields win.
#[derive(Clone, Default)]
pub struct WebClientOptions {
    /// Root url for relative request urls. Must start with `http:` or `https:`.
    pub base_url: Option<String>,
    /// Method used when a request does not name one. `GET` if unset.
    pub default_method: Option<HTTPMethod>,
    /// Applied once to the transport when the client is built.
    pub limiter: Option<Arc<dyn Limiter>>,
}

impl WebClientOptions {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_default_method(mut self, method: HTTPMethod) -> Self {
        self.default_method = Some(method);
        self
    }

    #[must_use]
    pub fn with_limiter(mut self, limiter: impl Limiter + 'static) -> Self {
        self.limiter = Some(Arc::new(limiter));
        self
    }

    /// Shallow merge, fields set in `overrides` replace the current ones.
    #[must_use]
    pub fn merged(&self, overrides: WebClientOptions) -> Self {
        Self {
            base_url: overrides.base_url.or_else(|| self.base_url.clone()),
            default_method: overrides.default_method.or(self.default_method),
            limiter: overrides.limiter.or_else(|| self.limiter.clone()),
        }
    }
}

impl std::fmt::Debug for WebClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebClientOptions")
            .field("base_url", &self.base_url)
            .field("default_method", &self.default_method)
            .field("limiter", &self.limiter.as_ref().map(|_| "<limiter>"))
            .finish()
    }
}

/// A small HTTP(S) client with a preconfigured base url and default method.
///
/// Each call to [`request`](Self::request) is one independent round trip with
/// the whole body buffered in memory. Cloning is cheap and clones share the
/// transport.
#[derive(Clone)]
pub struct WebClient {
    options: WebClientOptions,
    /// The transport before the limiter was applied, reused by `extend`.
    base_transport: SharedTransport,
    /// The transport every request goes through.
    transport: SharedTransport,
}

impl WebClient {
    /// Constructs a new `WebClient` on top of the default [`HTTPTransport`].
    ///
    /// # Errors
    /// [`TypeError::BaseUrlWithoutProtocol`] if `base_url` is set without an
    /// `http:`/`https:` scheme.
    ///
    /// # Panics
    /// Panics if the TLS backend cannot be initialised, see [`HTTPTransport::default`].
    /// Use [`with_transport`](Self::with_transport) with [`HTTPTransport::try_new`]
    /// to handle that case.
    pub fn new(options: WebClientOptions) -> Result<Self, TypeError> {
        Self::with_transport(options, Arc::new(HTTPTransport::default()))
    }

    /// Like [`new`](Self::new), with an explicit base transport.
    ///
    /// # Errors
    /// See [`new`](Self::new).
    pub fn with_transport(
        options: WebClientOptions,
        base_transport: SharedTransport,
    ) -> Result<Self, TypeError> {
        if options.base_url.as_deref().is_some_and(|base_url| !has_protocol(base_url)) {
            return Err(TypeError::BaseUrlWithoutProtocol);
        }
        let transport = match &options.limiter {
            Some(limiter) => limiter.limit(Arc::clone(&base_transport)),
            None => Arc::clone(&base_transport),
        };
        Ok(Self { options, base_transport, transport })
    }

    /// Builds a new client from this client's options merged with `overrides`.
    ///
    /// Validation and limiter wrapping run again on the merged options. `self`
    /// is left untouched.
    ///
    /// # Errors
    /// See [`new`](Self::new).
    pub fn extend(&self, overrides: WebClientOptions) -> Result<Self, TypeError> {
        Self::with_transport(self.options.merged(overrides), Arc::clone(&self.base_transport))
    }

    pub fn options(&self) -> &WebClientOptions { &self.options }
    pub fn base_url(&self) -> Option<&str> { self.options.base_url.as_deref() }
    pub fn default_method(&self) -> HTTPMethod { self.options.default_method.unwrap_or_default() }

    /// Fills in the default method and turns the url into an absolute one.
    ///
    /// # Errors
    /// [`TypeError::UrlWithoutProtocol`] for a relative url on a client without base url.
    pub fn resolve(&self, options: RequestOptions) -> Result<ResolvedRequestOptions, TypeError> {
        let method = options.method.unwrap_or_else(|| self.default_method());
        let url = if has_protocol(&options.url) {
            options.url
        } else {
            let base_url = self.base_url().ok_or(TypeError::UrlWithoutProtocol)?;
            join_url(base_url, &options.url)
        };
        Ok(ResolvedRequestOptions::new(method, url))
    }

    /// Issues one request.
    ///
    /// Configuration problems are reported immediately through the outer
    /// `Result`. The returned future resolves with the buffered response or
    /// with the transport's error, untouched. Nothing is retried.
    ///
    /// # Errors
    /// See [`resolve`](Self::resolve).
    pub fn request(
        &self,
        options: impl Into<RequestOptions>,
    ) -> Result<PendingResponse, TypeError> {
        let resolved = self.resolve(options.into())?;
        let secure = is_secure(resolved.url());
        let transport = Arc::clone(&self.transport);
        event!("{} {}", resolved.method(), resolved.url());

        Ok(async move {
            let transport_options = TransportOptions { method: resolved.method() };
            match transport.send(resolved.url().to_owned(), transport_options, None, secure).await {
                Ok(inner) => {
                    event!(
                        "{} {} -> {} {}",
                        resolved.method(),
                        resolved.url(),
                        inner.status_code,
                        inner.status_message
                    );
                    Ok(Response::new(inner, resolved))
                }
                Err(err) => {
                    warn!("{} {} failed: {err}", resolved.method(), resolved.url());
                    Err(err)
                }
            }
        }
        .boxed())
    }
}

impl std::fmt::Debug for WebClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebClient").field("options", &self.options).finish_non_exhaustive()
    }
}

pub(crate) fn has_protocol(url: &str) -> bool { PROTOCOL_REGEX.is_match(url) }

pub(crate) fn is_secure(url: &str) -> bool { url.starts_with("https:") }

/// Joins with exactly one slash, whatever slashes either side brings.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
