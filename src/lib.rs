#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
//! A minimal asynchronous HTTP(S) client.
//!
//! [`WebClient`] joins relative request urls onto a base url, fills in a default
//! method, optionally routes every call through a [`Limiter`] and buffers each
//! response body completely before handing back a [`Response`].

pub mod http_handler;
pub mod logger;

pub use http_handler::{
    common::{TransportError, TypeError},
    http_method::HTTPMethod,
    http_request::{RequestOptions, ResolvedRequestOptions, TransportOptions},
    http_response::{HeaderValue, Headers, InternalResponse, Response, Trailers},
    limiter::{ConcurrencyLimiter, IntervalLimiter, Limiter},
    transport::{HTTPTransport, SharedTransport, Transport},
    web_client::{PendingResponse, WebClient, WebClientOptions},
};
