pub use reqwest;
pub use serde;

pub mod common;
pub mod http_method;
pub mod http_request;
pub mod http_response;
pub mod limiter;
pub mod transport;
pub mod web_client;
