use super::common::TransportError;
use super::http_request::TransportOptions;
use super::http_response::InternalResponse;
use super::transport::{SharedTransport, Transport};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::time::Instant;

/// Wraps a transport into a throttled equivalent.
///
/// The client applies the limiter once, when it is constructed, and uses the
/// returned transport for every request. Any
/// `Fn(SharedTransport) -> SharedTransport` closure is a limiter.
pub trait Limiter: Send + Sync {
    fn limit(&self, transport: SharedTransport) -> SharedTransport;
}

impl<F> Limiter for F
where
    F: Fn(SharedTransport) -> SharedTransport + Send + Sync,
{
    fn limit(&self, transport: SharedTransport) -> SharedTransport { self(transport) }
}

/// Caps the number of in-flight transport calls.
///
/// The cap is shared by every transport this limiter wraps, so clients created
/// through `extend` draw from the same pool of permits.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    permits: Arc<Semaphore>,
}

impl ConcurrencyLimiter {
    /// A `max_in_flight` of zero is treated as one.
    pub fn new(max_in_flight: usize) -> Self {
        Self { permits: Arc::new(Semaphore::new(max_in_flight.max(1))) }
    }

    pub fn available(&self) -> usize { self.permits.available_permits() }
}

impl Limiter for ConcurrencyLimiter {
    fn limit(&self, transport: SharedTransport) -> SharedTransport {
        Arc::new(ConcurrencyLimited { inner: transport, permits: Arc::clone(&self.permits) })
    }
}

struct ConcurrencyLimited {
    inner: SharedTransport,
    permits: Arc<Semaphore>,
}

#[async_trait]
impl Transport for ConcurrencyLimited {
    async fn send(
        &self,
        url: String,
        options: TransportOptions,
        body: Option<String>,
        secure: bool,
    ) -> Result<InternalResponse, TransportError> {
        let _permit = self.permits.acquire().await?;
        self.inner.send(url, options, body, secure).await
    }
}

/// Spaces out the start of successive transport calls by at least `interval`.
///
/// Slots are reserved in call order; waiting callers do not hold the lock.
#[derive(Debug, Clone)]
pub struct IntervalLimiter {
    interval: Duration,
    next_start: Arc<Mutex<Option<Instant>>>,
}

impl IntervalLimiter {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_start: Arc::new(Mutex::new(None)) }
    }

    /// Requests per second, converted to the equivalent interval.
    pub fn per_second(requests: u32) -> Self {
        Self::new(Duration::from_secs(1) / requests.max(1))
    }

    pub fn interval(&self) -> Duration { self.interval }
}

impl Limiter for IntervalLimiter {
    fn limit(&self, transport: SharedTransport) -> SharedTransport {
        Arc::new(IntervalLimited { inner: transport, limiter: self.clone() })
    }
}

struct IntervalLimited {
    inner: SharedTransport,
    limiter: IntervalLimiter,
}

impl IntervalLimited {
    async fn reserve_slot(&self) -> Instant {
        let mut next_start = self.limiter.next_start.lock().await;
        let now = Instant::now();
        let start = next_start.map_or(now, |next| next.max(now));
        *next_start = Some(start + self.limiter.interval);
        start
    }
}

#[async_trait]
impl Transport for IntervalLimited {
    async fn send(
        &self,
        url: String,
        options: TransportOptions,
        body: Option<String>,
        secure: bool,
    ) -> Result<InternalResponse, TransportError> {
        let start = self.reserve_slot().await;
        tokio::time::sleep_until(start).await;
        self.inner.send(url, options, body, secure).await
    }
}
