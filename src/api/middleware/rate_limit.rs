//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Requests per second replenished per client IP.
const PER_SECOND: u64 = 2;

/// Burst size per client IP. Verification and health probes do outbound
/// network I/O, so the burst is kept small.
const BURST_SIZE: u32 = 20;

/// Rate limiter keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 20 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Rate limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
/// falling back to the peer address.
///
/// Use only behind a trusted reverse proxy: clients can forge these headers.
pub fn proxied_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
