//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket parameters for one group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Public endpoints: 2 requests per second, bursts of 100.
pub const PUBLIC: Limits = Limits {
    per_second: 2,
    burst_size: 100,
};

/// Admin endpoints: 1 request per second, bursts of 10.
pub const SECURE: Limits = Limits {
    per_second: 1,
    burst_size: 10,
};

/// Wraps `router` in a per-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// - `behind_proxy = false`: the socket peer address (requires
///   `into_make_service_with_connect_info`)
/// - `behind_proxy = true`: `X-Forwarded-For`, `X-Real-IP` or `Forwarded`,
///   falling back to the peer address
///
/// # Example
///
/// ```rust,ignore
/// let admin = rate_limit::apply(admin_routes, rate_limit::SECURE, behind_proxy);
/// ```
pub fn apply<S>(router: Router<S>, limits: Limits, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        let governor_conf = GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(limits.per_second)
            .burst_size(limits.burst_size)
            .finish()
            .expect("rate limit constants are non-zero");

        router.layer(GovernorLayer::new(Arc::new(governor_conf)))
    } else {
        let governor_conf = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(limits.per_second)
            .burst_size(limits.burst_size)
            .finish()
            .expect("rate limit constants are non-zero");

        router.layer(GovernorLayer::new(Arc::new(governor_conf)))
    }
}
