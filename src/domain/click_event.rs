//! Click event model for asynchronous click accounting.

use crate::domain::platform::Platform;

/// A resolved redirect waiting to be counted.
///
/// Sent from the redirect path to the background worker over a bounded
/// channel so the response never waits on the counter update.
///
/// # Usage Flow
///
/// 1. Created by [`crate::application::services::RedirectService`] after the target is chosen
/// 2. Offered to the channel with `try_send` (dropped when the queue is full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
    pub platform: Platform,
    pub user_agent: Option<String>,
}

impl ClickEvent {
    pub fn new(code: String, platform: Platform, user_agent: Option<&str>) -> Self {
        Self {
            code,
            platform,
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation_full() {
        let event = ClickEvent::new(
            "abc123".to_string(),
            Platform::Ios,
            Some("Mozilla/5.0 (iPhone)"),
        );

        assert_eq!(event.code, "abc123");
        assert_eq!(event.platform, Platform::Ios);
        assert_eq!(event.user_agent, Some("Mozilla/5.0 (iPhone)".to_string()));
    }

    #[test]
    fn test_click_event_creation_minimal() {
        let event = ClickEvent::new("xyz".to_string(), Platform::Unknown, None);

        assert_eq!(event.code, "xyz");
        assert_eq!(event.platform, Platform::Unknown);
        assert!(event.user_agent.is_none());
    }
}
