//! Client platform classification from the `User-Agent` header.

use serde::Serialize;
use std::fmt;

/// Platform a redirect is served for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Unknown,
}

const IOS_MARKERS: &[&str] = &["iphone", "ipad", "ipod"];
const ANDROID_MARKER: &str = "android";

impl Platform {
    /// Classifies a user agent with a case-insensitive substring match.
    ///
    /// iOS markers are checked before Android; anything else (desktop
    /// browsers, bots, empty strings) is [`Platform::Unknown`].
    ///
    /// ```
    /// use dynamic_links::domain::platform::Platform;
    ///
    /// assert_eq!(Platform::from_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"), Platform::Ios);
    /// assert_eq!(Platform::from_user_agent("Mozilla/5.0 (Linux; Android 11)"), Platform::Android);
    /// assert_eq!(Platform::from_user_agent("Mozilla/5.0 (Windows NT 10.0)"), Platform::Unknown);
    /// ```
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();

        if IOS_MARKERS.iter().any(|marker| ua.contains(marker)) {
            Platform::Ios
        } else if ua.contains(ANDROID_MARKER) {
            Platform::Android
        } else {
            Platform::Unknown
        }
    }

    /// Same as [`Platform::from_user_agent`], treating a missing header as unknown.
    pub fn detect(user_agent: Option<&str>) -> Self {
        user_agent.map_or(Platform::Unknown, Self::from_user_agent)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
