//! Redirect target composition.
//!
//! Pure functions turning a stored [`Link`] into the URL a given platform is
//! sent to. Nothing here performs I/O; the configuration they need arrives as
//! [`AppIdentity`] and the website base URL.

use serde::Serialize;
use url::{Url, form_urlencoded};

use crate::domain::entities::Link;
use crate::domain::platform::Platform;

const SCHEME_SEPARATOR: &str = "://";

/// Identity of the native app that short links open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    /// Custom URL scheme without `://`, e.g. `triiapp`.
    pub scheme: String,
    /// Path segment of universal links after which the in-app path starts.
    pub path_marker: String,
    /// Android application id used in intent URLs.
    pub android_package: String,
}

impl AppIdentity {
    /// Synthesizes the app-scheme deep link for a record.
    ///
    /// Resolution order:
    /// 1. explicit deep link with a scheme, returned unchanged
    /// 2. explicit deep link without a scheme, prefixed with the app scheme
    /// 3. the part of the universal link after the path marker, prefixed with the app scheme
    /// 4. `<scheme>://home`
    ///
    /// Empty strings count as absent.
    pub fn deep_link(&self, deep_link: Option<&str>, universal_link: Option<&str>) -> String {
        if let Some(explicit) = deep_link.filter(|d| !d.is_empty()) {
            if explicit.contains(SCHEME_SEPARATOR) {
                return explicit.to_string();
            }
            return self.with_scheme(explicit);
        }

        if let Some((_, path)) = universal_link
            .filter(|u| !u.is_empty())
            .and_then(|u| u.split_once(self.path_marker.as_str()))
        {
            return self.with_scheme(path);
        }

        self.with_scheme("home")
    }

    /// Builds an Android intent URL that opens `deep_link` in the app and
    /// falls back to `fallback_url` in the browser.
    ///
    /// The intent scheme is the deep link's own scheme, or the app scheme when
    /// the deep link has none. The fallback is percent-encoded so that `;`
    /// and `#` inside it cannot end the intent fragment early.
    pub fn intent_url(&self, deep_link: &str, fallback_url: &str) -> String {
        let (scheme, rest) = match deep_link.split_once(SCHEME_SEPARATOR) {
            Some((scheme, rest)) => (scheme, rest),
            None => (self.scheme.as_str(), deep_link),
        };

        let fallback: String = form_urlencoded::byte_serialize(fallback_url.as_bytes()).collect();

        format!(
            "intent://{rest}#Intent;scheme={scheme};package={package};S.browser_fallback_url={fallback};end",
            package = self.android_package,
        )
    }

    fn with_scheme(&self, path: &str) -> String {
        format!("{}{}{}", self.scheme, SCHEME_SEPARATOR, path)
    }
}

/// Builds the desktop redirect: the website base with the universal link's
/// query string copied verbatim.
///
/// Path and host of the universal link are discarded. Any query already on
/// the website URL is replaced; a fragment on it is kept. When the universal
/// link is missing or cannot be parsed the website URL is returned as is.
pub fn desktop_redirect_url(website_url: &str, universal_link: Option<&str>) -> String {
    let Some(query) = universal_link
        .and_then(|u| Url::parse(u).ok())
        .and_then(|u| u.query().map(str::to_owned))
    else {
        return website_url.to_string();
    };

    let (before_fragment, fragment) = match website_url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (website_url, None),
    };
    let base = before_fragment
        .split_once('?')
        .map_or(before_fragment, |(base, _)| base);

    let mut target = base.to_string();
    if !query.is_empty() {
        target.push('?');
        target.push_str(&query);
    }
    if let Some(fragment) = fragment {
        target.push('#');
        target.push_str(fragment);
    }
    target
}

/// Outcome of target selection for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectDecision {
    pub platform: Platform,
    pub location: String,
}

/// Chooses the redirect target for `platform`.
///
/// Universal links come first on mobile because the OS opens them in the app
/// when it is installed:
///
/// - iOS: universal link, else the App Store URL
/// - Android: universal link, else an intent URL for the explicit deep link
///   with the Play Store as fallback, else the Play Store URL
/// - unknown: the website with the universal link's query parameters
pub fn select_target(
    link: &Link,
    platform: Platform,
    app: &AppIdentity,
    website_url: &str,
) -> RedirectDecision {
    let universal = link.universal_link().filter(|u| !u.is_empty());

    let location = match platform {
        Platform::Ios => universal.unwrap_or(link.ios_store.as_str()).to_string(),
        Platform::Android => match (universal, link.deep_link().filter(|d| !d.is_empty())) {
            (Some(universal), _) => universal.to_string(),
            (None, Some(deep_link)) => app.intent_url(deep_link, &link.android_store),
            (None, None) => link.android_store.clone(),
        },
        Platform::Unknown => desktop_redirect_url(website_url, universal),
    };

    RedirectDecision { platform, location }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn trii() -> AppIdentity {
        AppIdentity {
            scheme: "triiapp".to_string(),
            path_marker: "/app/".to_string(),
            android_package: "com.triico.app".to_string(),
        }
    }

    fn link(universal: Option<&str>, deep: Option<&str>) -> Link {
        let now = Utc::now();
        Link {
            id: "abc123".to_string(),
            universal_link: universal.map(str::to_string),
            deep_link: deep.map(str::to_string),
            ios_store: "https://apps.apple.com/app/id1".to_string(),
            android_store: "https://play.google.com/store/apps/details?id=com.triico.app&hl=en"
                .to_string(),
            title: None,
            description: None,
            created_at: now,
            updated_at: now,
            click_count: 0,
        }
    }

    #[test]
    fn test_deep_link_with_scheme_is_unchanged() {
        assert_eq!(
            trii().deep_link(Some("myapp://product?id=1"), None),
            "myapp://product?id=1"
        );
    }

    #[test]
    fn test_deep_link_without_scheme_gets_app_scheme() {
        assert_eq!(
            trii().deep_link(Some("product?id=1"), None),
            "triiapp://product?id=1"
        );
    }

    #[test]
    fn test_deep_link_derived_from_universal_link() {
        assert_eq!(
            trii().deep_link(Some(""), Some("https://x.co/app/product?id=987")),
            "triiapp://product?id=987"
        );
        assert_eq!(
            trii().deep_link(None, Some("https://x.co/app/product?id=987")),
            "triiapp://product?id=987"
        );
    }

    #[test]
    fn test_deep_link_explicit_wins_over_universal() {
        assert_eq!(
            trii().deep_link(Some("cart"), Some("https://x.co/app/product?id=987")),
            "triiapp://cart"
        );
    }

    #[test]
    fn test_deep_link_home_fallback() {
        assert_eq!(trii().deep_link(Some(""), Some("")), "triiapp://home");
        assert_eq!(trii().deep_link(None, None), "triiapp://home");
        assert_eq!(
            trii().deep_link(None, Some("https://x.co/promo?id=1")),
            "triiapp://home"
        );
    }

    #[test]
    fn test_deep_link_takes_everything_after_first_marker() {
        assert_eq!(
            trii().deep_link(None, Some("https://x.co/app/a/app/b")),
            "triiapp://a/app/b"
        );
    }

    #[test]
    fn test_desktop_redirect_copies_query() {
        assert_eq!(
            desktop_redirect_url("https://trii.co", Some("https://x.co/app/p?id=987&x=1")),
            "https://trii.co?id=987&x=1"
        );
    }

    #[test]
    fn test_desktop_redirect_replaces_existing_query() {
        assert_eq!(
            desktop_redirect_url("https://trii.co/landing?ref=old", Some("https://x.co/p?id=5")),
            "https://trii.co/landing?id=5"
        );
    }

    #[test]
    fn test_desktop_redirect_keeps_fragment() {
        assert_eq!(
            desktop_redirect_url("https://trii.co/#download", Some("https://x.co/p?id=5")),
            "https://trii.co/?id=5#download"
        );
    }

    #[test]
    fn test_desktop_redirect_without_query_or_link() {
        assert_eq!(
            desktop_redirect_url("https://trii.co", Some("https://x.co/app/p")),
            "https://trii.co"
        );
        assert_eq!(desktop_redirect_url("https://trii.co", None), "https://trii.co");
        assert_eq!(
            desktop_redirect_url("https://trii.co", Some("not a url")),
            "https://trii.co"
        );
    }

    #[test]
    fn test_intent_url() {
        let url = trii().intent_url("triiapp://product?id=1", "https://play.google.com/store");
        assert_eq!(
            url,
            "intent://product?id=1#Intent;scheme=triiapp;package=com.triico.app;\
             S.browser_fallback_url=https%3A%2F%2Fplay.google.com%2Fstore;end"
        );
    }

    #[test]
    fn test_intent_url_without_scheme_uses_app_scheme() {
        let url = trii().intent_url("product", "https://p.co");
        assert!(url.starts_with("intent://product#Intent;scheme=triiapp;"));
        assert!(url.ends_with(";end"));
    }

    #[test]
    fn test_intent_url_keeps_foreign_scheme() {
        let url = trii().intent_url("other://x", "https://p.co");
        assert!(url.contains("scheme=other;"));
    }

    #[test]
    fn test_select_ios() {
        let app = trii();
        let with_universal = link(Some("https://x.co/app/p?id=1"), None);
        assert_eq!(
            select_target(&with_universal, Platform::Ios, &app, "https://trii.co").location,
            "https://x.co/app/p?id=1"
        );

        let deep_only = link(None, Some("product"));
        assert_eq!(
            select_target(&deep_only, Platform::Ios, &app, "https://trii.co").location,
            "https://apps.apple.com/app/id1"
        );
    }

    #[test]
    fn test_select_android() {
        let app = trii();
        let with_universal = link(Some("https://x.co/app/p?id=1"), Some("product"));
        assert_eq!(
            select_target(&with_universal, Platform::Android, &app, "https://trii.co").location,
            "https://x.co/app/p?id=1"
        );

        let deep_only = link(None, Some("product?id=1"));
        let decision = select_target(&deep_only, Platform::Android, &app, "https://trii.co");
        assert!(decision.location.starts_with("intent://product?id=1#Intent;"));
        assert!(decision.location.contains("package=com.triico.app"));

        let neither = link(None, None);
        assert_eq!(
            select_target(&neither, Platform::Android, &app, "https://trii.co").location,
            neither.android_store
        );
    }

    #[test]
    fn test_select_unknown() {
        let app = trii();
        let with_universal = link(Some("https://x.co/app/p?id=987&x=1"), None);
        let decision = select_target(&with_universal, Platform::Unknown, &app, "https://trii.co");
        assert_eq!(decision.platform, Platform::Unknown);
        assert_eq!(decision.location, "https://trii.co?id=987&x=1");

        let deep_only = link(None, Some("product"));
        assert_eq!(
            select_target(&deep_only, Platform::Unknown, &app, "https://trii.co").location,
            "https://trii.co"
        );
    }
}
