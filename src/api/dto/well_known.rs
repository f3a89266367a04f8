//! DTOs for the generated `.well-known` association files.

use serde::Serialize;

use crate::config::WellKnownSettings;

/// One statement of Android's Digital Asset Links file.
#[derive(Debug, Serialize)]
pub struct AssetLinkStatement {
    pub relation: Vec<&'static str>,
    pub target: AssetLinkTarget,
}

#[derive(Debug, Serialize)]
pub struct AssetLinkTarget {
    pub namespace: String,
    pub package_name: String,
    pub sha256_cert_fingerprints: Vec<String>,
}

impl AssetLinkStatement {
    pub fn from_settings(settings: &WellKnownSettings) -> Self {
        Self {
            relation: vec!["delegate_permission/common.handle_all_urls"],
            target: AssetLinkTarget {
                namespace: settings.app_name.clone(),
                package_name: settings.android_package.clone(),
                sha256_cert_fingerprints: settings.android_sha256_fingerprints.clone(),
            },
        }
    }
}

/// Apple's `apple-app-site-association` document.
#[derive(Debug, Serialize)]
pub struct AppleAppSiteAssociation {
    pub applinks: AppLinks,
}

#[derive(Debug, Serialize)]
pub struct AppLinks {
    pub apps: Vec<String>,
    pub details: Vec<AppLinkDetail>,
}

#[derive(Debug, Serialize)]
pub struct AppLinkDetail {
    #[serde(rename = "appID")]
    pub app_id: String,
    pub paths: Vec<&'static str>,
}

impl AppleAppSiteAssociation {
    pub fn from_settings(settings: &WellKnownSettings) -> Self {
        Self {
            applinks: AppLinks {
                apps: Vec::new(),
                details: vec![AppLinkDetail {
                    app_id: settings.ios_app_id.clone(),
                    paths: vec!["*"],
                }],
            },
        }
    }
}
