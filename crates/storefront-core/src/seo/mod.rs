//! Search-engine output: page metadata, JSON-LD structured data and the web
//! app manifest.

pub mod jsonld;
pub mod manifest;
pub mod metadata;

pub use jsonld::{
    aggregate_rating_schema, breadcrumb_schema, faq_schema, organization_schema,
    product_breadcrumbs, product_schema, script_tag, website_schema, Breadcrumb, Faq,
    OrganizationProfile,
};
pub use manifest::{web_manifest, ManifestIcon, WebManifest};
pub use metadata::{
    about_page_metadata, cart_page_metadata, favorites_page_metadata, not_found_metadata,
    product_metadata, OpenGraph, OpenGraphImage, PageMetadata, Robots, TwitterCard,
};

use serde::Serialize;

/// Identity of the shop as it appears in metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    pub name: String,
    /// Origin without trailing slash, e.g. `https://unimark.kg`.
    pub base_url: String,
    pub logo_path: String,
    pub currency_code: String,
    pub currency_symbol: String,
}

impl Site {
    /// Absolute URL for a site-relative `path`. Already absolute URLs are
    /// returned unchanged.
    #[must_use]
    pub fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    #[must_use]
    pub fn logo_url(&self) -> String {
        self.absolute(&self.logo_path)
    }
}

#[cfg(test)]
pub(crate) fn test_site() -> Site {
    Site {
        name: "Unimark".to_string(),
        base_url: "https://unimark.kg".to_string(),
        logo_path: "/unimark-logo.svg".to_string(),
        currency_code: "KGS".to_string(),
        currency_symbol: "с.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_joins_relative_paths() {
        let site = test_site();
        assert_eq!(site.absolute("/uploads/a.jpg"), "https://unimark.kg/uploads/a.jpg");
        assert_eq!(site.absolute("uploads/a.jpg"), "https://unimark.kg/uploads/a.jpg");
    }

    #[test]
    fn absolute_keeps_external_urls() {
        let site = test_site();
        assert_eq!(
            site.absolute("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }
}
