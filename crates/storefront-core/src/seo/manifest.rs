use serde::Serialize;

use super::Site;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime: String,
}

/// Progressive web app manifest served at `/manifest.webmanifest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub orientation: String,
    pub icons: Vec<ManifestIcon>,
    pub categories: Vec<String>,
    pub lang: String,
}

#[must_use]
pub fn web_manifest(site: &Site) -> WebManifest {
    let icon = |sizes: &str, mime: &str| ManifestIcon {
        src: site.logo_path.clone(),
        sizes: sizes.to_string(),
        mime: mime.to_string(),
    };

    WebManifest {
        name: format!("{} - Интернет-магазин одежды", site.name),
        short_name: site.name.clone(),
        description: "Качественная одежда и аксессуары с доставкой по Кыргызстану".to_string(),
        start_url: "/".to_string(),
        display: "standalone".to_string(),
        background_color: "#ffffff".to_string(),
        theme_color: "#f97316".to_string(),
        orientation: "portrait".to_string(),
        icons: vec![
            icon("16x16", "image/x-icon"),
            icon("32x32", "image/x-icon"),
            icon("any", "image/svg+xml"),
        ],
        categories: vec!["shopping".to_string(), "lifestyle".to_string()],
        lang: "ru".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::test_site;

    #[test]
    fn manifest_names_the_shop() {
        let manifest = web_manifest(&test_site());
        assert_eq!(manifest.name, "Unimark - Интернет-магазин одежды");
        assert_eq!(manifest.short_name, "Unimark");
        assert_eq!(manifest.start_url, "/");
        assert_eq!(manifest.lang, "ru");
    }

    #[test]
    fn icons_serialize_mime_as_type() {
        let value = serde_json::to_value(web_manifest(&test_site())).unwrap();
        let icons = value["icons"].as_array().unwrap();
        assert_eq!(icons.len(), 3);
        assert_eq!(icons[2]["type"], "image/svg+xml");
        assert_eq!(icons[2]["src"], "/unimark-logo.svg");
        assert_eq!(value["theme_color"], "#f97316");
    }
}
