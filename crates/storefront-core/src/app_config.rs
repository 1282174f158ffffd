#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the storefront client and SEO output.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Public origin of the shop, used for canonical and JSON-LD URLs.
    pub site_url: String,
    /// Origin serving `/api/products`. Defaults to `site_url`.
    pub api_url: String,
    pub site_name: String,
    /// Site-relative logo, used when a product has no image.
    pub logo_path: String,
    /// ISO 4217 code emitted in offers and `product:price:currency`.
    pub currency_code: String,
    /// Suffix used by the price formatter, e.g. `"с."`.
    pub currency_symbol: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// Site identity used by the SEO builders.
    #[must_use]
    pub fn site(&self) -> crate::seo::Site {
        crate::seo::Site {
            name: self.site_name.clone(),
            base_url: self.site_url.trim_end_matches('/').to_string(),
            logo_path: self.logo_path.clone(),
            currency_code: self.currency_code.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}
