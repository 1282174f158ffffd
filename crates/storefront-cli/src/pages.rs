//! Handlers for site-wide SEO output that needs no catalog request.

use clap::ValueEnum;
use storefront_core::seo::{
    about_page_metadata, cart_page_metadata, favorites_page_metadata, not_found_metadata,
    organization_schema, script_tag, web_manifest, website_schema, OrganizationProfile,
    PageMetadata,
};
use storefront_core::Site;

/// Static pages with their own metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    About,
    Cart,
    Favorites,
    NotFound,
}

impl PageKind {
    fn metadata(self, site: &Site) -> PageMetadata {
        match self {
            PageKind::About => about_page_metadata(site),
            PageKind::Cart => cart_page_metadata(site),
            PageKind::Favorites => favorites_page_metadata(site),
            PageKind::NotFound => not_found_metadata(site),
        }
    }
}

pub(crate) fn run_manifest(site: &Site) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&web_manifest(site))?);
    Ok(())
}

pub(crate) fn run_site(site: &Site) {
    let profile = OrganizationProfile::default();
    println!("{}", script_tag(&organization_schema(site, &profile)));
    println!(
        "{}",
        script_tag(&website_schema(site, &profile.description))
    );
}

pub(crate) fn run_page(page: PageKind, site: &Site) {
    println!("{}", page.metadata(site).to_html(site));
}
