//! Catalog command handlers for the CLI.
//!
//! Output goes to stdout, one product or category per line; logs go to
//! stderr.

use storefront_client::{CatalogClient, ListingStatus, ProductListing, RelatedProducts};
use storefront_core::seo::{
    aggregate_rating_schema, breadcrumb_schema, not_found_metadata, product_breadcrumbs,
    product_metadata, product_schema, script_tag,
};
use storefront_core::{
    product_cards, MemoryCart, Messages, ProductCard, ProductQuery, Site, ViewSelection,
    ALL_CATEGORIES,
};

fn print_card(card: &ProductCard) {
    println!(
        "{}\t{}\t{}\t{} ({})\t{}",
        card.id,
        card.name,
        card.price,
        card.rating.label(),
        card.review_count,
        card.url
    );
}

pub(crate) async fn run_products(
    client: &CatalogClient,
    query: &ProductQuery,
    json: bool,
    site: &Site,
) -> anyhow::Result<()> {
    let mut listing = ProductListing::new();
    listing.load(client, query, &MemoryCart::new()).await;

    if listing.status() == ListingStatus::Failed {
        tracing::warn!("no products available");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(listing.products())?);
        return Ok(());
    }

    // The API already applied the category filter, including subcategories.
    let cards = listing.cards(ALL_CATEGORIES, &site.currency_symbol);
    for card in &cards {
        print_card(card);
    }
    tracing::info!(count = cards.len(), "listed products");
    Ok(())
}

pub(crate) async fn run_categories(client: &CatalogClient, messages: &Messages) {
    let mut listing = ProductListing::new();
    listing
        .load(client, &ProductQuery::default(), &MemoryCart::new())
        .await;

    for category in listing.categories(&messages.all_categories) {
        println!("{}\t{}", category.id, category.name);
    }
}

pub(crate) async fn run_product(client: &CatalogClient, id: &str, jsonld: bool, site: &Site) {
    let Some(product) = client.get_product(id).await else {
        println!("{}", not_found_metadata(site).to_html(site));
        return;
    };

    if !jsonld {
        println!("{}", product_metadata(&product, site).to_html(site));
        return;
    }

    println!("{}", script_tag(&product_schema(site, &product)));
    if let Some(rating) = aggregate_rating_schema(&product) {
        println!("{}", script_tag(&rating));
    }
    println!(
        "{}",
        script_tag(&breadcrumb_schema(site, &product_breadcrumbs(&product)))
    );
}

pub(crate) async fn run_related(client: &CatalogClient, id: &str, limit: u32, site: &Site) {
    let Some(category_id) = client
        .get_product(id)
        .await
        .and_then(|p| p.category_id().map(str::to_string))
    else {
        tracing::warn!(product_id = %id, "product has no category; nothing related");
        return;
    };

    let mut related = RelatedProducts::new();
    related.load(client, &category_id, id, limit).await;
    if !related.visible() {
        return;
    }

    let selection = ViewSelection::new();
    for card in product_cards(related.products(), &selection, &site.currency_symbol) {
        print_card(&card);
    }
}
