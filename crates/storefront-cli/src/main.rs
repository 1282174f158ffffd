mod catalog;
mod pages;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use storefront_client::{CatalogClient, DEFAULT_RELATED_LIMIT};
use storefront_core::{
    Environment, Messages, PriceRange, ProductQuery, SortKey, DEFAULT_MAX_PRICE,
};
use tracing_subscriber::EnvFilter;

use crate::pages::PageKind;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront catalog command line interface")]
struct Cli {
    /// Interface language for labels and messages (ru, en)
    #[arg(long, global = true, default_value = "ru")]
    lang: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products matching the given filters
    Products(ProductsArgs),
    /// List the categories present in the catalog, `all` first
    Categories,
    /// Show one product's page metadata
    Product {
        id: String,
        /// Print JSON-LD script tags instead of meta tags
        #[arg(long)]
        jsonld: bool,
    },
    /// Show products related to a product
    Related {
        id: String,
        #[arg(long, default_value_t = DEFAULT_RELATED_LIMIT)]
        limit: u32,
    },
    /// Print the web app manifest
    Manifest,
    /// Print the site-wide organization and website JSON-LD
    Site,
    /// Print metadata for a static page
    Page {
        #[arg(value_enum)]
        page: PageKind,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
struct ProductsArgs {
    /// Category id; `all` means no category filter
    #[arg(long)]
    category: Option<String>,
    /// Include products from subcategories of --category
    #[arg(long)]
    include_subcategories: bool,
    /// Additional category ids (repeatable)
    #[arg(long = "categories")]
    categories: Vec<String>,
    #[arg(long, default_value_t = Decimal::ZERO)]
    min_price: Decimal,
    #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
    max_price: Decimal,
    /// newest, price_asc, price_desc, rating or popular
    #[arg(long, default_value = "newest")]
    sort: SortKey,
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
    min_rating: u8,
    #[arg(long)]
    seller: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    limit: Option<u32>,
    /// Print raw product JSON instead of cards
    #[arg(long)]
    json: bool,
}

impl ProductsArgs {
    fn query(&self) -> ProductQuery {
        ProductQuery {
            category_id: self.category.clone(),
            include_subcategories: self.include_subcategories,
            categories: self.categories.clone(),
            price_range: PriceRange {
                min: self.min_price,
                max: self.max_price,
            },
            sort_by: self.sort,
            min_rating: self.min_rating,
            seller: self.seller.clone(),
            search: self.search.clone(),
            limit: self.limit,
        }
    }
}

/// Colored output with targets in development, plain lines elsewhere.
fn colored_logs(env: &Environment) -> bool {
    matches!(env, Environment::Development)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(colored_logs(&config.env))
        .with_target(colored_logs(&config.env))
        .with_writer(std::io::stderr)
        .init();

    let messages = Messages::for_language(&cli.lang).unwrap_or_else(|| {
        tracing::warn!(lang = %cli.lang, "unknown language, falling back to ru");
        Messages::default()
    });
    let site = config.site();

    let Some(command) = cli.command else {
        println!("storefront: catalog at {}", config.api_url);
        return Ok(());
    };

    match command {
        Commands::Products(args) => {
            let client = CatalogClient::from_config(&config)?;
            catalog::run_products(&client, &args.query(), args.json, &site).await?;
        }
        Commands::Categories => {
            let client = CatalogClient::from_config(&config)?;
            catalog::run_categories(&client, &messages).await;
        }
        Commands::Product { id, jsonld } => {
            let client = CatalogClient::from_config(&config)?;
            catalog::run_product(&client, &id, jsonld, &site).await;
        }
        Commands::Related { id, limit } => {
            let client = CatalogClient::from_config(&config)?;
            catalog::run_related(&client, &id, limit, &site).await;
        }
        Commands::Manifest => pages::run_manifest(&site)?,
        Commands::Site => pages::run_site(&site),
        Commands::Page { page } => pages::run_page(page, &site),
    }

    Ok(())
}
