pub mod actions;
pub mod app_config;
pub mod category;
pub mod config;
pub mod filter;
pub mod listing;
pub mod messages;
pub mod products;
pub mod rating;
pub mod selection;
pub mod seo;
pub mod stores;

pub use actions::{
    add_to_cart, cart_item, change_quantity, toggle_favorite, CartOutcome, FavoriteOutcome,
    RemovalPrompt, TOAST_DURATION_MS,
};
pub use app_config::{AppConfig, Environment};
pub use category::{aggregate_categories, is_all, ALL_CATEGORIES};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{PriceRange, ProductQuery, SortKey, DEFAULT_MAX_PRICE};
pub use listing::{
    filter_by_category, format_price, product_cards, ProductCard, DESCRIPTION_PLACEHOLDER,
};
pub use messages::Messages;
pub use products::{Category, Color, Product, ProductCounts, Review, Seller, Size};
pub use rating::{average_rating, star_fills, Rating, StarFill, DEFAULT_DISPLAY_RATING, STAR_COUNT};
pub use selection::ViewSelection;
pub use seo::Site;
pub use stores::{
    CartItem, CartLine, CartStore, FavoriteItem, FavoritesStore, MemoryCart, MemoryFavorites,
    Notification, NotificationKind, Notifier, RecordingNotifier, TracingNotifier,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),
}
