pub mod client;
pub mod error;
pub mod listing;
pub mod sequence;

pub use client::{
    related_query, select_related, CatalogClient, DEFAULT_PRERENDER_LIMIT, DEFAULT_RELATED_LIMIT,
};
pub use error::CatalogError;
pub use listing::{ListingStatus, ProductListing, RelatedProducts};
pub use sequence::{RequestSequencer, RequestTicket};
