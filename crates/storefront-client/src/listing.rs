//! Stateful views over catalog fetches: the product grid and the related
//! products row.
//!
//! Both own a [`RequestSequencer`], so a response that arrives after a newer
//! request was issued, or after [`ProductListing::teardown`], is dropped.

use storefront_core::{
    aggregate_categories, filter_by_category, is_all, product_cards, CartStore, Category, Product,
    ProductCard, ProductQuery, ViewSelection,
};

use crate::client::{related_query, select_related, CatalogClient};
use crate::error::CatalogError;
use crate::sequence::{RequestSequencer, RequestTicket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Loading,
    Ready,
    Failed,
}

/// Product grid state: the fetched products, the per-product view
/// selection and the load status.
#[derive(Debug)]
pub struct ProductListing {
    sequencer: RequestSequencer,
    status: ListingStatus,
    products: Vec<Product>,
    selection: ViewSelection,
}

impl Default for ProductListing {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListing {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            status: ListingStatus::Loading,
            products: Vec::new(),
            selection: ViewSelection::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> ListingStatus {
        self.status
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn selection(&self) -> &ViewSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut ViewSelection {
        &mut self.selection
    }

    /// Starts a load and returns its ticket. Any earlier ticket goes stale.
    pub fn begin_load(&mut self) -> RequestTicket {
        self.status = ListingStatus::Loading;
        self.sequencer.issue()
    }

    /// Applies a fetch result if `ticket` is still current.
    ///
    /// On success the view selection is pruned to the new products and
    /// initialized against `cart`. A failure clears the product list. Returns `false` when the result was
    /// dropped as stale.
    pub fn apply<C>(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Product>, CatalogError>,
        cart: &C,
    ) -> bool
    where
        C: CartStore + ?Sized,
    {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(?ticket, "dropping stale product list");
            return false;
        }

        match result {
            Ok(products) => {
                self.selection.retain_products(&products);
                self.selection.initialize(&products, cart);
                self.products = products;
                self.status = ListingStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load products");
                self.products.clear();
                self.status = ListingStatus::Failed;
            }
        }
        true
    }

    /// Fetches `query` and applies the result.
    ///
    /// The `&mut` borrow spans the await, so two `load` calls on one
    /// listing can never overlap. Callers that keep several fetches in
    /// flight use [`ProductListing::begin_load`] and
    /// [`ProductListing::apply`] directly.
    pub async fn load<C>(&mut self, client: &CatalogClient, query: &ProductQuery, cart: &C) -> bool
    where
        C: CartStore + ?Sized,
    {
        let ticket = self.begin_load();
        let result = client.fetch_products(query).await;
        self.apply(ticket, result, cart)
    }

    /// Re-reads quantities after the cart changed.
    pub fn refresh_cart<C>(&mut self, cart: &C)
    where
        C: CartStore + ?Sized,
    {
        self.selection.sync_quantities(&self.products, cart);
    }

    /// Categories present in the loaded products, `all` first.
    #[must_use]
    pub fn categories(&self, all_label: &str) -> Vec<Category> {
        aggregate_categories(&self.products, all_label)
    }

    /// Cards for the products in `category_id` (or every product for `all`).
    #[must_use]
    pub fn cards(&self, category_id: &str, currency_symbol: &str) -> Vec<ProductCard> {
        product_cards(
            filter_by_category(&self.products, category_id),
            &self.selection,
            currency_symbol,
        )
    }

    /// Stops accepting results and forgets per-product selections.
    pub fn teardown(&mut self) {
        self.sequencer.close();
        self.selection.clear();
    }
}

/// The "related products" row under a product page.
#[derive(Debug)]
pub struct RelatedProducts {
    sequencer: RequestSequencer,
    status: ListingStatus,
    products: Vec<Product>,
}

impl Default for RelatedProducts {
    fn default() -> Self {
        Self::new()
    }
}

impl RelatedProducts {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            status: ListingStatus::Loading,
            products: Vec::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> ListingStatus {
        self.status
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Hidden while loading, after a failure, or when nothing is related.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.status == ListingStatus::Ready && !self.products.is_empty()
    }

    pub fn begin_load(&mut self) -> RequestTicket {
        self.status = ListingStatus::Loading;
        self.sequencer.issue()
    }

    /// Applies an already filtered list if `ticket` is still current.
    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Product>, CatalogError>,
    ) -> bool {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(?ticket, "dropping stale related products");
            return false;
        }

        match result {
            Ok(products) => {
                self.products = products;
                self.status = ListingStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load related products");
                self.products.clear();
                self.status = ListingStatus::Failed;
            }
        }
        true
    }

    /// Fetches the row for `category_id`.
    ///
    /// Without a concrete category nothing is requested and the row stays
    /// hidden. Like [`ProductListing::load`], the `&mut` borrow rules out
    /// overlapping calls.
    pub async fn load(
        &mut self,
        client: &CatalogClient,
        category_id: &str,
        current_product_id: &str,
        limit: u32,
    ) -> bool {
        if category_id.is_empty() || is_all(category_id) {
            tracing::debug!(product_id = %current_product_id, "no category; skipping related products");
            let ticket = self.begin_load();
            return self.apply(ticket, Ok(Vec::new()));
        }

        let ticket = self.begin_load();
        let result = client
            .fetch_products(&related_query(category_id, limit))
            .await
            .map(|products| select_related(products, current_product_id, limit));
        self.apply(ticket, result)
    }

    pub fn teardown(&mut self) {
        self.sequencer.close();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use storefront_core::MemoryCart;

    use super::*;

    fn product(id: &str, category: &str, name: &str) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "price": 1500,
            "category": {"id": category, "name": name},
            "sizes": [{"id": "s1", "name": "M"}]
        }))
        .unwrap()
    }

    fn sample() -> Vec<Product> {
        vec![product("p1", "c1", "Shoes"), product("p2", "c2", "Hats")]
    }

    fn failure() -> CatalogError {
        CatalogError::UnexpectedStatus {
            status: 500,
            url: "http://localhost/api/products".to_string(),
        }
    }

    #[test]
    fn apply_initializes_selection() {
        let mut listing = ProductListing::new();
        let cart = MemoryCart::new();
        let ticket = listing.begin_load();
        assert_eq!(listing.status(), ListingStatus::Loading);

        assert!(listing.apply(ticket, Ok(sample()), &cart));
        assert_eq!(listing.status(), ListingStatus::Ready);
        assert_eq!(listing.selection().selected_size("p1"), Some("s1"));
        assert_eq!(listing.selection().quantity("p2"), 0);
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut listing = ProductListing::new();
        let cart = MemoryCart::new();
        let first = listing.begin_load();
        let second = listing.begin_load();

        assert!(listing.apply(second, Ok(vec![product("p2", "c2", "Hats")]), &cart));
        assert!(!listing.apply(first, Ok(sample()), &cart));
        assert_eq!(listing.products().len(), 1);
        assert_eq!(listing.products()[0].id, "p2");
    }

    #[test]
    fn result_after_teardown_is_ignored() {
        let mut listing = ProductListing::new();
        let cart = MemoryCart::new();
        let ticket = listing.begin_load();
        listing.teardown();

        assert!(!listing.apply(ticket, Ok(sample()), &cart));
        assert!(listing.products().is_empty());
    }

    #[test]
    fn failure_empties_the_list() {
        let mut listing = ProductListing::new();
        let cart = MemoryCart::new();
        let ticket = listing.begin_load();
        listing.apply(ticket, Ok(sample()), &cart);

        let ticket = listing.begin_load();
        assert!(listing.apply(ticket, Err(failure()), &cart));
        assert_eq!(listing.status(), ListingStatus::Failed);
        assert!(listing.products().is_empty());
        assert!(listing.cards("all", "с.").is_empty());
    }

    #[test]
    fn reload_prunes_selection_of_vanished_products() {
        let mut listing = ProductListing::new();
        let cart = MemoryCart::new();
        let ticket = listing.begin_load();
        listing.apply(ticket, Ok(sample()), &cart);
        assert_eq!(listing.selection().selected_size("p1"), Some("s1"));

        let ticket = listing.begin_load();
        listing.apply(ticket, Ok(vec![product("p2", "c2", "Hats")]), &cart);
        assert_eq!(listing.selection().selected_size("p1"), None);
        assert_eq!(listing.selection().selected_size("p2"), Some("s1"));
    }

    #[test]
    fn cards_follow_category_filter() {
        let mut listing = ProductListing::new();
        let cart = MemoryCart::new();
        let ticket = listing.begin_load();
        listing.apply(ticket, Ok(sample()), &cart);

        let hats: Vec<String> = listing.cards("c2", "с.").into_iter().map(|c| c.id).collect();
        assert_eq!(hats, vec!["p2"]);
        assert_eq!(listing.cards("all", "с.").len(), 2);

        let categories = listing.categories("Все");
        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["all", "c2", "c1"]);
    }

    #[test]
    fn related_hidden_until_loaded_and_non_empty() {
        let mut related = RelatedProducts::new();
        assert!(!related.visible());

        let ticket = related.begin_load();
        related.apply(ticket, Ok(Vec::new()));
        assert!(!related.visible());

        let ticket = related.begin_load();
        related.apply(ticket, Ok(sample()));
        assert!(related.visible());

        let ticket = related.begin_load();
        related.apply(ticket, Err(failure()));
        assert!(!related.visible());
    }
}
