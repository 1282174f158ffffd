//! Per-page size/color/quantity choices, keyed by product id.
//!
//! This state is never authoritative: sizes and colors default from the
//! product lists and quantities mirror the cart. It lives as long as the
//! page that owns it.

use std::collections::{HashMap, HashSet};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::products::Product;
use crate::stores::CartStore;

/// Characters escaped in path segments and query values.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSelection {
    sizes: HashMap<String, String>,
    colors: HashMap<String, String>,
    quantities: HashMap<String, u32>,
    processing: HashSet<String>,
}

impl ViewSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the selection in line with `products` and `cart`.
    ///
    /// Products without a recorded size or color get the first entry of
    /// their list; existing choices are kept. Quantities are always
    /// recomputed from the cart. Running it twice with the same inputs is a
    /// no-op.
    pub fn initialize<'a, I, C>(&mut self, products: I, cart: &C)
    where
        I: IntoIterator<Item = &'a Product>,
        C: CartStore + ?Sized,
    {
        for product in products {
            if let Some(first) = product.sizes.first() {
                self.sizes
                    .entry(product.id.clone())
                    .or_insert_with(|| first.id.clone());
            }
            if let Some(first) = product.colors.first() {
                self.colors
                    .entry(product.id.clone())
                    .or_insert_with(|| first.id.clone());
            }
            self.quantities
                .insert(product.id.clone(), cart.quantity_of(&product.id));
        }
    }

    /// Forgets size, color and quantity entries for products not in
    /// `products`. In-flight markers are left alone.
    pub fn retain_products<'a, I>(&mut self, products: I)
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let keep: HashSet<&str> = products.into_iter().map(|p| p.id.as_str()).collect();
        self.sizes.retain(|id, _| keep.contains(id.as_str()));
        self.colors.retain(|id, _| keep.contains(id.as_str()));
        self.quantities.retain(|id, _| keep.contains(id.as_str()));
    }

    /// Recomputes quantities only, for when the cart changes under a
    /// product list that did not.
    pub fn sync_quantities<'a, I, C>(&mut self, products: I, cart: &C)
    where
        I: IntoIterator<Item = &'a Product>,
        C: CartStore + ?Sized,
    {
        for product in products {
            self.quantities
                .insert(product.id.clone(), cart.quantity_of(&product.id));
        }
    }

    pub fn select_size(&mut self, product_id: &str, size_id: &str) {
        self.sizes
            .insert(product_id.to_string(), size_id.to_string());
    }

    pub fn select_color(&mut self, product_id: &str, color_id: &str) {
        self.colors
            .insert(product_id.to_string(), color_id.to_string());
    }

    #[must_use]
    pub fn selected_size(&self, product_id: &str) -> Option<&str> {
        self.sizes.get(product_id).map(String::as_str)
    }

    #[must_use]
    pub fn selected_color(&self, product_id: &str) -> Option<&str> {
        self.colors.get(product_id).map(String::as_str)
    }

    #[must_use]
    pub fn quantity(&self, product_id: &str) -> u32 {
        self.quantities.get(product_id).copied().unwrap_or(0)
    }

    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        self.quantities.insert(product_id.to_string(), quantity);
    }

    /// Marks `product_id` as having a cart mutation in flight.
    ///
    /// Returns `false` if one is already running, in which case the caller
    /// must drop the interaction.
    pub fn begin_processing(&mut self, product_id: &str) -> bool {
        self.processing.insert(product_id.to_string())
    }

    pub fn finish_processing(&mut self, product_id: &str) {
        self.processing.remove(product_id);
    }

    #[must_use]
    pub fn is_processing(&self, product_id: &str) -> bool {
        self.processing.contains(product_id)
    }

    /// Drops all state, e.g. when the page is torn down.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Detail page link carrying the current size and color choice.
    #[must_use]
    pub fn product_url(&self, product_id: &str) -> String {
        let mut url = format!("/product/{}", utf8_percent_encode(product_id, COMPONENT));

        let params = [
            ("sizeId", self.selected_size(product_id)),
            ("colorId", self.selected_color(product_id)),
        ];
        let mut separator = '?';
        for (key, value) in params {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                url.push(separator);
                url.push_str(key);
                url.push('=');
                url.extend(utf8_percent_encode(value, COMPONENT));
                separator = '&';
            }
        }
        url
    }
}
