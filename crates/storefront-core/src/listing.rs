//! Pure projections from product records to what the grid draws.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::category::is_all;
use crate::products::Product;
use crate::rating::{Rating, StarFill, STAR_COUNT};
use crate::selection::ViewSelection;

/// Text shown on cards whose product has no description.
pub const DESCRIPTION_PLACEHOLDER: &str = "Описание товара";

/// Products in `category_id`, in input order. The `all` sentinel returns
/// every product.
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Product], category_id: &str) -> Vec<&'a Product> {
    if is_all(category_id) {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|p| p.category_id() == Some(category_id))
        .collect()
}

/// Formats `price` as whole currency units with space-grouped thousands,
/// e.g. `1 234 с.`.
#[must_use]
pub fn format_price(price: Decimal, currency_symbol: &str) -> String {
    let rounded = price.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    if currency_symbol.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped} {currency_symbol}")
    }
}

/// One tile of the product grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    /// `None` draws the gradient placeholder.
    pub image: Option<String>,
    pub rating: Rating,
    pub stars: [StarFill; STAR_COUNT],
    pub review_count: u32,
    pub price: String,
    pub url: String,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: &Product, selection: &ViewSelection, currency_symbol: &str) -> Self {
        let rating = product.rating();
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(DESCRIPTION_PLACEHOLDER)
                .to_string(),
            image: product.primary_image().map(str::to_string),
            rating,
            stars: rating.stars(),
            review_count: product.review_count(),
            price: format_price(product.price, currency_symbol),
            url: selection.product_url(&product.id),
        }
    }
}

/// Cards for every renderable product; products missing an id or a
/// category are dropped.
#[must_use]
pub fn product_cards<'a, I>(
    products: I,
    selection: &ViewSelection,
    currency_symbol: &str,
) -> Vec<ProductCard>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| p.is_renderable())
        .map(|p| ProductCard::new(p, selection, currency_symbol))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(id: &str, category: &str, name: &str) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "price": 1500,
            "category": {"id": category, "name": name}
        }))
        .unwrap()
    }

    fn sample() -> Vec<Product> {
        vec![product("p1", "c1", "Shoes"), product("p2", "c2", "Hats")]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn selecting_c2_yields_only_p2() {
        let products = sample();
        assert_eq!(ids(&filter_by_category(&products, "c2")), vec!["p2"]);
    }

    #[test]
    fn selecting_all_yields_everything_in_order() {
        let products = sample();
        assert_eq!(ids(&filter_by_category(&products, "all")), vec!["p1", "p2"]);
    }

    #[test]
    fn filter_is_sound_and_complete() {
        let products = vec![
            product("p1", "c1", "Shoes"),
            product("p2", "c2", "Hats"),
            product("p3", "c1", "Shoes"),
            product("p4", "c3", "Bags"),
        ];
        let filtered = filter_by_category(&products, "c1");
        assert!(filtered.iter().all(|p| p.category_id() == Some("c1")));
        assert_eq!(ids(&filtered), vec!["p1", "p3"]);
    }

    #[test]
    fn unknown_category_yields_nothing() {
        assert!(filter_by_category(&sample(), "missing").is_empty());
    }

    #[test]
    fn format_price_groups_thousands() {
        assert_eq!(format_price(Decimal::new(1_234_567, 0), "с."), "1 234 567 с.");
        assert_eq!(format_price(Decimal::new(999, 0), "с."), "999 с.");
        assert_eq!(format_price(Decimal::new(1000, 0), "с."), "1 000 с.");
    }

    #[test]
    fn format_price_rounds_to_whole_units() {
        assert_eq!(format_price(Decimal::new(24995, 1), "с."), "2 500 с.");
        assert_eq!(format_price(Decimal::new(24994, 1), "с."), "2 499 с.");
        assert_eq!(format_price(Decimal::ZERO, "с."), "0 с.");
    }

    #[test]
    fn format_price_without_symbol() {
        assert_eq!(format_price(Decimal::new(12_000, 0), ""), "12 000");
    }

    #[test]
    fn card_uses_placeholders_and_selection() {
        let products = sample();
        let mut selection = ViewSelection::new();
        selection.select_size("p1", "m");

        let cards = product_cards(&products, &selection, "с.");
        assert_eq!(cards.len(), 2);
        let card = &cards[0];
        assert_eq!(card.description, DESCRIPTION_PLACEHOLDER);
        assert_eq!(card.image, None);
        assert_eq!(card.rating, Rating::Default);
        assert_eq!(card.price, "1 500 с.");
        assert_eq!(card.url, "/product/p1?sizeId=m");
        assert_eq!(card.review_count, 0);
    }

    #[test]
    fn cards_skip_products_without_category() {
        let mut products = sample();
        products[0].category = None;
        let cards = product_cards(&products, &ViewSelection::new(), "с.");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "p2");
    }
}
