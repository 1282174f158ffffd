//! Review averages and the five-star widget.
//!
//! Products with no reviews are shown with five stars. That is a display
//! convention only: [`Rating::Default`] keeps it distinguishable from a real
//! 5.0 average so callers that need real signal (JSON-LD, sorting) can skip it.

use serde::Serialize;

use crate::products::{Product, Review};

/// Value shown for products that have no reviews yet.
pub const DEFAULT_DISPLAY_RATING: f64 = 5.0;

/// Number of stars in the rating widget.
pub const STAR_COUNT: usize = 5;

/// Minimum fractional part that still draws a partial star.
const PARTIAL_STAR_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Rating {
    /// Average of real customer reviews.
    Measured(f64),
    /// No reviews; displayed as [`DEFAULT_DISPLAY_RATING`].
    Default,
}

impl Rating {
    /// Rating for a product.
    ///
    /// Uses the mean of the embedded reviews when there are any. List
    /// endpoints that omit review bodies still send `_count.reviews` and a
    /// server-side `averageRating`; that pair is used next. Anything else
    /// is [`Rating::Default`].
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        if let Some(avg) = average_rating(&product.reviews) {
            return Rating::Measured(avg);
        }
        match product.average_rating {
            Some(avg) if product.counts.reviews > 0 && avg > 0.0 => Rating::Measured(avg),
            _ => Rating::Default,
        }
    }

    #[must_use]
    pub fn display_value(self) -> f64 {
        match self {
            Rating::Measured(v) => v,
            Rating::Default => DEFAULT_DISPLAY_RATING,
        }
    }

    /// The real average, or `None` when only the display default exists.
    #[must_use]
    pub fn measured(self) -> Option<f64> {
        match self {
            Rating::Measured(v) => Some(v),
            Rating::Default => None,
        }
    }

    /// One-decimal label, e.g. `"4.5"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{:.1}", self.display_value())
    }

    /// Fill state of each star in the widget.
    #[must_use]
    pub fn stars(self) -> [StarFill; STAR_COUNT] {
        star_fills(self.display_value())
    }
}

/// Arithmetic mean of the review ratings, `None` for an empty list.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: f64 = reviews.iter().map(|r| r.rating).sum();
    Some(sum / reviews.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "fill", content = "fraction", rename_all = "snake_case")]
pub enum StarFill {
    Full,
    /// Clipped star showing this fraction (0.1..1.0) of its width.
    Partial(f64),
    Empty,
}

/// Computes star fills for `rating`.
///
/// Star `i` is full when `i < floor(rating)`; the star at `floor(rating)`
/// is partial when the fractional part is at least 0.1.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn star_fills(rating: f64) -> [StarFill; STAR_COUNT] {
    let rating = rating.clamp(0.0, STAR_COUNT as f64);
    let whole = rating.floor();
    let fraction = rating - whole;
    let whole = whole as usize;

    std::array::from_fn(|i| {
        if i < whole {
            StarFill::Full
        } else if i == whole && fraction >= PARTIAL_STAR_THRESHOLD {
            StarFill::Partial(fraction)
        } else {
            StarFill::Empty
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(ratings: &[f64]) -> Vec<Review> {
        ratings
            .iter()
            .map(|&rating| Review {
                id: None,
                client_name: None,
                text: None,
                rating,
            })
            .collect()
    }

    fn product(reviews: Vec<Review>, count: u32, reported: Option<f64>) -> Product {
        serde_json::from_value::<Product>(serde_json::json!({
            "id": "p1",
            "name": "Shirt",
            "price": 100,
            "category": {"id": "c1", "name": "Shirts"},
            "_count": {"reviews": count}
        }))
        .map(|mut p| {
            p.reviews = reviews;
            p.average_rating = reported;
            p
        })
        .unwrap()
    }

    #[test]
    fn average_of_five_three_four_is_four() {
        assert_eq!(average_rating(&reviews(&[5.0, 3.0, 4.0])), Some(4.0));
    }

    #[test]
    fn empty_reviews_have_no_average() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn product_without_reviews_displays_five() {
        let rating = product(Vec::new(), 0, None).rating();
        assert_eq!(rating, Rating::Default);
        assert!((rating.display_value() - 5.0).abs() < f64::EPSILON);
        assert_eq!(rating.measured(), None);
        assert_eq!(rating.label(), "5.0");
    }

    #[test]
    fn embedded_reviews_win_over_reported_average() {
        let rating = product(reviews(&[5.0, 3.0, 4.0]), 3, Some(2.0)).rating();
        assert_eq!(rating, Rating::Measured(4.0));
    }

    #[test]
    fn reported_average_used_when_bodies_are_omitted() {
        let rating = product(Vec::new(), 7, Some(3.5)).rating();
        assert_eq!(rating, Rating::Measured(3.5));
    }

    #[test]
    fn reported_average_ignored_without_review_count() {
        let rating = product(Vec::new(), 0, Some(3.5)).rating();
        assert_eq!(rating, Rating::Default);
    }

    #[test]
    fn stars_for_whole_rating() {
        assert_eq!(
            star_fills(4.0),
            [
                StarFill::Full,
                StarFill::Full,
                StarFill::Full,
                StarFill::Full,
                StarFill::Empty
            ]
        );
    }

    #[test]
    fn stars_for_half_rating() {
        let stars = star_fills(3.5);
        assert_eq!(stars[2], StarFill::Full);
        assert_eq!(stars[3], StarFill::Partial(0.5));
        assert_eq!(stars[4], StarFill::Empty);
    }

    #[test]
    fn tiny_fraction_does_not_draw_partial_star() {
        let stars = star_fills(2.05);
        assert_eq!(stars[1], StarFill::Full);
        assert_eq!(stars[2], StarFill::Empty);
    }

    #[test]
    fn default_rating_fills_every_star() {
        assert!(Rating::Default.stars().iter().all(|s| *s == StarFill::Full));
    }
}
