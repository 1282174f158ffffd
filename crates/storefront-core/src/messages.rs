/// User-facing strings for one interface language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub all_categories: String,
    pub added_to_cart: String,
    pub removed_from_cart: String,
    pub added_to_favorites: String,
    pub removed_from_favorites: String,
    pub error_insufficient_data: String,
    pub error_adding_to_favorites: String,
}

impl Messages {
    #[must_use]
    pub fn russian() -> Self {
        Self {
            all_categories: "Все".to_string(),
            added_to_cart: "Товар добавлен в корзину".to_string(),
            removed_from_cart: "Товар удален из корзины".to_string(),
            added_to_favorites: "Добавлено в избранное".to_string(),
            removed_from_favorites: "Удалено из избранного".to_string(),
            error_insufficient_data: "Недостаточно данных о товаре".to_string(),
            error_adding_to_favorites: "Ошибка при добавлении в избранное".to_string(),
        }
    }

    #[must_use]
    pub fn english() -> Self {
        Self {
            all_categories: "All".to_string(),
            added_to_cart: "Added to cart".to_string(),
            removed_from_cart: "Removed from cart".to_string(),
            added_to_favorites: "Added to favorites".to_string(),
            removed_from_favorites: "Removed from favorites".to_string(),
            error_insufficient_data: "Not enough product data".to_string(),
            error_adding_to_favorites: "Could not add to favorites".to_string(),
        }
    }

    /// Looks up a language by its code, `ru` or `en`.
    #[must_use]
    pub fn for_language(code: &str) -> Option<Self> {
        match code {
            "ru" => Some(Self::russian()),
            "en" => Some(Self::english()),
            _ => None,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::russian()
    }
}
