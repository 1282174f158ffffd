//! Grid interaction handlers: add to cart, +/- quantity, favorite toggle and
//! the confirm-before-remove flow on the favorites page.
//!
//! Handlers never fail. Problems are reported to the user through the
//! [`Notifier`] and the returned outcome tells the caller what changed.

use crate::messages::Messages;
use crate::products::Product;
use crate::selection::ViewSelection;
use crate::stores::{
    CartItem, CartStore, FavoriteItem, FavoritesStore, Notification, NotificationKind, Notifier,
};

/// How long interaction toasts stay on screen.
pub const TOAST_DURATION_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    Added,
    /// The cart store refused the line.
    Rejected,
    /// Another mutation for the same product is still running.
    Busy,
    Updated(u32),
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    Removed,
    /// The product lacked an id or category and was not touched.
    Invalid,
}

fn toast<N: Notifier + ?Sized>(notifier: &N, kind: NotificationKind, message: &str) {
    notifier.notify(Notification {
        kind,
        message: message.to_string(),
        duration_ms: TOAST_DURATION_MS,
    });
}

/// Cart line for `product` using the sizes and colors chosen in `selection`.
#[must_use]
pub fn cart_item(product: &Product, selection: &ViewSelection) -> CartItem {
    let size_id = selection.selected_size(&product.id);
    let color_id = selection.selected_color(&product.id);

    CartItem {
        id: product.id.clone(),
        name: product.name.clone(),
        price: product.price,
        image_url: product.image_url.clone(),
        selected_size: size_id
            .and_then(|id| product.size(id))
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        selected_color: color_id
            .and_then(|id| product.color(id))
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        selected_size_id: size_id.map(str::to_string),
        selected_color_id: color_id.map(str::to_string),
        category: product.category.clone(),
        seller: product.seller.clone(),
    }
}

/// Adds one unit of `product` in its selected variant.
pub fn add_to_cart<C, N>(
    product: &Product,
    selection: &mut ViewSelection,
    cart: &mut C,
    notifier: &N,
    messages: &Messages,
) -> CartOutcome
where
    C: CartStore + ?Sized,
    N: Notifier + ?Sized,
{
    if !selection.begin_processing(&product.id) {
        return CartOutcome::Busy;
    }

    let item = cart_item(product, selection);
    let outcome = if cart.add_to_cart(item, 1) {
        toast(notifier, NotificationKind::Cart, &messages.added_to_cart);
        selection.set_quantity(&product.id, 1);
        CartOutcome::Added
    } else {
        tracing::debug!(product_id = %product.id, "cart rejected item");
        CartOutcome::Rejected
    };

    selection.finish_processing(&product.id);
    outcome
}

/// Applies a +/- step to the product's cart quantity. Dropping to zero or
/// below removes the line.
pub fn change_quantity<C, N>(
    product: &Product,
    delta: i32,
    selection: &mut ViewSelection,
    cart: &mut C,
    notifier: &N,
    messages: &Messages,
) -> CartOutcome
where
    C: CartStore + ?Sized,
    N: Notifier + ?Sized,
{
    if !selection.begin_processing(&product.id) {
        return CartOutcome::Busy;
    }

    let current = i64::from(selection.quantity(&product.id));
    let next = current + i64::from(delta);
    let size_id = selection.selected_size(&product.id).map(str::to_string);
    let color_id = selection.selected_color(&product.id).map(str::to_string);

    let outcome = if next <= 0 {
        cart.remove_from_cart(&product.id, size_id.as_deref(), color_id.as_deref());
        selection.set_quantity(&product.id, 0);
        toast(notifier, NotificationKind::Cart, &messages.removed_from_cart);
        CartOutcome::Removed
    } else {
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        cart.update_quantity(&product.id, next, size_id.as_deref(), color_id.as_deref());
        selection.set_quantity(&product.id, next);
        CartOutcome::Updated(next)
    };

    selection.finish_processing(&product.id);
    outcome
}

/// Adds `product` to favorites, or removes it if already there.
pub fn toggle_favorite<F, N>(
    product: &Product,
    favorites: &mut F,
    notifier: &N,
    messages: &Messages,
) -> FavoriteOutcome
where
    F: FavoritesStore + ?Sized,
    N: Notifier + ?Sized,
{
    let Some(item) = FavoriteItem::from_product(product) else {
        toast(
            notifier,
            NotificationKind::Error,
            &messages.error_insufficient_data,
        );
        return FavoriteOutcome::Invalid;
    };

    let was_favorite = favorites.is_favorite(&item.id);
    favorites.toggle_favorite(item);

    if was_favorite {
        toast(
            notifier,
            NotificationKind::Favorites,
            &messages.removed_from_favorites,
        );
        FavoriteOutcome::Removed
    } else {
        toast(
            notifier,
            NotificationKind::Favorites,
            &messages.added_to_favorites,
        );
        FavoriteOutcome::Added
    }
}

/// Confirm dialog state for removing a favorite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalPrompt {
    pending: Option<String>,
}

impl RemovalPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog for `product_id`.
    pub fn request(&mut self, product_id: &str) {
        self.pending = Some(product_id.to_string());
    }

    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Removes the pending product and closes the dialog. Returns the id
    /// that was removed.
    pub fn confirm<F>(&mut self, favorites: &mut F) -> Option<String>
    where
        F: FavoritesStore + ?Sized,
    {
        let id = self.pending.take()?;
        favorites.remove_from_favorites(&id);
        Some(id)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
