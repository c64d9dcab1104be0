//! Cart persistence and mutation service.
//!
//! All cart handlers go through [`CartService`]: every mutation loads the
//! state, applies the change, persists the **whole** state back, and only
//! then notifies listeners with the fresh totals. Listeners are advisory;
//! a missing or failing listener never blocks the mutation.

use std::sync::Arc;

use robusta_core::cart::{Cart, CartLine};
use robusta_core::pricing::{self, CartTotals};
use robusta_core::promotion::Promotion;
use robusta_core::types::ProductId;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session::keys;

/// Everything the cart persists between requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    pub cart: Cart,
    pub promotion: Option<Promotion>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Where cart state lives between requests.
#[allow(async_fn_in_trait)]
pub trait CartStore {
    async fn load(&self) -> Result<CartState, StoreError>;
    async fn save(&self, state: &CartState) -> Result<(), StoreError>;
}

/// Observer notified after every persisted cart change.
pub trait CartListener: Send + Sync {
    fn cart_changed(&self, state: &CartState, totals: &CartTotals);
}

/// Listener that does nothing; the service behaves identically with or
/// without real listeners attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl CartListener for NullListener {
    fn cart_changed(&self, _state: &CartState, _totals: &CartTotals) {}
}

/// Logs every persisted cart change at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl CartListener for TracingListener {
    fn cart_changed(&self, state: &CartState, totals: &CartTotals) {
        tracing::debug!(
            items = state.cart.item_count(),
            promotion = state.promotion.as_ref().map(|promo| promo.code.as_str()),
            total = %totals.total,
            "cart changed"
        );
    }
}

/// Session-backed store used by the live handlers.
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore {
    async fn load(&self) -> Result<CartState, StoreError> {
        let cart: Cart = self.session.get(keys::CART).await?.unwrap_or_default();
        let promotion: Option<Promotion> = self.session.get(keys::APPLIED_PROMOTION).await?;
        Ok(CartState { cart, promotion })
    }

    async fn save(&self, state: &CartState) -> Result<(), StoreError> {
        self.session.insert(keys::CART, &state.cart).await?;
        match &state.promotion {
            Some(promotion) => {
                self.session
                    .insert(keys::APPLIED_PROMOTION, promotion)
                    .await?;
            }
            None => {
                self.session
                    .remove::<Promotion>(keys::APPLIED_PROMOTION)
                    .await?;
            }
        }
        Ok(())
    }
}

/// In-memory store for unit tests and listeners wired up without a session.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    state: std::sync::Mutex<CartState>,
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Result<CartState, StoreError> {
        let guard = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    async fn save(&self, state: &CartState) -> Result<(), StoreError> {
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = state.clone();
        Ok(())
    }
}

/// Cart operations over a store, with change notification.
pub struct CartService<S: CartStore> {
    store: S,
    listeners: Vec<Arc<dyn CartListener>>,
}

impl CartService<SessionCartStore> {
    /// Service over the request's session, with change logging attached.
    #[must_use]
    pub fn for_session(session: Session) -> Self {
        Self::new(SessionCartStore::new(session)).with_listener(Arc::new(TracingListener))
    }
}

impl<S: CartStore> CartService<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn CartListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub async fn state(&self) -> Result<CartState, StoreError> {
        self.store.load().await
    }

    /// Current state plus its pricing breakdown. Read-only; nothing is
    /// persisted and no listeners fire.
    pub async fn quote(&self) -> Result<(CartState, CartTotals), StoreError> {
        let state = self.store.load().await?;
        let totals = pricing::quote(state.cart.lines(), state.promotion.as_ref());
        Ok((state, totals))
    }

    /// Add a line, merging quantities with any existing line for the same
    /// product.
    pub async fn add_line(&self, line: CartLine) -> Result<(CartState, CartTotals), StoreError> {
        self.mutate(|state| state.cart.add_line(line)).await
    }

    /// Set a line's quantity; zero removes the line. Unknown products are
    /// ignored.
    pub async fn set_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(CartState, CartTotals), StoreError> {
        self.mutate(|state| state.cart.set_quantity(product_id, quantity))
            .await
    }

    pub async fn remove_line(
        &self,
        product_id: ProductId,
    ) -> Result<(CartState, CartTotals), StoreError> {
        self.mutate(|state| state.cart.remove_line(product_id))
            .await
    }

    pub async fn apply_promotion(
        &self,
        promotion: Promotion,
    ) -> Result<(CartState, CartTotals), StoreError> {
        self.mutate(|state| state.promotion = Some(promotion))
            .await
    }

    pub async fn clear_promotion(&self) -> Result<(CartState, CartTotals), StoreError> {
        self.mutate(|state| state.promotion = None).await
    }

    /// Empty the cart and drop the promotion (used after checkout).
    pub async fn clear(&self) -> Result<(CartState, CartTotals), StoreError> {
        self.mutate(|state| *state = CartState::default()).await
    }

    async fn mutate(
        &self,
        apply: impl FnOnce(&mut CartState),
    ) -> Result<(CartState, CartTotals), StoreError> {
        let mut state = self.store.load().await?;
        apply(&mut state);
        self.store.save(&state).await?;

        let totals = pricing::quote(state.cart.lines(), state.promotion.as_ref());
        for listener in &self.listeners {
            listener.cart_changed(&state, &totals);
        }
        Ok((state, totals))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use robusta_core::types::Money;
    use rust_decimal::Decimal;

    use super::*;

    fn line(id: i64, price: i64, quantity: u32) -> CartLine {
        CartLine::new(
            ProductId::new(id),
            format!("product {id}"),
            Money::new(price),
            quantity,
        )
    }

    fn service() -> CartService<MemoryCartStore> {
        CartService::new(MemoryCartStore::default())
    }

    #[derive(Default)]
    struct CountingListener {
        calls: AtomicU32,
        last_total: std::sync::Mutex<Option<Money>>,
    }

    impl CartListener for CountingListener {
        fn cart_changed(&self, _state: &CartState, totals: &CartTotals) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_total.lock().unwrap() = Some(totals.total);
        }
    }

    #[tokio::test]
    async fn test_add_merges_and_persists() {
        let service = service();
        service.add_line(line(1, 45_000, 1)).await.unwrap();
        let (state, totals) = service.add_line(line(1, 45_000, 2)).await.unwrap();

        assert_eq!(state.cart.lines().len(), 1);
        assert_eq!(state.cart.item_count(), 3);
        assert_eq!(totals.subtotal, Money::new(135_000));

        // A fresh read sees the persisted state.
        let (reloaded, _) = service.quote().await.unwrap();
        assert_eq!(reloaded, state);
    }

    #[tokio::test]
    async fn test_set_quantity_zero_removes() {
        let service = service();
        service.add_line(line(1, 45_000, 2)).await.unwrap();
        let (state, totals) = service
            .set_quantity(ProductId::new(1), 0)
            .await
            .unwrap();

        assert!(state.cart.is_empty());
        assert_eq!(totals, CartTotals::default());
    }

    #[tokio::test]
    async fn test_promotion_survives_line_changes() {
        let service = service();
        let promo = Promotion::percentage("P10", Decimal::from(10u32), None);
        service.apply_promotion(promo.clone()).await.unwrap();
        let (state, totals) = service.add_line(line(1, 100_000, 1)).await.unwrap();

        assert_eq!(state.promotion, Some(promo));
        assert_eq!(totals.discount, Money::new(10_000));
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let service = service();
        service.add_line(line(1, 45_000, 2)).await.unwrap();
        service
            .apply_promotion(Promotion::fixed("F", Money::new(5_000)))
            .await
            .unwrap();

        let (state, _) = service.clear().await.unwrap();
        assert_eq!(state, CartState::default());
    }

    #[tokio::test]
    async fn test_listeners_fire_after_every_mutation() {
        let listener = Arc::new(CountingListener::default());
        let service = service().with_listener(listener.clone());

        service.add_line(line(1, 45_000, 1)).await.unwrap();
        service.set_quantity(ProductId::new(1), 2).await.unwrap();
        service.remove_line(ProductId::new(1)).await.unwrap();

        assert_eq!(listener.calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            *listener.last_total.lock().unwrap(),
            Some(Money::ZERO)
        );
    }

    #[tokio::test]
    async fn test_null_listener_is_inert() {
        let service = service().with_listener(Arc::new(NullListener));
        let (state, totals) = service.add_line(line(1, 45_000, 2)).await.unwrap();

        assert_eq!(state.cart.item_count(), 2);
        assert_eq!(totals.subtotal, Money::new(90_000));
    }

    #[tokio::test]
    async fn test_quote_does_not_notify() {
        let listener = Arc::new(CountingListener::default());
        let service = service().with_listener(listener.clone());

        service.quote().await.unwrap();
        assert_eq!(listener.calls.load(Ordering::SeqCst), 0);
    }
}
