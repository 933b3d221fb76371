//! Carts held in server memory, one per operator session.
//!
//! The session cookie only carries a cart id. Every change to a cart runs
//! while holding that cart's lock, so simultaneous posts from one session
//! (a double tap, two tabs) are applied one after the other.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use till_core::Cart;

/// In-memory carts keyed by the id stored in each session.
///
/// Entries idle for longer than the session expiry are evicted, so a cart
/// never outlives the session that points at it.
#[derive(Clone)]
pub struct CartStore {
    carts: Cache<Uuid, Arc<Mutex<Cart>>>,
}

impl CartStore {
    /// Create an empty store that drops carts after `idle` without use.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        let carts = Cache::builder().time_to_idle(idle).build();
        Self { carts }
    }

    /// A copy of the cart, or an empty cart if `id` is unknown.
    pub async fn snapshot(&self, id: Uuid) -> Cart {
        match self.carts.get(&id).await {
            Some(cart) => cart.lock().await.clone(),
            None => Cart::new(),
        }
    }

    /// Run `change` with exclusive access to the cart, creating it first if
    /// `id` is unknown.
    pub async fn update<R>(&self, id: Uuid, change: impl FnOnce(&mut Cart) -> R) -> R {
        let cart = self
            .carts
            .get_with(id, async { Arc::new(Mutex::new(Cart::new())) })
            .await;
        let mut cart = cart.lock().await;
        change(&mut cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use till_core::{Price, Product};

    fn espresso() -> Product {
        Product::new("1", "Espresso", Price::kes(180), "coffee", "/espresso.jpg")
    }

    #[tokio::test]
    async fn test_unknown_id_is_empty_and_not_created() {
        let store = CartStore::new(Duration::from_secs(60));
        let id = Uuid::new_v4();
        assert!(store.snapshot(id).await.is_empty());
        assert!(store.carts.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_updates_are_kept_per_id() {
        let store = CartStore::new(Duration::from_secs(60));
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

        store.update(first, |cart| cart.add(&espresso())).await;
        store.update(first, |cart| cart.add(&espresso())).await;

        assert_eq!(store.snapshot(first).await.item_count(), 2);
        assert!(store.snapshot(second).await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_are_not_lost() {
        let store = CartStore::new(Duration::from_secs(60));
        let id = Uuid::new_v4();

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.update(id, |cart| cart.add(&espresso())).await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let cart = store.snapshot(id).await;
        assert_eq!(cart.item_count(), 50);
        assert_eq!(cart.total(), Price::kes(9000));
    }
}
