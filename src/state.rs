//! Page-scoped hotel results shared between the listing controller and the
//! listing presentation.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::hotel::Hotel;

/// Result set published by the listing controller.
///
/// Created per page and handed to whoever renders it; cloning shares the same
/// underlying channel.
#[derive(Clone, Debug)]
pub struct HotelsState {
    tx: Arc<watch::Sender<Vec<Hotel>>>,
}

impl Default for HotelsState {
    fn default() -> Self {
        Self::new()
    }
}

impl HotelsState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx: Arc::new(tx) }
    }

    /// Replaces the result set and notifies subscribers, even when unchanged.
    pub fn set_hotels(&self, hotels: Vec<Hotel>) {
        self.tx.send_replace(hotels);
    }

    /// Snapshot of the current result set.
    pub fn hotels(&self) -> Vec<Hotel> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Hotel>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_every_publish() {
        let state = HotelsState::new();
        let mut rx = state.subscribe();

        state.set_hotels(vec![Hotel {
            name: Some("Azure".into()),
            ..Hotel::default()
        }]);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        state.set_hotels(Vec::new());
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_empty());
        assert!(state.hotels().is_empty());
    }
}
