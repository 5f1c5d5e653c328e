use tokio::sync::watch;

/// A published piece of state with a subscribe/notify contract.
///
/// The rendering layer subscribes and re-renders on change; the owning
/// service publishes new snapshots. Built on a watch channel so late
/// subscribers immediately see the current value and slow subscribers
/// only ever observe the latest snapshot.
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the current value and notify subscribers.
    pub fn publish(&self, value: T) {
        // send_replace never fails even with zero subscribers.
        self.tx.send_replace(value);
    }

    /// Mutate the current value in place and notify subscribers.
    pub fn modify(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_notifies_subscriber() {
        let cell = StateCell::new(0u32);
        let mut rx = cell.subscribe();

        cell.publish(7);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 7);
        assert_eq!(cell.get(), 7);
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_current_value() {
        let cell = StateCell::new("a".to_string());
        cell.publish("b".to_string());

        let rx = cell.subscribe();
        assert_eq!(*rx.borrow(), "b");
    }

    #[tokio::test]
    async fn test_modify_in_place() {
        let cell = StateCell::new(vec![1, 2]);
        cell.modify(|v| v.push(3));
        assert_eq!(cell.get(), vec![1, 2, 3]);
    }
}
