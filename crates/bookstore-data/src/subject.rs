//! Single-slot observable store.
//!
//! A [`Subject`] holds the most recent value of something the service has
//! fetched. Writers replace the value wholesale; any number of subscribers
//! see the current value on subscription and every replacement after it.
//! Concurrent writers race and the last write wins.

use std::sync::Arc;

use tokio::sync::watch;

/// Latest-value broadcast store.
#[derive(Debug)]
pub struct Subject<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> Subject<T> {
    /// Create a subject holding `initial`.
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Replace the value and notify subscribers, returning the previous value.
    pub fn replace(&self, value: T) -> T {
        self.sender.send_replace(value)
    }

    /// Subscribe to the current value and later replacements.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Read the current value without cloning it.
    pub fn with_current<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }
}

impl<T: Clone> Subject<T> {
    /// Clone out the current value.
    pub fn current(&self) -> T {
        self.sender.borrow().clone()
    }
}

impl<T: Default> Default for Subject<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_returns_previous() {
        let subject = Subject::new(vec![1]);
        assert_eq!(subject.replace(vec![2, 3]), vec![1]);
        assert_eq!(subject.current(), vec![2, 3]);
    }

    #[test]
    fn test_new_subscriber_sees_current_value() {
        let subject = Subject::new("first".to_string());
        subject.replace("second".to_string());

        let rx = subject.subscribe();
        assert_eq!(*rx.borrow(), "second");
        assert_eq!(subject.subscriber_count(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let subject: Subject<Vec<u8>> = Subject::default();
        let other = subject.clone();
        other.replace(vec![9]);
        assert_eq!(subject.with_current(|v| v.len()), 1);
    }

    #[tokio::test]
    async fn test_subscriber_is_notified_of_replacement() {
        let subject = Subject::new(0u32);
        let mut rx = subject.subscribe();

        let writer = subject.clone();
        tokio::spawn(async move {
            writer.replace(7);
        });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 7);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let subject = Subject::new(0u32);
        let mut rx = subject.subscribe();
        subject.replace(1);
        subject.replace(2);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);
        assert!(!rx.has_changed().unwrap());
    }
}
