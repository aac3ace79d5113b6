//! Shutdown coordination for the server.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Cloning yields another handle on the same signal; the server task holds
/// one, the signal listener (or a test) holds another and triggers it.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal. Without subscribers this is a no-op.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Resolves once the signal fires, for `with_graceful_shutdown`.
    ///
    /// The receiver is taken now, so a trigger between this call and the
    /// first poll is not lost.
    pub fn signalled(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut rx = self.subscribe();
        async move {
            // A closed channel means every sender is gone; treat it as a trigger.
            let _ = rx.recv().await;
        }
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_every_waiter() {
        let shutdown = Shutdown::new();
        let first = shutdown.signalled();
        let second = shutdown.clone().signalled();
        assert_eq!(shutdown.receiver_count(), 2);

        shutdown.trigger();
        first.await;
        second.await;
    }

    #[test]
    fn test_trigger_without_waiters_is_harmless() {
        Shutdown::new().trigger();
    }
}
