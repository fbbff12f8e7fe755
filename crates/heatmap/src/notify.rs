//! Pollutant-change notification.
//!
//! Multicast fan-out of pollutant-code strings over a broadcast
//! channel. Late subscribers only see emissions after they subscribe.

use tokio::sync::broadcast;
use tracing::trace;

const CHANNEL_CAPACITY: usize = 16;

/// Broadcast sender for pollutant selection changes.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<String>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Register a new subscriber. Prior emissions are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Emit a pollutant code to all current subscribers.
    /// Having no subscribers is not an error.
    pub fn emit(&self, code: &str) {
        if self.sender.send(code.to_string()).is_err() {
            trace!(code = %code, "No subscribers for pollutant change");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_receive_emissions() {
        let notifier = ChangeNotifier::new();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();

        notifier.emit("NO2");

        assert_eq!(a.try_recv().unwrap(), "NO2");
        assert_eq!(b.try_recv().unwrap(), "NO2");
    }

    #[test]
    fn test_late_subscribers_miss_prior_emissions() {
        let notifier = ChangeNotifier::new();
        let mut early = notifier.subscribe();

        notifier.emit("SO2");
        let mut late = notifier.subscribe();
        notifier.emit("CH4");

        assert_eq!(early.try_recv().unwrap(), "SO2");
        assert_eq!(early.try_recv().unwrap(), "CH4");
        assert_eq!(late.try_recv().unwrap(), "CH4");
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn test_emit_without_subscribers_is_fine() {
        let notifier = ChangeNotifier::new();
        notifier.emit("CO");
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
