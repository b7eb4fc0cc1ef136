use std::time::Duration;

use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

/// Delay between a submission notification and the navigation that follows it.
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(1500);

/// How long a submitted draft is kept after its navigation fires, waiting for
/// the browser to follow it.
pub const HANDOFF_GRACE: Duration = Duration::from_secs(30);

/// Pages this screen hands the supplier over to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Supplier's product listing, reached after publishing.
    ProductListing,
    /// Supplier dashboard, reached after saving a draft or going back.
    Dashboard,
}

/// One-shot navigation scheduled after a submission.
///
/// Clones share the same cancellation state, so cancelling any handle stops
/// every waiter.
#[derive(Debug, Clone)]
pub struct PendingNavigation {
    destination: Destination,
    delay: Duration,
    scheduled_at: Instant,
    token: CancellationToken,
}

impl PendingNavigation {
    /// Schedule navigation to `destination` once `delay` has elapsed.
    pub fn schedule(destination: Destination, delay: Duration) -> Self {
        Self {
            destination,
            delay,
            scheduled_at: Instant::now(),
            token: CancellationToken::new(),
        }
    }

    pub fn destination(&self) -> Destination {
        self.destination
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Time left before the navigation fires, zero once it is due.
    pub fn remaining(&self) -> Duration {
        self.delay.saturating_sub(self.scheduled_at.elapsed())
    }

    /// The delay has elapsed and nobody cancelled the navigation.
    pub fn is_due(&self) -> bool {
        !self.is_cancelled() && self.remaining().is_zero()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the timer.
    ///
    /// Resolves to the destination when the delay elapses, or `None` if the
    /// navigation was cancelled first.
    pub async fn fired(&self) -> Option<Destination> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            _ = sleep(self.remaining()) => Some(self.destination),
        }
    }
}
