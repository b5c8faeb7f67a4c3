//! Playback driver loop
//!
//! Pumps the scrubber's scheduled wakeups on the current-thread runtime:
//! sleep until the earliest pending deadline, then deliver everything due.
//! The sleep is bounded so wakeups scheduled while idle are picked up
//! promptly.

use std::sync::Arc;
use std::time::{Duration, Instant};

use aq_core::Scrubber;

const IDLE_POLL: Duration = Duration::from_millis(25);

/// Drive the scrubber until the surrounding task is cancelled
pub async fn drive(scrubber: Arc<Scrubber>) {
    loop {
        let wait = match scrubber.next_deadline() {
            Some(deadline) => deadline
                .saturating_duration_since(Instant::now())
                .min(IDLE_POLL),
            None => IDLE_POLL,
        };
        tokio::time::sleep(wait).await;
        scrubber.pump(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::{FrameSubscriber, Scheduler, ScrubberConfig, SystemClock, Year};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Counter {
        seen: Mutex<Vec<Year>>,
    }

    impl FrameSubscriber for Counter {
        fn on_frame_change(&self, value: Year) {
            self.seen.lock().push(value);
        }
    }

    #[tokio::test]
    async fn drives_interval_playback_in_real_time() {
        let scheduler = Arc::new(Scheduler::new(Arc::new(SystemClock)));
        let scrubber = Arc::new(
            Scrubber::new(
                vec![2010, 2011, 2012],
                ScrubberConfig {
                    delay_ms: Some(5),
                    ..ScrubberConfig::default()
                },
                scheduler,
            )
            .unwrap(),
        );
        let counter = Arc::new(Counter::default());
        scrubber.subscribe(counter.clone());

        let handle = tokio::spawn(drive(scrubber.clone()));
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();
        scrubber.stop();

        // 200 ms at a 5 ms period leaves generous room for at least a
        // couple of advancements on a loaded machine.
        assert!(counter.seen.lock().len() >= 2);
    }

    #[tokio::test]
    async fn stopped_scrubber_is_not_advanced() {
        let scheduler = Arc::new(Scheduler::new(Arc::new(SystemClock)));
        let scrubber = Arc::new(
            Scrubber::new(
                vec![2010, 2011, 2012],
                ScrubberConfig {
                    delay_ms: Some(5),
                    autoplay: false,
                    ..ScrubberConfig::default()
                },
                scheduler,
            )
            .unwrap(),
        );
        let counter = Arc::new(Counter::default());
        scrubber.subscribe(counter.clone());

        let handle = tokio::spawn(drive(scrubber.clone()));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert!(counter.seen.lock().is_empty());
    }
}
