//! Periodic display refresh.
//!
//! The poller runs one cycle immediately, then one every interval until
//! stopped. What a cycle does is up to the caller, which keeps the loop
//! independent of the surface it drives.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between the starts of consecutive cycles. A cycle that overruns
    /// delays the next one instead of causing a burst.
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
        }
    }
}

impl PollerConfig {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

/// Commands that can be sent to a running poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerCommand {
    /// Run a cycle now and restart the interval.
    RefreshNow,
    /// Stop after the current cycle.
    Stop,
}

/// Drives a refresh callback on a fixed interval.
pub struct Poller {
    config: PollerConfig,
    command_tx: mpsc::Sender<PollerCommand>,
    command_rx: mpsc::Receiver<PollerCommand>,
}

impl Poller {
    pub fn new(config: PollerConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(16);
        Self {
            config,
            command_tx,
            command_rx,
        }
    }

    /// Returns a handle for sending commands to the poller.
    pub fn handle(&self) -> PollerHandle {
        PollerHandle {
            command_tx: self.command_tx.clone(),
        }
    }

    /// Runs until stopped, calling `cycle_fn` once per tick.
    ///
    /// Also stops once every handle, including the poller's own, is gone.
    pub async fn run<F, Fut>(self, cycle_fn: F)
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ()>,
    {
        let Self {
            config,
            command_tx,
            mut command_rx,
        } = self;
        // Only handles keep the channel open from here on.
        drop(command_tx);

        info!(
            interval_secs = config.interval.as_secs(),
            "poller started"
        );

        let mut ticker =
            tokio::time::interval_at(Instant::now() + config.interval, config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        cycle_fn().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    debug!("scheduled refresh");
                    cycle_fn().await;
                }
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(PollerCommand::RefreshNow) => {
                            debug!("received RefreshNow command");
                            cycle_fn().await;
                            ticker.reset();
                        }
                        Some(PollerCommand::Stop) | None => {
                            info!("poller stopping");
                            break;
                        }
                    }
                }
            }
        }
    }
}

/// Handle for sending commands to a running poller.
#[derive(Clone, Debug)]
pub struct PollerHandle {
    command_tx: mpsc::Sender<PollerCommand>,
}

impl PollerHandle {
    /// Triggers an immediate refresh.
    pub async fn refresh_now(&self) -> Result<(), mpsc::error::SendError<PollerCommand>> {
        self.command_tx.send(PollerCommand::RefreshNow).await
    }

    /// Stops the poller.
    pub async fn stop(&self) -> Result<(), mpsc::error::SendError<PollerCommand>> {
        self.command_tx.send(PollerCommand::Stop).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_poller(
        interval: Duration,
    ) -> (Arc<AtomicU32>, PollerHandle, tokio::task::JoinHandle<()>) {
        let poller = Poller::new(PollerConfig::new(interval));
        let handle = poller.handle();
        let count = Arc::new(AtomicU32::new(0));
        let task_count = count.clone();

        let task = tokio::spawn(async move {
            poller
                .run(move || {
                    let count = task_count.clone();
                    async move {
                        count.fetch_add(1, Ordering::SeqCst);
                    }
                })
                .await;
        });

        (count, handle, task)
    }

    #[test]
    fn default_interval_is_five_minutes() {
        assert_eq!(PollerConfig::default().interval, Duration::from_secs(300));
    }

    #[tokio::test(start_paused = true)]
    async fn first_cycle_is_immediate_then_periodic() {
        let (count, handle, task) = counting_poller(Duration::from_secs(300));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        handle.stop().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn slow_cycles_keep_the_period() {
        let poller = Poller::new(PollerConfig::new(Duration::from_secs(300)));
        let handle = poller.handle();
        let count = Arc::new(AtomicU32::new(0));
        let task_count = count.clone();

        let task = tokio::spawn(async move {
            poller
                .run(move || {
                    let count = task_count.clone();
                    async move {
                        count.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_secs(100)).await;
                    }
                })
                .await;
        });

        // Cycles start at 0s, 300s and 600s even though each takes 100s.
        tokio::time::sleep(Duration::from_secs(650)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        handle.stop().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_now_runs_a_cycle() {
        let (count, handle, task) = counting_poller(Duration::from_secs(300));

        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.refresh_now().await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        handle.stop().await.unwrap();
        task.await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dropping_every_handle_stops() {
        let (_, handle, task) = counting_poller(Duration::from_secs(300));
        drop(handle);

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }
}
