//! Periodic tick scheduling on the tokio runtime.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use facilitywatch_types::StatusLabel;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::SchedulerError;
use crate::random::StepSource;
use crate::simulation::Simulation;

type SharedSteps = Arc<Mutex<Box<dyn StepSource>>>;

/// Whether a scheduler is currently firing ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Drives a [`Simulation`] at a fixed interval.
///
/// The first tick fires one full interval after [`start`](Self::start).
/// Ticks never overlap: each runs to completion on the scheduler task before
/// the timer is polled again. Dropping the scheduler stops it.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use facilitywatch_sim::{presets, RngSource, Scheduler, SchedulerState, Simulation};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let sim = Simulation::new("cafeteria", &presets::cafeteria_counters(), presets::cafeteria_profile())
///         .unwrap();
///     let mut scheduler = Scheduler::new(sim, Duration::from_millis(10), RngSource::seeded(1));
///
///     scheduler.start().unwrap();
///     assert_eq!(scheduler.state(), SchedulerState::Running);
///
///     scheduler.stop();
///     assert_eq!(scheduler.state(), SchedulerState::Idle);
/// }
/// ```
pub struct Scheduler<L: StatusLabel> {
    simulation: Simulation<L>,
    interval: Duration,
    rng: SharedSteps,
    running: Option<CancellationHandle>,
}

impl<L: StatusLabel> Scheduler<L> {
    pub fn new(simulation: Simulation<L>, interval: Duration, rng: impl StepSource + 'static) -> Self {
        Self {
            simulation,
            interval,
            rng: Arc::new(Mutex::new(Box::new(rng))),
            running: None,
        }
    }

    /// Begin firing ticks.
    ///
    /// Fails if the scheduler is already running, if the interval is zero or
    /// if there is no tokio runtime to spawn onto. A scheduler that was
    /// stopped may be started again; it keeps drawing from the same step
    /// source.
    pub fn start(&mut self) -> Result<CancellationHandle, SchedulerError> {
        if self.interval.is_zero() {
            return Err(SchedulerError::ZeroInterval);
        }
        if self.state() == SchedulerState::Running {
            return Err(SchedulerError::AlreadyRunning);
        }
        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let handle = CancellationHandle {
            stop_tx: Arc::new(stop_tx),
        };

        let simulation = self.simulation.clone();
        let rng = Arc::clone(&self.rng);
        let interval = self.interval;

        runtime.spawn(async move {
            let mut timer = time::interval_at(Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    // Fires on cancel, and on error once every handle is gone
                    _ = stop_rx.changed() => break,
                    _ = timer.tick() => {
                        simulation.tick(&mut **rng.lock());
                    }
                }
            }
            debug!("{} scheduler task exited", simulation.name());
        });

        info!("Started {} scheduler every {:?}", self.simulation.name(), interval);
        self.running = Some(handle.clone());
        Ok(handle)
    }

    /// Stop firing ticks. Safe to call while idle.
    ///
    /// No tick is scheduled after this returns; a tick already in flight
    /// completes and publishes.
    pub fn stop(&mut self) {
        if let Some(handle) = self.running.take() {
            if !handle.is_cancelled() {
                handle.cancel();
                info!("Stopped {} scheduler", self.simulation.name());
            }
        }
    }

    pub fn state(&self) -> SchedulerState {
        match &self.running {
            Some(handle) if !handle.is_cancelled() => SchedulerState::Running,
            _ => SchedulerState::Idle,
        }
    }

    /// Apply one tick immediately, outside the timer.
    pub fn tick_now(&self) -> u64 {
        self.simulation.tick(&mut **self.rng.lock())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn simulation(&self) -> &Simulation<L> {
        &self.simulation
    }
}

impl<L: StatusLabel> Drop for Scheduler<L> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<L: StatusLabel> fmt::Debug for Scheduler<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("simulation", &self.simulation.name())
            .field("interval", &self.interval)
            .field("state", &self.state())
            .finish()
    }
}

/// Stops a running scheduler from anywhere.
///
/// Clones share one cancellation; cancelling twice is harmless.
#[derive(Debug, Clone)]
pub struct CancellationHandle {
    stop_tx: Arc<watch::Sender<bool>>,
}

impl CancellationHandle {
    pub fn cancel(&self) {
        self.stop_tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.stop_tx.borrow()
    }
}
