use crate::stats::StatsCounters;
use crate::{Infer, PipelineConfig, PipelineStats, Snapshot};
use lookout_frame::{CaptureFrame, decode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::watch;

/// Owns the lifecycle of one inference dispatch per accepted frame.
///
/// Admission is freshness-over-completeness: a frame arriving while every
/// in-flight slot is taken (or while a failure backoff window is open) is
/// dropped on the spot, never queued. Completed inferences publish
/// last-write-wins by arrival order, so after variable network latency the
/// published snapshot is the most recently *completed* inference, which is
/// not necessarily the one for the most recently captured frame.
///
/// No inference or decode failure is ever fatal. Each one is logged and
/// counted, and the frame's result is simply omitted.
pub struct PipelineCoordinator<C: Infer> {
    client: Arc<C>,
    config: PipelineConfig,
    in_flight: Arc<AtomicUsize>,
    backoff_until: Arc<Mutex<Option<Instant>>>,
    stats: Arc<StatsCounters>,
    latest: watch::Sender<Option<Arc<Snapshot>>>,
}

impl<C: Infer> PipelineCoordinator<C> {
    pub fn new(client: C, config: PipelineConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
            in_flight: Arc::new(AtomicUsize::new(0)),
            backoff_until: Arc::new(Mutex::new(None)),
            stats: Arc::new(StatsCounters::default()),
            latest: watch::Sender::new(None),
        }
    }

    /// Accept one frame from the capture source.
    ///
    /// The frame's backing buffers are always released before this method
    /// returns, whether the frame is dispatched or dropped. Must be called
    /// from within a tokio runtime; accepted frames are decoded here and
    /// the network round trip runs on a spawned task.
    pub fn submit<F: CaptureFrame>(&self, frame: F) {
        self.stats.submitted.fetch_add(1, Ordering::Relaxed);

        if self.in_backoff() {
            self.stats.dropped_backoff.fetch_add(1, Ordering::Relaxed);
            frame.release();
            log::debug!("dropping frame: failure backoff active");
            return;
        }

        let Some(slot) = InFlightSlot::acquire(&self.in_flight, self.config.max_in_flight()) else {
            self.stats.dropped_busy.fetch_add(1, Ordering::Relaxed);
            frame.release();
            log::debug!(
                "dropping frame: {} of {} requests in flight",
                self.in_flight.load(Ordering::SeqCst),
                self.config.max_in_flight()
            );
            return;
        };

        let decoded = decode(&frame.view());
        frame.release();

        let grid = match decoded {
            Ok(grid) => grid,
            Err(err) => {
                self.stats.decode_failures.fetch_add(1, Ordering::Relaxed);
                log::warn!("frame decode failed: {err}");
                return;
            }
        };

        self.stats.dispatched.fetch_add(1, Ordering::Relaxed);

        let client = Arc::clone(&self.client);
        let stats = Arc::clone(&self.stats);
        let latest = self.latest.clone();
        let backoff_until = Arc::clone(&self.backoff_until);
        let backoff = self.config.failure_backoff();

        tokio::spawn(async move {
            // Slot stays taken until this task finishes, success or not.
            let _slot = slot;

            match client.infer(grid).await {
                Ok(predictions) => {
                    stats.completed.fetch_add(1, Ordering::Relaxed);
                    latest.send_replace(Some(Arc::new(Snapshot::new(predictions))));
                }
                Err(err) => {
                    stats.failed.fetch_add(1, Ordering::Relaxed);
                    log::warn!("inference failed: {err}");
                    if !backoff.is_zero() {
                        let mut until =
                            backoff_until.lock().unwrap_or_else(|e| e.into_inner());
                        *until = Some(Instant::now() + backoff);
                    }
                }
            }
        });
    }

    /// The most recently published prediction snapshot, if any.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.latest.borrow().clone()
    }

    /// Receiver that wakes whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.latest.subscribe()
    }

    /// Whether the published snapshot is older than the configured
    /// staleness threshold (or nothing has been published yet). Renderers
    /// use this to flag that the overlay has stopped updating.
    pub fn is_stale(&self) -> bool {
        match self.latest() {
            Some(snapshot) => snapshot.age() > self.config.staleness_threshold(),
            None => true,
        }
    }

    /// Number of inference requests currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats.snapshot()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn in_backoff(&self) -> bool {
        let until = self.backoff_until.lock().unwrap_or_else(|e| e.into_inner());
        until.is_some_and(|t| Instant::now() < t)
    }
}

/// One occupied admission slot; the count drops when the worker task
/// finishes with it.
struct InFlightSlot {
    counter: Arc<AtomicUsize>,
}

impl InFlightSlot {
    fn acquire(counter: &Arc<AtomicUsize>, limit: usize) -> Option<Self> {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < limit).then_some(n + 1)
            })
            .ok()
            .map(|_| Self {
                counter: Arc::clone(counter),
            })
    }
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
