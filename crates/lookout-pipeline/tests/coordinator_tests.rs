use lookout_base::PixelGrid;
use lookout_frame::{CaptureFrame, RawFrame};
use lookout_infer::{BoundingBox, InferError, Prediction, PredictionSet};
use lookout_pipeline::{Infer, PipelineConfig, PipelineCoordinator};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

// Mock capture frame: a valid 2x2 gray 4:2:0 frame that counts releases
// the way a ring-buffer capture source reclaims slots.
struct MockFrame {
    luma: Vec<u8>,
    chroma: Vec<u8>,
    width: usize,
    height: usize,
    released: Arc<AtomicUsize>,
}

impl MockFrame {
    fn valid(released: &Arc<AtomicUsize>) -> Self {
        Self {
            luma: vec![235; 4],
            chroma: vec![128; 1],
            width: 2,
            height: 2,
            released: released.clone(),
        }
    }

    // Luma plane too short for the declared geometry
    fn truncated(released: &Arc<AtomicUsize>) -> Self {
        Self {
            luma: vec![235; 2],
            chroma: vec![128; 1],
            width: 2,
            height: 2,
            released: released.clone(),
        }
    }
}

impl CaptureFrame for MockFrame {
    fn view(&self) -> RawFrame<'_> {
        RawFrame::new(
            &self.luma,
            &self.chroma,
            &self.chroma,
            self.width,
            self.height,
            self.width,
        )
    }

    fn release(self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

fn prediction_set(name: &str) -> PredictionSet {
    PredictionSet::new(vec![Prediction {
        class_name: name.to_string(),
        confidence: 0.5,
        bounding_box: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
    }])
}

// Scripted inference backend: call N follows plan entry N (clamped to the
// last entry). `None` entries fail with a network error.
#[derive(Clone)]
struct StubInfer {
    plan: Arc<Vec<(Duration, Option<PredictionSet>)>>,
    calls: Arc<AtomicUsize>,
    current: Arc<AtomicUsize>,
    max_concurrent: Arc<AtomicUsize>,
}

impl StubInfer {
    fn new(plan: Vec<(Duration, Option<PredictionSet>)>) -> Self {
        Self {
            plan: Arc::new(plan),
            calls: Arc::new(AtomicUsize::new(0)),
            current: Arc::new(AtomicUsize::new(0)),
            max_concurrent: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Infer for StubInfer {
    fn infer(
        &self,
        _grid: PixelGrid,
    ) -> impl Future<Output = Result<PredictionSet, InferError>> + Send {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let plan = Arc::clone(&self.plan);
        let current = Arc::clone(&self.current);
        let max_concurrent = Arc::clone(&self.max_concurrent);

        async move {
            let now = current.fetch_add(1, Ordering::SeqCst) + 1;
            max_concurrent.fetch_max(now, Ordering::SeqCst);

            let (delay, result) = plan[index.min(plan.len() - 1)].clone();
            sleep(delay).await;

            current.fetch_sub(1, Ordering::SeqCst);
            match result {
                Some(set) => Ok(set),
                None => Err(InferError::Network("stub offline".to_string())),
            }
        }
    }
}

async fn wait_for_idle<C: Infer>(coordinator: &PipelineCoordinator<C>) {
    for _ in 0..200 {
        if coordinator.in_flight() == 0 {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("pipeline did not drain");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_limit_never_exceeded() {
    let stub = StubInfer::new(vec![(Duration::from_millis(200), Some(prediction_set("only")))]);
    let coordinator = PipelineCoordinator::new(
        stub.clone(),
        PipelineConfig::default().with_max_in_flight(1),
    );

    let released = Arc::new(AtomicUsize::new(0));
    for _ in 0..5 {
        coordinator.submit(MockFrame::valid(&released));
    }

    assert!(coordinator.in_flight() <= 1);
    wait_for_idle(&coordinator).await;

    assert_eq!(stub.max_concurrent.load(Ordering::SeqCst), 1);
    let stats = coordinator.stats();
    assert_eq!(stats.submitted, 5);
    assert_eq!(stats.dispatched, 1);
    assert_eq!(stats.dropped_busy, 4);
    // Every frame went back to the capture source, dropped or not
    assert_eq!(released.load(Ordering::SeqCst), 5);

    // A slot is free again, so the next frame is admitted
    coordinator.submit(MockFrame::valid(&released));
    wait_for_idle(&coordinator).await;
    assert_eq!(coordinator.stats().dispatched, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_write_wins_by_completion_order() {
    // First submission completes last; its result must win
    let stub = StubInfer::new(vec![
        (Duration::from_millis(300), Some(prediction_set("slow"))),
        (Duration::from_millis(50), Some(prediction_set("fast"))),
    ]);
    let coordinator = PipelineCoordinator::new(
        stub,
        PipelineConfig::default().with_max_in_flight(2),
    );

    let released = Arc::new(AtomicUsize::new(0));
    coordinator.submit(MockFrame::valid(&released));
    coordinator.submit(MockFrame::valid(&released));

    // Mid-flight the fast result is visible
    sleep(Duration::from_millis(150)).await;
    let mid = coordinator.latest().expect("fast result published");
    assert_eq!(mid.predictions().predictions()[0].class_name, "fast");

    wait_for_idle(&coordinator).await;
    let last = coordinator.latest().expect("slow result published");
    assert_eq!(last.predictions().predictions()[0].class_name, "slow");
    assert_eq!(coordinator.stats().completed, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failure_keeps_previous_snapshot_and_arms_backoff() {
    let stub = StubInfer::new(vec![
        (Duration::from_millis(10), Some(prediction_set("good"))),
        (Duration::from_millis(10), None),
    ]);
    let coordinator = PipelineCoordinator::new(
        stub.clone(),
        PipelineConfig::default().with_failure_backoff(Duration::from_millis(200)),
    );

    let released = Arc::new(AtomicUsize::new(0));

    coordinator.submit(MockFrame::valid(&released));
    wait_for_idle(&coordinator).await;
    assert!(coordinator.latest().is_some());

    // Failing inference: previously retained snapshot must survive
    coordinator.submit(MockFrame::valid(&released));
    wait_for_idle(&coordinator).await;
    let snapshot = coordinator.latest().expect("snapshot retained");
    assert_eq!(snapshot.predictions().predictions()[0].class_name, "good");
    assert_eq!(coordinator.stats().failed, 1);

    // Inside the backoff window frames are dropped without a call
    coordinator.submit(MockFrame::valid(&released));
    assert_eq!(coordinator.stats().dropped_backoff, 1);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 2);

    // After the window expires admission reopens
    sleep(Duration::from_millis(300)).await;
    coordinator.submit(MockFrame::valid(&released));
    wait_for_idle(&coordinator).await;
    assert_eq!(stub.calls.load(Ordering::SeqCst), 3);

    assert_eq!(released.load(Ordering::SeqCst), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_decode_failure_is_contained() {
    let stub = StubInfer::new(vec![(Duration::from_millis(10), Some(prediction_set("ok")))]);
    let coordinator = PipelineCoordinator::new(stub.clone(), PipelineConfig::default());

    let released = Arc::new(AtomicUsize::new(0));

    coordinator.submit(MockFrame::truncated(&released));
    assert_eq!(coordinator.stats().decode_failures, 1);
    assert_eq!(coordinator.in_flight(), 0);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    assert_eq!(released.load(Ordering::SeqCst), 1);
    assert!(coordinator.latest().is_none());

    // One bad frame never affects the next one
    coordinator.submit(MockFrame::valid(&released));
    wait_for_idle(&coordinator).await;
    assert_eq!(coordinator.stats().completed, 1);
    assert!(coordinator.latest().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_staleness_indicator() {
    let stub = StubInfer::new(vec![(Duration::from_millis(10), Some(prediction_set("ok")))]);
    let coordinator = PipelineCoordinator::new(
        stub,
        PipelineConfig::default().with_staleness_threshold(Duration::from_millis(100)),
    );

    // Nothing published yet counts as stale
    assert!(coordinator.is_stale());

    let released = Arc::new(AtomicUsize::new(0));
    coordinator.submit(MockFrame::valid(&released));
    wait_for_idle(&coordinator).await;
    assert!(!coordinator.is_stale());

    sleep(Duration::from_millis(200)).await;
    assert!(coordinator.is_stale());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_subscribe_sees_new_snapshots() {
    let stub = StubInfer::new(vec![(Duration::from_millis(10), Some(prediction_set("push")))]);
    let coordinator = PipelineCoordinator::new(stub, PipelineConfig::default());
    let mut receiver = coordinator.subscribe();

    let released = Arc::new(AtomicUsize::new(0));
    coordinator.submit(MockFrame::valid(&released));

    receiver.changed().await.unwrap();
    let snapshot = receiver.borrow().clone().expect("published snapshot");
    assert_eq!(snapshot.predictions().predictions()[0].class_name, "push");
}
