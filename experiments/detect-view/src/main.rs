use lookout_base::log;
use lookout_frame::{CaptureFrame, RawFrame};
use lookout_infer::{InferConfig, InferenceClient};
use lookout_pipeline::{PipelineConfig, PipelineCoordinator};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3800";
const WIDTH: usize = 320;
const HEIGHT: usize = 240;
const FPS: u64 = 10;

/// Synthetic capture frame: owned planes standing in for a camera buffer.
struct SyntheticFrame {
    luma: Vec<u8>,
    chroma_u: Vec<u8>,
    chroma_v: Vec<u8>,
}

impl CaptureFrame for SyntheticFrame {
    fn view(&self) -> RawFrame<'_> {
        RawFrame::new(
            &self.luma,
            &self.chroma_u,
            &self.chroma_v,
            WIDTH,
            HEIGHT,
            WIDTH,
        )
    }

    fn release(self) {}
}

/// Gray scene with a bright square sweeping left to right, so a detection
/// server watching the stream has something that moves.
fn synthesize(tick: usize) -> SyntheticFrame {
    let mut luma = vec![96u8; WIDTH * HEIGHT];
    let size = HEIGHT / 4;
    let x0 = (tick * 4) % (WIDTH - size);
    let y0 = (HEIGHT - size) / 2;

    for y in y0..y0 + size {
        for x in x0..x0 + size {
            luma[y * WIDTH + x] = 220;
        }
    }

    let chroma_len = (WIDTH / 2) * (HEIGHT / 2);
    SyntheticFrame {
        luma,
        chroma_u: vec![128; chroma_len],
        chroma_v: vec![128; chroma_len],
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    lookout_base::init_stdout_logger();

    // Parse endpoint from args or use default
    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    log::info!("Detect View");
    log::info!("Endpoint: {}", endpoint);
    log::info!("Synthetic source: {}x{} at {} fps", WIDTH, HEIGHT, FPS);

    let client = InferenceClient::new(InferConfig::default().with_endpoint(endpoint))?;
    let coordinator = Arc::new(PipelineCoordinator::new(client, PipelineConfig::default()));

    // Overlay consumer: log what a renderer would draw
    let mut updates = coordinator.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let Some(snapshot) = updates.borrow_and_update().clone() else {
                continue;
            };
            if snapshot.predictions().is_empty() {
                log::info!("no detections");
                continue;
            }
            for p in snapshot.predictions() {
                let bb = p.bounding_box;
                log::info!(
                    "{} ({:.0}%) at ({:.0},{:.0})-({:.0},{:.0})",
                    p.class_name,
                    p.confidence * 100.0,
                    bb.x1,
                    bb.y1,
                    bb.x2,
                    bb.y2
                );
            }
        }
    });

    let mut ticker = tokio::time::interval(Duration::from_millis(1000 / FPS));
    let mut tick = 0usize;

    loop {
        ticker.tick().await;
        coordinator.submit(synthesize(tick));
        tick += 1;

        if tick % 50 == 0 {
            let stats = coordinator.stats();
            log::info!(
                "submitted {} dispatched {} completed {} failed {} stale: {}",
                stats.submitted,
                stats.dispatched,
                stats.completed,
                stats.failed,
                coordinator.is_stale()
            );
        }
    }
}
