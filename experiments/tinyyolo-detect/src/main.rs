use clap::Parser;
use std::path::{Path, PathBuf};
use tinyyolo_detect::repository::{LABEL_FILE, LABEL_URL, MODEL_NAME};
use tinyyolo_detect::{DetectionOverlay, WINDOW_TITLE};
use vista_base::log_fatal;
use vista_camera::V4l2Camera;
use vista_infer::assets::download_file;
use vista_infer::{Scaling, TinyYoloDecoder, TritonClient, load_labels};
use vista_pipeline::{CaptureArgs, PipelineConfig, Pipeliner, PreviewWindow, ServerArgs, init_logging};

/// Detect objects in camera frames with Tiny YOLOv2 on a Triton Inference Server.
#[derive(Parser, Debug)]
#[command(name = "tinyyolo-detect")]
struct Args {
    #[command(flatten)]
    capture: CaptureArgs,

    #[command(flatten)]
    server: ServerArgs,

    /// Class names, one per line; downloaded when missing
    #[arg(long, value_name = "PATH", default_value = LABEL_FILE)]
    labels: PathBuf,

    /// Minimum detection score
    #[arg(long, default_value_t = 0.3)]
    threshold: f32,
}

async fn labels(path: &Path) -> Vec<String> {
    let path = if path.exists() {
        path.to_path_buf()
    } else {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        match download_file(LABEL_URL, &dir).await {
            Ok(path) => path,
            Err(e) => {
                log::warn!("no label file: {e}");
                return Vec::new();
            }
        }
    };
    load_labels(&path).unwrap_or_else(|e| {
        log::warn!("{e}");
        Vec::new()
    })
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.capture.log_dir.as_deref());

    let client = match TritonClient::new(args.server.triton_config()) {
        Ok(client) => client,
        Err(e) => log_fatal!("{e}"),
    };
    let labels = labels(&args.labels).await;

    let model = match client.load_model(MODEL_NAME).await {
        Ok(model) => model,
        Err(e) => log_fatal!("{e}"),
    };

    let camera = match V4l2Camera::new(args.capture.camera_config()) {
        Ok(camera) => camera,
        Err(e) => log_fatal!("cannot open camera: {e}"),
    };

    let decoder = TinyYoloDecoder::default().with_thresholds(args.threshold, 0.4);
    let pipeline = PipelineConfig::default()
        .with_scaling(Scaling::None)
        .with_result_wait(args.server.result_wait());
    let mut pipeliner = Pipeliner::new(
        camera,
        model,
        PreviewWindow::new(WINDOW_TITLE),
        DetectionOverlay::new(decoder, labels),
        pipeline,
    );

    match pipeliner.run().await {
        Ok(summary) => log::info!("{} frames, {} with detections drawn", summary.frames, summary.results),
        Err(e) => log_fatal!("{e}"),
    }
}
