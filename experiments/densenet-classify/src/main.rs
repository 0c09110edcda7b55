use clap::Parser;
use densenet_classify::{ClassificationOverlay, LABEL_URL, MODEL_NAME, WINDOW_TITLE};
use std::path::PathBuf;
use vista_base::log_fatal;
use vista_camera::V4l2Camera;
use vista_infer::assets::download_file;
use vista_infer::{Scaling, TritonClient, load_labels};
use vista_pipeline::{CaptureArgs, PipelineConfig, Pipeliner, PreviewWindow, ServerArgs, init_logging};

/// Classify camera frames with DenseNet on a Triton Inference Server.
#[derive(Parser, Debug)]
#[command(name = "densenet-classify")]
struct Args {
    #[command(flatten)]
    capture: CaptureArgs,

    #[command(flatten)]
    server: ServerArgs,

    /// Number of classes to show
    #[arg(long, value_name = "N", default_value_t = 3)]
    results: usize,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.capture.log_dir.as_deref());

    let config = args.server.triton_config().with_classification(args.results);
    let client = match TritonClient::new(config) {
        Ok(client) => client,
        Err(e) => log_fatal!("{e}"),
    };

    // the server normally labels its classes itself; the local copy fills gaps
    let labels = match download_file(LABEL_URL, &PathBuf::from(".")).await {
        Ok(path) => load_labels(&path).unwrap_or_else(|e| {
            log::warn!("{e}");
            Vec::new()
        }),
        Err(e) => {
            log::warn!("no label file: {e}");
            Vec::new()
        }
    };

    let model = match client.load_model(MODEL_NAME).await {
        Ok(model) => model,
        Err(e) => log_fatal!("{e}"),
    };

    let camera = match V4l2Camera::new(args.capture.camera_config()) {
        Ok(camera) => camera,
        Err(e) => log_fatal!("cannot open camera: {e}"),
    };

    let pipeline = PipelineConfig::default()
        .with_scaling(Scaling::Inception)
        .with_result_wait(args.server.result_wait());
    let mut pipeliner = Pipeliner::new(
        camera,
        model,
        PreviewWindow::new(WINDOW_TITLE),
        ClassificationOverlay::new(labels),
        pipeline,
    );

    match pipeliner.run().await {
        Ok(summary) => log::info!("{} frames, {} classified", summary.frames, summary.results),
        Err(e) => log_fatal!("{e}"),
    }
}
