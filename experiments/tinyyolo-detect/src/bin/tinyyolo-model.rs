use clap::Parser;
use std::path::PathBuf;
use tinyyolo_detect::prepare_model_repository;
use vista_base::log_fatal;
use vista_pipeline::init_logging;

/// Fetch Tiny YOLOv2 and lay it out as a Triton model directory.
#[derive(Parser, Debug)]
#[command(name = "tinyyolo-model")]
struct Args {
    /// Model directory; point the server's model repository at its parent
    #[arg(long, value_name = "DIR", default_value = "model_repository/tinyyolov2_onnx")]
    dir: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(None);

    match prepare_model_repository(&args.dir).await {
        Ok(repository) => {
            println!("model:  {}", repository.model.display());
            println!("labels: {}", repository.labels.display());
            println!("config: {}", repository.config.display());
        }
        Err(e) => log_fatal!("{e}"),
    }
}
