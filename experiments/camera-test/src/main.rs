use clap::Parser;
use vista_base::{IntervalCounter, Tensor, fps_from_interval, log_fatal};
use vista_camera::{Camera, CameraError, V4l2Camera};
use vista_pipeline::overlay::{INFO_COLOR, draw_fps, draw_footer};
use vista_pipeline::{CaptureArgs, Preview, PreviewWindow, init_logging};

const WINDOW_TITLE: &str = "Camera Test";

/// Show the camera feed with its frame size and frame rate.
#[derive(Parser, Debug)]
#[command(name = "camera-test")]
struct Args {
    #[command(flatten)]
    capture: CaptureArgs,
}

fn draw_info(frame: &mut Tensor<u8>, fps: Option<f32>) {
    if let Some((height, width, _)) = frame.hwc() {
        draw_footer(frame, &format!("Size:{width}x{height}"), INFO_COLOR);
    }
    draw_fps(frame, fps, INFO_COLOR);
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.capture.log_dir.as_deref());

    let config = args.capture.camera_config();
    let mut camera = match V4l2Camera::new(config) {
        Ok(camera) => camera,
        Err(e) => log_fatal!("cannot open camera: {e}"),
    };
    let (width, height) = camera.resolution();
    log::info!("capturing {width}x{height} from {}", camera.config().device());

    let mut window = PreviewWindow::new(WINDOW_TITLE);
    let mut counter = IntervalCounter::new(10);

    loop {
        let mut frame = match camera.recv().await {
            Ok(frame) => frame,
            Err(CameraError::Decode(e)) => {
                log::warn!("dropping undecodable frame: {e}");
                continue;
            }
            Err(e) => log_fatal!("capture failed: {e}"),
        };
        let fps = counter.measure().and_then(fps_from_interval);
        draw_info(&mut frame, fps);

        if let Err(e) = window.show(&frame) {
            log_fatal!("{e}");
        }
        if let Some(reason) = window.poll_exit() {
            log::info!("exiting: {reason:?}");
            break;
        }
    }
}
