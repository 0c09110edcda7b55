use clap::Parser;
use std::time::Duration;
use vista_pipeline::{CaptureArgs, ServerArgs};

#[derive(Parser, Debug)]
struct DemoArgs {
    #[command(flatten)]
    capture: CaptureArgs,

    #[command(flatten)]
    server: ServerArgs,
}

#[test]
fn test_defaults() {
    let args = DemoArgs::try_parse_from(["demo", "--url", "localhost:8000"]).unwrap();
    assert_eq!(args.capture.camera, 0);
    assert_eq!((args.capture.width, args.capture.height), (640, 480));
    assert!(args.capture.log_dir.is_none());
    assert_eq!(args.server.result_wait(), Duration::ZERO);

    let camera = args.capture.camera_config();
    assert_eq!(camera.device(), "/dev/video0");
    assert_eq!(args.server.triton_config().url(), "http://localhost:8000");
}

#[test]
fn test_flags() {
    let args = DemoArgs::try_parse_from([
        "demo",
        "--camera",
        "2",
        "--width",
        "1280",
        "--height",
        "720",
        "--url",
        "https://triton:8443",
        "--result-wait-ms",
        "15",
        "--log-dir",
        "/tmp/vista-logs",
    ])
    .unwrap();

    let camera = args.capture.camera_config();
    assert_eq!(camera.device(), "/dev/video2");
    assert_eq!((camera.width(), camera.height()), (1280, 720));
    assert_eq!(args.server.triton_config().url(), "https://triton:8443");
    assert_eq!(args.server.result_wait(), Duration::from_millis(15));
    assert_eq!(args.capture.log_dir.unwrap().to_str(), Some("/tmp/vista-logs"));
}

#[test]
fn test_rejects_bad_camera_id() {
    assert!(DemoArgs::try_parse_from(["demo", "--camera", "front"]).is_err());
}
