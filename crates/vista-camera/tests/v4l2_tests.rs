#[cfg(feature = "v4l2")]
mod v4l2_tests {
    use vista_camera::{CameraConfig, CameraError, V4l2Camera};

    #[test]
    fn test_missing_device_is_device_error() {
        let config = CameraConfig::default().with_device("/dev/nonexistent_camera".to_string());
        match V4l2Camera::new(config) {
            Err(CameraError::Device(msg)) => assert!(msg.contains("/dev/nonexistent_camera")),
            other => panic!("expected Device error, got {other:?}"),
        }
    }
}
