use std::fs;
use std::path::PathBuf;
use tinyyolo_detect::prepare_model_repository;
use tinyyolo_detect::repository::{CONFIG_DATA, CONFIG_FILE, LABEL_FILE, MODEL_FILE, VERSION};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tinyyolo-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_existing_files_are_kept() {
    let dir = scratch_dir("existing");
    fs::create_dir_all(dir.join(VERSION)).unwrap();
    fs::write(dir.join(VERSION).join(MODEL_FILE), b"weights").unwrap();
    fs::write(dir.join(LABEL_FILE), "aeroplane\nbicycle\n").unwrap();
    fs::write(dir.join(CONFIG_FILE), "stale").unwrap();

    let repository = prepare_model_repository(&dir).await.unwrap();

    assert_eq!(repository.model, dir.join("1").join("model.onnx"));
    assert_eq!(fs::read(&repository.model).unwrap(), b"weights");
    assert_eq!(fs::read_to_string(&repository.labels).unwrap(), "aeroplane\nbicycle\n");
    assert_eq!(fs::read_to_string(&repository.config).unwrap(), CONFIG_DATA);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_config_describes_tiny_yolo() {
    assert!(CONFIG_DATA.starts_with("name: \"tinyyolov2_onnx\""));
    assert!(CONFIG_DATA.contains("platform: \"onnxruntime_onnx\""));
    assert!(CONFIG_DATA.contains("max_batch_size: 128"));
    assert!(CONFIG_DATA.contains("format: FORMAT_NCHW"));
    assert!(CONFIG_DATA.contains("dims: [ 3, 416, 416 ]"));
    assert!(CONFIG_DATA.contains("dims: [ 125, 13, 13 ]"));
    assert!(CONFIG_DATA.contains("label_filename: \"voc.names\""));
}
