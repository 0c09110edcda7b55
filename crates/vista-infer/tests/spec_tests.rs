use vista_infer::{DataType, InferError, InputFormat, parse_model_config};

const DENSENET: &str = r#"{
    "name": "densenet_onnx",
    "platform": "onnxruntime_onnx",
    "max_batch_size": 0,
    "input": [{"name": "data_0", "data_type": "TYPE_FP32", "format": "FORMAT_NCHW", "dims": [3, 224, 224]}],
    "output": [{"name": "fc6_1", "data_type": "TYPE_FP32", "dims": [1000, 1, 1], "label_filename": "densenet_labels.txt"}]
}"#;

#[test]
fn test_parse_nchw_model() {
    let spec = parse_model_config(DENSENET.as_bytes()).unwrap();
    assert_eq!(spec.name, "densenet_onnx");
    assert_eq!(spec.output, "fc6_1");
    assert_eq!(spec.input.name, "data_0");
    assert_eq!(spec.input.format, InputFormat::Nchw);
    assert_eq!(spec.input.datatype, DataType::Fp32);
    assert_eq!((spec.input.channels, spec.input.height, spec.input.width), (3, 224, 224));
    assert_eq!(spec.input.max_batch_size, 0);
    assert_eq!(spec.input.request_shape(), vec![3, 224, 224]);
}

#[test]
fn test_parse_nhwc_batched_with_string_dims() {
    let json = r#"{
        "name": "gray", "max_batch_size": "8",
        "input": [{"name": "in", "data_type": "TYPE_FP32", "format": "FORMAT_NHWC", "dims": ["64", "32", "1"]}],
        "output": [{"name": "out"}]
    }"#;
    let spec = parse_model_config(json.as_bytes()).unwrap();
    assert_eq!(spec.input.format, InputFormat::Nhwc);
    assert_eq!((spec.input.channels, spec.input.height, spec.input.width), (1, 64, 32));
    assert_eq!(spec.input.max_batch_size, 8);
    assert_eq!(spec.input.request_shape(), vec![1, 64, 32, 1]);
}

#[test]
fn test_missing_format_rejected() {
    let json = DENSENET.replace(r#""format": "FORMAT_NCHW", "#, "");
    match parse_model_config(json.as_bytes()) {
        Err(InferError::InvalidConfig(msg)) => assert!(msg.contains("FORMAT_NONE")),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_two_inputs_rejected() {
    let json = r#"{"max_batch_size": 0,
        "input": [
            {"name": "a", "data_type": "TYPE_FP32", "format": "FORMAT_NCHW", "dims": [3, 8, 8]},
            {"name": "b", "data_type": "TYPE_FP32", "format": "FORMAT_NCHW", "dims": [3, 8, 8]}],
        "output": [{"name": "out"}]}"#;
    assert!(matches!(parse_model_config(json.as_bytes()), Err(InferError::InvalidConfig(_))));
}

#[test]
fn test_four_channels_rejected() {
    let json = DENSENET.replace("[3, 224, 224]", "[4, 224, 224]");
    assert!(matches!(parse_model_config(json.as_bytes()), Err(InferError::InvalidConfig(_))));
}

#[test]
fn test_wrong_rank_rejected() {
    let json = DENSENET.replace("[3, 224, 224]", "[1, 3, 224, 224]");
    assert!(matches!(parse_model_config(json.as_bytes()), Err(InferError::InvalidConfig(_))));
}

#[test]
fn test_datatype_spellings() {
    assert_eq!(DataType::parse("TYPE_FP32"), Some(DataType::Fp32));
    assert_eq!(DataType::parse("INT64"), Some(DataType::Int64));
    assert_eq!(DataType::parse("TYPE_STRING"), Some(DataType::Bytes));
    assert_eq!(DataType::parse("TYPE_COMPLEX"), None);
    assert_eq!(DataType::Uint8.to_string(), "UINT8");
}
