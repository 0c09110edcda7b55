use vista_base::Tensor;
use vista_infer::{DataType, InferError, InputFormat, InputSpec, Scaling, preprocess, resize_nearest};

fn spec(format: InputFormat, channels: usize, size: (usize, usize), max_batch_size: usize) -> InputSpec {
    InputSpec {
        name: "input".to_string(),
        format,
        datatype: DataType::Fp32,
        channels,
        height: size.1,
        width: size.0,
        max_batch_size,
    }
}

/// 2x1 frame: a red pixel then a blue one.
fn red_blue() -> Tensor<u8> {
    Tensor::new(vec![1, 2, 3], vec![255, 0, 0, 0, 0, 255]).unwrap()
}

#[test]
fn test_nchw_planes() {
    let out = preprocess(&red_blue(), &spec(InputFormat::Nchw, 3, (2, 1), 0), Scaling::None).unwrap();
    assert_eq!(out.shape, vec![3, 1, 2]);
    assert_eq!(out.data, vec![255.0, 0.0, 0.0, 0.0, 0.0, 255.0]);
}

#[test]
fn test_nhwc_interleaved_with_batch() {
    let out = preprocess(&red_blue(), &spec(InputFormat::Nhwc, 3, (2, 1), 4), Scaling::None).unwrap();
    assert_eq!(out.shape, vec![1, 1, 2, 3]);
    assert_eq!(out.data, vec![255.0, 0.0, 0.0, 0.0, 0.0, 255.0]);
}

#[test]
fn test_inception_range() {
    let out = preprocess(&red_blue(), &spec(InputFormat::Nhwc, 3, (2, 1), 0), Scaling::Inception).unwrap();
    assert_eq!(out.data, vec![1.0, -1.0, -1.0, -1.0, -1.0, 1.0]);
}

#[test]
fn test_vgg_mean() {
    let out = preprocess(&red_blue(), &spec(InputFormat::Nhwc, 3, (2, 1), 0), Scaling::Vgg).unwrap();
    assert_eq!(out.data, vec![132.0, -117.0, -104.0, -123.0, -117.0, 151.0]);
}

#[test]
fn test_grayscale_luma() {
    let frame = Tensor::new(vec![1, 1, 3], vec![100, 100, 100]).unwrap();
    let out = preprocess(&frame, &spec(InputFormat::Nchw, 1, (1, 1), 0), Scaling::Vgg).unwrap();
    assert_eq!(out.shape, vec![1, 1, 1]);
    assert!((out.data[0] - (100.0 - 128.0)).abs() < 1e-3);
}

#[test]
fn test_resized_to_model_size() {
    let frame = Tensor::filled(vec![480, 640, 3], 7u8).unwrap();
    let out = preprocess(&frame, &spec(InputFormat::Nchw, 3, (224, 224), 0), Scaling::None).unwrap();
    assert_eq!(out.shape, vec![3, 224, 224]);
    assert!(out.data.iter().all(|&v| v == 7.0));
}

#[test]
fn test_non_fp32_rejected() {
    let mut input = spec(InputFormat::Nchw, 3, (2, 1), 0);
    input.datatype = DataType::Uint8;
    assert!(matches!(
        preprocess(&red_blue(), &input, Scaling::None),
        Err(InferError::UnsupportedDatatype(_))
    ));
}

#[test]
fn test_nearest_downscale_picks_top_left_of_block() {
    // 4x2 frame, each pixel's red channel holds its column index
    let mut data = Vec::new();
    for _ in 0..2 {
        for x in 0..4u8 {
            data.extend_from_slice(&[x, 0, 0]);
        }
    }
    let frame = Tensor::new(vec![2, 4, 3], data).unwrap();
    let small = resize_nearest(&frame, 2, 1).unwrap();
    assert_eq!(small.shape, vec![1, 2, 3]);
    assert_eq!(small.data, vec![0, 0, 0, 2, 0, 0]);
}

#[test]
fn test_scaling_from_str() {
    assert_eq!("inception".parse::<Scaling>().unwrap(), Scaling::Inception);
    assert_eq!("VGG".parse::<Scaling>().unwrap(), Scaling::Vgg);
    assert_eq!("none".parse::<Scaling>().unwrap(), Scaling::None);
    assert!("bicubic".parse::<Scaling>().is_err());
}
