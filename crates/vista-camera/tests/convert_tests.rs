use vista_camera::convert::yuyv_to_rgb;

#[test]
fn test_neutral_chroma_is_gray() {
    // two pixels sharing neutral chroma
    let frame = yuyv_to_rgb(&[16, 128, 235, 128], 2, 1).unwrap();
    assert_eq!(frame.shape, vec![1, 2, 3]);
    assert_eq!(frame.data, vec![16, 16, 16, 235, 235, 235]);
}

#[test]
fn test_red_chroma() {
    let frame = yuyv_to_rgb(&[76, 85, 76, 255], 2, 1).unwrap();
    let (r, g, b) = (frame.data[0], frame.data[1], frame.data[2]);
    assert!(r > 240, "r = {r}");
    assert!(g < 10, "g = {g}");
    assert!(b < 10, "b = {b}");
}

#[test]
fn test_rejects_short_buffer() {
    assert!(yuyv_to_rgb(&[0; 7], 2, 2).is_none());
}

#[test]
fn test_rejects_odd_width() {
    assert!(yuyv_to_rgb(&[0; 6], 3, 1).is_none());
}

#[test]
fn test_ignores_trailing_padding() {
    let frame = yuyv_to_rgb(&[128, 128, 128, 128, 9, 9], 2, 1).unwrap();
    assert_eq!(frame.data.len(), 6);
}
