use vista_base::Tensor;

pub type Rgb = [u8; 3];

fn frame_size(frame: &Tensor<u8>) -> Option<(i32, i32)> {
    match frame.hwc() {
        Some((h, w, 3)) => Some((w as i32, h as i32)),
        _ => None,
    }
}

/// Write one pixel; coordinates outside the frame are ignored.
pub fn set_pixel(frame: &mut Tensor<u8>, x: i32, y: i32, color: Rgb) {
    let Some((width, height)) = frame_size(frame) else {
        return;
    };
    if x < 0 || y < 0 || x >= width || y >= height {
        return;
    }
    let idx = (y as usize * width as usize + x as usize) * 3;
    frame.data[idx..idx + 3].copy_from_slice(&color);
}

/// Fill the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the frame.
pub fn fill_rect(frame: &mut Tensor<u8>, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
    let Some((width, height)) = frame_size(frame) else {
        return;
    };
    let (x0, x1) = (x0.clamp(0, width), x1.clamp(0, width));
    let (y0, y1) = (y0.clamp(0, height), y1.clamp(0, height));
    for y in y0..y1 {
        let row = y as usize * width as usize;
        for x in x0..x1 {
            let idx = (row + x as usize) * 3;
            frame.data[idx..idx + 3].copy_from_slice(&color);
        }
    }
}

/// Rectangle outline with corners `(x0, y0)` and `(x1, y1)` inclusive,
/// `thickness` pixels wide growing inwards.
pub fn draw_rect(
    frame: &mut Tensor<u8>,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    thickness: i32,
    color: Rgb,
) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    for t in 0..thickness.max(1) {
        let (left, right) = (x0.saturating_add(t), x1.saturating_sub(t));
        let (top, bottom) = (y0.saturating_add(t), y1.saturating_sub(t));
        if left > right || top > bottom {
            break;
        }
        draw_line(frame, left, top, right, top, color);
        draw_line(frame, left, bottom, right, bottom, color);
        draw_line(frame, left, top, left, bottom, color);
        draw_line(frame, right, top, right, bottom, color);
    }
}

/// Bresenham line, clipped to the frame with Cohen-Sutherland first.
pub fn draw_line(frame: &mut Tensor<u8>, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
    let Some((width, height)) = frame_size(frame) else {
        return;
    };
    let Some((mut x0, mut y0, x1, y1)) = clip(x0, y0, x1, y1, width, height) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        set_pixel(frame, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: i32, y: i32, width: i32, height: i32) -> u8 {
    let mut code = 0;
    if x < 0 {
        code |= LEFT;
    } else if x >= width {
        code |= RIGHT;
    }
    if y < 0 {
        code |= TOP;
    } else if y >= height {
        code |= BOTTOM;
    }
    code
}

fn clip(
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    width: i32,
    height: i32,
) -> Option<(i32, i32, i32, i32)> {
    loop {
        let code0 = outcode(x0, y0, width, height);
        let code1 = outcode(x1, y1, width, height);
        if code0 | code1 == 0 {
            return Some((x0, y0, x1, y1));
        }
        if code0 & code1 != 0 {
            return None;
        }

        let code = if code0 != 0 { code0 } else { code1 };
        // widened: endpoints may sit anywhere in the i32 range
        let (x0l, y0l) = (x0 as i128, y0 as i128);
        let (dx, dy) = (x1 as i128 - x0l, y1 as i128 - y0l);
        let (w, h) = (width as i128, height as i128);
        // the crossing lies between the endpoints, so it fits back into i32
        let (x, y) = if code & TOP != 0 {
            ((x0l + dx * -y0l / dy) as i32, 0)
        } else if code & BOTTOM != 0 {
            ((x0l + dx * (h - 1 - y0l) / dy) as i32, height - 1)
        } else if code & LEFT != 0 {
            (0, (y0l + dy * -x0l / dx) as i32)
        } else {
            (width - 1, (y0l + dy * (w - 1 - x0l) / dx) as i32)
        };

        if code == code0 {
            (x0, y0) = (x, y);
        } else {
            (x1, y1) = (x, y);
        }
    }
}
