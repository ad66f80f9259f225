use crate::app::Viewport;

use super::{Rgba, ScreenRectPx};

pub(crate) fn write_pixel_rgba(frame: &mut [u8], width: usize, x: usize, y: usize, color: Rgba) {
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }

    frame[byte_offset..end].copy_from_slice(&color);
}

pub(crate) fn fill_rect_clipped(
    frame: &mut [u8],
    viewport: Viewport,
    rect: ScreenRectPx,
    color: Rgba,
) {
    let start_x = rect.left.max(0);
    let start_y = rect.top.max(0);
    let end_x = rect.right.min(viewport.width as i32);
    let end_y = rect.bottom.min(viewport.height as i32);
    if end_x <= start_x || end_y <= start_y {
        return;
    }

    let width = viewport.width as usize;
    for py in start_y..end_y {
        for px in start_x..end_x {
            write_pixel_rgba(frame, width, px as usize, py as usize, color);
        }
    }
}

pub(crate) fn draw_rect_outline(
    frame: &mut [u8],
    viewport: Viewport,
    rect: ScreenRectPx,
    color: Rgba,
) {
    if rect.width() <= 1 || rect.height() <= 1 {
        return;
    }
    let edges = [
        ScreenRectPx {
            bottom: rect.top + 1,
            ..rect
        },
        ScreenRectPx {
            top: rect.bottom - 1,
            ..rect
        },
        ScreenRectPx {
            right: rect.left + 1,
            ..rect
        },
        ScreenRectPx {
            left: rect.right - 1,
            ..rect
        },
    ];
    for edge in edges {
        fill_rect_clipped(frame, viewport, edge, color);
    }
}
