use crate::app::rendering::{draw_rect_outline, fill_rect_clipped, Rgba, ScreenRectPx};
use crate::app::{LoopMetricsSnapshot, StatusText, TouchButton, TouchLayout, Viewport};

use super::font::{draw_text_clipped, text_width_px, GLYPH_HEIGHT, LINE_ADVANCE, TEXT_SCALE};

const PANEL_PADDING: i32 = 6 * TEXT_SCALE;
const PANEL_INSET_X: i32 = 4 * TEXT_SCALE;
const PANEL_INSET_Y: i32 = 3 * TEXT_SCALE;
const TEXT_PRIMARY_COLOR: Rgba = [244, 248, 252, 255];
const TEXT_DIM_COLOR: Rgba = [176, 198, 220, 255];
const PANEL_BG_COLOR: Rgba = [10, 12, 16, 255];
const PANEL_BORDER_COLOR: Rgba = [92, 106, 126, 255];
const TOUCH_BUTTON_COLOR: Rgba = [40, 44, 56, 255];
const TOUCH_BUTTON_HELD_COLOR: Rgba = [86, 96, 122, 255];
const BANNER_BORDER_COLOR: Rgba = [240, 200, 90, 255];
const BANNER_HINT: &str = "Enter / click to continue";

#[derive(Debug, Clone)]
pub(crate) struct OverlayData {
    pub status: StatusText,
    pub metrics: Option<LoopMetricsSnapshot>,
    pub touch_layout: TouchLayout,
    pub held_touch_buttons: Vec<TouchButton>,
    pub banner: Option<String>,
}

pub(crate) fn draw_overlay(frame: &mut [u8], viewport: Viewport, data: &OverlayData) {
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }

    let lines = build_status_lines(data);
    draw_text_panel(frame, viewport, PANEL_PADDING, PANEL_PADDING, &lines);
    draw_touch_buttons(frame, viewport, data);
    if let Some(message) = data.banner.as_deref() {
        draw_banner(frame, viewport, message);
    }
}

fn build_status_lines(data: &OverlayData) -> Vec<(String, Rgba)> {
    let mut lines = vec![
        (data.status.title.clone(), TEXT_PRIMARY_COLOR),
        (data.status.detail.clone(), TEXT_DIM_COLOR),
    ];
    if let Some(metrics) = data.metrics {
        lines.push((format_metrics_line(metrics), TEXT_DIM_COLOR));
    }
    lines
}

fn format_metrics_line(metrics: LoopMetricsSnapshot) -> String {
    format!(
        "fps {:.0} | sim {:.0}/s | {:.2} ms",
        metrics.fps, metrics.steps_per_second, metrics.frame_time_ms
    )
}

fn draw_text_panel(
    frame: &mut [u8],
    viewport: Viewport,
    text_left: i32,
    text_top: i32,
    lines: &[(String, Rgba)],
) {
    if lines.is_empty() {
        return;
    }
    let longest = lines
        .iter()
        .map(|(line, _)| text_width_px(line))
        .max()
        .unwrap_or(0);
    let panel = ScreenRectPx {
        left: text_left - PANEL_INSET_X,
        top: text_top - PANEL_INSET_Y,
        right: text_left + longest + PANEL_INSET_X,
        bottom: text_top + lines.len() as i32 * LINE_ADVANCE + PANEL_INSET_Y,
    };
    fill_rect_clipped(frame, viewport, panel, PANEL_BG_COLOR);
    draw_rect_outline(frame, viewport, panel, PANEL_BORDER_COLOR);

    let mut y = text_top;
    for (line, color) in lines {
        draw_text_clipped(frame, viewport, text_left, y, line, *color);
        y += LINE_ADVANCE;
    }
}

fn draw_touch_buttons(frame: &mut [u8], viewport: Viewport, data: &OverlayData) {
    for (button, rect) in data.touch_layout.buttons() {
        let screen = ScreenRectPx {
            left: rect.x as i32,
            top: rect.y as i32,
            right: rect.right() as i32,
            bottom: rect.bottom() as i32,
        };
        let fill = if data.held_touch_buttons.contains(button) {
            TOUCH_BUTTON_HELD_COLOR
        } else {
            TOUCH_BUTTON_COLOR
        };
        fill_rect_clipped(frame, viewport, screen, fill);
        draw_rect_outline(frame, viewport, screen, PANEL_BORDER_COLOR);

        let label = button.label();
        let label_x = screen.left + (screen.width() - text_width_px(label)) / 2;
        let label_y = screen.top + (screen.height() - GLYPH_HEIGHT * TEXT_SCALE) / 2;
        draw_text_clipped(frame, viewport, label_x, label_y, label, TEXT_PRIMARY_COLOR);
    }
}

fn draw_banner(frame: &mut [u8], viewport: Viewport, message: &str) {
    let width = text_width_px(message).max(text_width_px(BANNER_HINT));
    let height = 2 * LINE_ADVANCE;
    let left = (viewport.width as i32 - width) / 2;
    let top = (viewport.height as i32 - height) / 2;
    let panel = ScreenRectPx {
        left: left - PANEL_INSET_X * 2,
        top: top - PANEL_INSET_Y * 2,
        right: left + width + PANEL_INSET_X * 2,
        bottom: top + height + PANEL_INSET_Y * 2,
    };
    fill_rect_clipped(frame, viewport, panel, PANEL_BG_COLOR);
    draw_rect_outline(frame, viewport, panel, BANNER_BORDER_COLOR);

    let message_left = (viewport.width as i32 - text_width_px(message)) / 2;
    let hint_left = (viewport.width as i32 - text_width_px(BANNER_HINT)) / 2;
    draw_text_clipped(frame, viewport, message_left, top, message, TEXT_PRIMARY_COLOR);
    draw_text_clipped(
        frame,
        viewport,
        hint_left,
        top + LINE_ADVANCE,
        BANNER_HINT,
        TEXT_DIM_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 320,
            height: 180,
        }
    }

    fn sample_data() -> OverlayData {
        OverlayData {
            status: StatusText {
                title: "Reach the Old Tower".to_string(),
                detail: "Progress: 42%".to_string(),
            },
            metrics: None,
            touch_layout: TouchLayout::for_viewport(viewport()),
            held_touch_buttons: Vec::new(),
            banner: None,
        }
    }

    fn has_color(frame: &[u8], color: Rgba) -> bool {
        frame.chunks_exact(4).any(|px| px == color)
    }

    #[test]
    fn status_lines_skip_metrics_when_hidden() {
        let lines = build_status_lines(&sample_data());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, "Reach the Old Tower");
        assert_eq!(lines[1].0, "Progress: 42%");
    }

    #[test]
    fn status_lines_include_metrics_when_visible() {
        let mut data = sample_data();
        data.metrics = Some(LoopMetricsSnapshot {
            fps: 59.6,
            steps_per_second: 60.0,
            frame_time_ms: 16.666,
        });
        let lines = build_status_lines(&data);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].0, "fps 60 | sim 60/s | 16.67 ms");
    }

    #[test]
    fn overlay_draws_panel_and_buttons() {
        let mut frame = vec![0u8; 320 * 180 * 4];
        draw_overlay(&mut frame, viewport(), &sample_data());
        assert!(has_color(&frame, PANEL_BG_COLOR));
        assert!(has_color(&frame, TOUCH_BUTTON_COLOR));
        assert!(!has_color(&frame, BANNER_BORDER_COLOR));
    }

    #[test]
    fn held_button_uses_highlight_color() {
        let mut data = sample_data();
        data.held_touch_buttons = vec![TouchButton::Jump];
        let mut frame = vec![0u8; 320 * 180 * 4];
        draw_overlay(&mut frame, viewport(), &data);
        assert!(has_color(&frame, TOUCH_BUTTON_HELD_COLOR));
    }

    #[test]
    fn open_banner_is_drawn() {
        let mut data = sample_data();
        data.banner = Some("Tower found! +50 XP".to_string());
        let mut frame = vec![0u8; 320 * 180 * 4];
        draw_overlay(&mut frame, viewport(), &data);
        assert!(has_color(&frame, BANNER_BORDER_COLOR));
    }

    #[test]
    fn tiny_viewport_never_panics() {
        let mut frame = vec![0u8; 4];
        let data = sample_data();
        draw_overlay(
            &mut frame,
            Viewport {
                width: 1,
                height: 1,
            },
            &data,
        );
        let mut empty = Vec::new();
        draw_overlay(
            &mut empty,
            Viewport {
                width: 0,
                height: 0,
            },
            &data,
        );
    }
}
