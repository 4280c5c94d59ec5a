use unicode_segmentation::UnicodeSegmentation;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::constants::*;

pub fn draw_rounded_rect(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    fill: &str,
    border: &str,
) {
    context.save();

    // Shadow for depth
    context.set_shadow_color(SHADOW_COLOR);
    context.set_shadow_blur(6.0);
    context.set_shadow_offset_x(0.0);
    context.set_shadow_offset_y(2.0);

    context.set_fill_style_str(fill);
    draw_rounded_rect_path(context, x, y, width, height);
    context.fill();

    // Remove shadow for border
    context.set_shadow_blur(0.0);
    context.set_shadow_offset_y(0.0);

    context.set_line_width(1.5);
    context.set_stroke_style_str(border);
    context.stroke();

    context.restore();
}

// Creates a rounded rectangle path without filling or stroking
pub fn draw_rounded_rect_path(context: &CanvasRenderingContext2d, x: f64, y: f64, width: f64, height: f64) {
    let radius = NODE_CORNER_RADIUS.min(height / 2.0);

    context.begin_path();
    context.move_to(x + radius, y);
    context.line_to(x + width - radius, y);
    context.quadratic_curve_to(x + width, y, x + width, y + radius);
    context.line_to(x + width, y + height - radius);
    context.quadratic_curve_to(x + width, y + height, x + width - radius, y + height);
    context.line_to(x + radius, y + height);
    context.quadratic_curve_to(x, y + height, x, y + height - radius);
    context.line_to(x, y + radius);
    context.quadratic_curve_to(x, y, x + radius, y);
    context.close_path();
}

/// Single centred line of text, shortened with an ellipsis to fit `width`.
pub fn draw_node_text(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    text: &str,
) -> Result<(), JsValue> {
    context.save();
    context.set_font("13px system-ui, -apple-system, sans-serif");
    context.set_fill_style_str(NODE_TEXT_COLOR);
    context.set_text_align("center");
    context.set_text_baseline("middle");

    let max_width = width - 16.0;
    let mut line = text.to_string();
    let mut count = text.graphemes(true).count();
    while count > 1 && context.measure_text(&line)?.width() > max_width {
        count -= 1;
        line = crate::graph::truncate_graphemes(text, count);
    }

    let result = context.fill_text(&line, x + width / 2.0, y + height / 2.0);
    context.restore();
    result
}

/// S-shaped edge from an output anchor to an input anchor.
pub fn draw_bezier_edge(
    context: &CanvasRenderingContext2d,
    from: (f64, f64),
    to: (f64, f64),
    color: &str,
    width: f64,
) {
    let (start_x, start_y) = from;
    let (end_x, end_y) = to;
    let midpoint_y = start_y + (end_y - start_y) / 2.0;

    context.save();
    context.begin_path();
    context.move_to(start_x, start_y);
    context.bezier_curve_to(start_x, midpoint_y, end_x, midpoint_y, end_x, end_y);
    context.set_stroke_style_str(color);
    context.set_line_width(width);
    context.stroke();
    context.restore();

    draw_arrow(context, end_x, end_y, 0.0, 1.0, color);
}

pub fn draw_arrow(context: &CanvasRenderingContext2d, x: f64, y: f64, dx: f64, dy: f64, color: &str) {
    let head_len = 8.0;
    let angle = f64::atan2(dy, dx);

    context.save();
    context.begin_path();
    context.move_to(x, y);
    context.line_to(
        x - head_len * f64::cos(angle - std::f64::consts::PI / 6.0),
        y - head_len * f64::sin(angle - std::f64::consts::PI / 6.0),
    );
    context.move_to(x, y);
    context.line_to(
        x - head_len * f64::cos(angle + std::f64::consts::PI / 6.0),
        y - head_len * f64::sin(angle + std::f64::consts::PI / 6.0),
    );
    context.set_stroke_style_str(color);
    context.set_line_width(2.0);
    context.stroke();
    context.restore();
}

/// Small handle at a node's output anchor.
pub fn draw_handle(context: &CanvasRenderingContext2d, x: f64, y: f64) {
    context.save();
    context.begin_path();
    let _ = context.arc(x, y, HANDLE_RADIUS, 0.0, std::f64::consts::TAU);
    context.set_fill_style_str(NODE_BORDER_COLOR);
    context.fill();
    context.restore();
}

/// Dot grid covering the visible world rectangle.
pub fn draw_dot_background(context: &CanvasRenderingContext2d, left: f64, top: f64, right: f64, bottom: f64) {
    context.save();
    context.set_fill_style_str(CANVAS_DOT_COLOR);
    let start_x = (left / CANVAS_DOT_GAP).floor() * CANVAS_DOT_GAP;
    let start_y = (top / CANVAS_DOT_GAP).floor() * CANVAS_DOT_GAP;
    let mut x = start_x;
    while x <= right {
        let mut y = start_y;
        while y <= bottom {
            context.fill_rect(x, y, 1.0, 1.0);
            y += CANVAS_DOT_GAP;
        }
        x += CANVAS_DOT_GAP;
    }
    context.restore();
}
