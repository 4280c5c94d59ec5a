use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::flow::{input_anchor, output_anchor, CanvasState};
use super::shapes;
use crate::constants::*;
use crate::error_log;
use crate::state::APP_STATE;

/// Fill colour for a node by its wire type name.
pub fn node_fill(node_type: &str) -> &'static str {
    match node_type {
        "timer" => NODE_FILL_TIMER,
        "llm" => NODE_FILL_LLM,
        "input" => NODE_FILL_INPUT,
        "prompt" => NODE_FILL_PROMPT,
        _ => NODE_FILL_UNKNOWN,
    }
}

/// Repaint the graph canvas from the store, if the canvas is mounted.
pub fn redraw() {
    let Some(canvas_el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(ID_GRAPH_CANVAS))
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        return;
    };

    let result = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        let context = context_2d(&canvas_el)?;
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        draw(&state.canvas, &canvas_el, &context, dpr)?;
        state.canvas.dirty = false;
        Ok::<(), JsValue>(())
    });
    if let Err(e) = result {
        error_log!("Canvas redraw failed: {:?}", e);
    }
}

fn context_2d(canvas_el: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas_el
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("not a 2d context"))
}

fn draw(
    canvas: &CanvasState,
    canvas_el: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
    dpr: f64,
) -> Result<(), JsValue> {
    // Keep the backing store in step with the CSS size.
    let backing_w = (canvas.width * dpr) as u32;
    let backing_h = (canvas.height * dpr) as u32;
    if canvas_el.width() != backing_w || canvas_el.height() != backing_h {
        canvas_el.set_width(backing_w);
        canvas_el.set_height(backing_h);
    }

    context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    context.scale(dpr, dpr)?;
    context.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
    context.fill_rect(0.0, 0.0, canvas.width, canvas.height);

    context.save();
    context.scale(canvas.zoom_level, canvas.zoom_level)?;
    context.translate(-canvas.viewport_x, -canvas.viewport_y)?;

    let (left, top) = canvas.to_world(0.0, 0.0);
    let (right, bottom) = canvas.to_world(canvas.width, canvas.height);
    shapes::draw_dot_background(context, left, top, right, bottom);

    // Edges first, underneath the nodes
    for edge in &canvas.edges {
        let (Some(from), Some(to)) = (canvas.node(&edge.source), canvas.node(&edge.target)) else {
            continue;
        };
        let (color, width) = if edge.selected {
            (EDGE_SELECTED_COLOR, 2.5)
        } else {
            (EDGE_COLOR, 1.5)
        };
        shapes::draw_bezier_edge(context, output_anchor(from), input_anchor(to), color, width);
    }

    // Connection preview
    if let Some(source) = canvas.connecting_from.as_deref().and_then(|id| canvas.node(id)) {
        shapes::draw_bezier_edge(context, output_anchor(source), canvas.pointer, EDGE_SELECTED_COLOR, 1.5);
    }

    for node in &canvas.nodes {
        let border = if node.selected {
            NODE_SELECTED_BORDER_COLOR
        } else {
            NODE_BORDER_COLOR
        };
        let (x, y) = (node.position.x, node.position.y);
        shapes::draw_rounded_rect(context, x, y, GRAPH_NODE_WIDTH, GRAPH_NODE_HEIGHT, node_fill(&node.node_type), border);
        shapes::draw_node_text(context, x, y, GRAPH_NODE_WIDTH, GRAPH_NODE_HEIGHT, &node.label)?;
        let (hx, hy) = output_anchor(node);
        shapes::draw_handle(context, hx, hy);
    }

    context.restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_types_get_neutral_fill() {
        assert_eq!(node_fill("timer"), NODE_FILL_TIMER);
        assert_eq!(node_fill("conditional"), NODE_FILL_UNKNOWN);
    }
}
