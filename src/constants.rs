//! Constants for the frontend application
//!
//! This module centralizes commonly used string literals and layout numbers
//! so the DOM builders, reducers and tests agree on them.

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const API_V1_PREFIX: &str = "/api/v1";
/// How long start-up waits for the host page to call `init_api_config_js`.
pub const RUNTIME_CONFIG_WAIT_MS: f64 = 500.0;

// Graph layout
pub const GRAPH_NODE_X: f64 = 200.0;
pub const GRAPH_NODE_Y_STEP: f64 = 100.0;
pub const GRAPH_NODE_WIDTH: f64 = 160.0;
pub const GRAPH_NODE_HEIGHT: f64 = 40.0;
pub const MAX_LABEL_GRAPHEMES: usize = 40;
pub const UNNAMED_NODE: &str = "unnamed";

// Canvas viewport
pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 1.1;
/// Band at the bottom of a node that starts a connection instead of a drag.
pub const CONNECT_HANDLE_HEIGHT: f64 = 10.0;
pub const EDGE_HIT_TOLERANCE: f64 = 6.0;

// Canvas colours
pub const CANVAS_BACKGROUND_COLOR: &str = "#f8fafc";
pub const CANVAS_DOT_COLOR: &str = "#cbd5e1";
pub const CANVAS_DOT_GAP: f64 = 12.0;
pub const EDGE_COLOR: &str = "#94a3b8";
pub const EDGE_SELECTED_COLOR: &str = "#2563eb";
pub const NODE_BORDER_COLOR: &str = "#1e293b";
pub const NODE_SELECTED_BORDER_COLOR: &str = "#2563eb";
pub const NODE_TEXT_COLOR: &str = "#0f172a";
pub const NODE_FILL_TIMER: &str = "#fef3c7";
pub const NODE_FILL_LLM: &str = "#ede9fe";
pub const NODE_FILL_INPUT: &str = "#dbeafe";
pub const NODE_FILL_PROMPT: &str = "#dcfce7";
pub const NODE_FILL_UNKNOWN: &str = "#e5e7eb";
pub const SHADOW_COLOR: &str = "rgba(15, 23, 42, 0.15)";
pub const NODE_CORNER_RADIUS: f64 = 8.0;
pub const HANDLE_RADIUS: f64 = 4.0;

// Editor defaults
pub const TIMER_MIN_SECONDS: u32 = 1;
pub const TIMER_MAX_SECONDS: u32 = 60;
pub const DEFAULT_TEMPERATURE: f64 = 0.5;
pub const TEMPERATURE_STEP: f64 = 0.1;
pub const DEFAULT_PROMPT_VERSION: &str = "1";

// Toasts
pub const TOAST_DURATION_MS: u32 = 4000;

// Element IDs
pub const ID_APP_ROOT: &str = "app";
pub const ID_EDITOR_MODAL: &str = "editor-modal";
pub const ID_GRAPH_CANVAS: &str = "graph-canvas";
pub const ID_CANVAS_CONTAINER: &str = "canvas-container";
pub const ID_NODE_PANEL: &str = "node-panel";
pub const ID_EDITOR_ERROR: &str = "editor-error";
pub const ID_EDITOR_SAVE: &str = "editor-save";
pub const ID_EDITOR_BODY: &str = "editor-body";
pub const ID_PAGE_TITLE: &str = "page-title";
pub const ID_RUN_BUTTON: &str = "run-agent-btn";
pub const ID_AGENT_LIST: &str = "agent-list";
pub const ID_TOAST_ROOT: &str = "toast-root";

// CSS class names
pub const CSS_MODAL: &str = "modal";
pub const CSS_HIDDEN: &str = "hidden";
pub const CSS_VISIBLE: &str = "visible";
pub const CSS_CARD: &str = "card";
pub const CSS_FORM_ROW: &str = "form-row";
pub const CSS_PANEL_BUTTON: &str = "panel-button";
pub const CSS_PRIMARY_BUTTON: &str = "primary-button";
pub const CSS_ERROR_TEXT: &str = "error-text";
