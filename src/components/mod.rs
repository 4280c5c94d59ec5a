pub mod canvas_editor;
pub mod modal;
pub mod node_editor;
pub mod node_panel;
