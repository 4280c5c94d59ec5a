//! The graph canvas: transient layout state plus its 2d renderer.

pub mod flow;
pub mod renderer;
pub mod shapes;
