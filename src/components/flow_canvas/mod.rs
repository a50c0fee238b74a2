mod component;
mod geometry;
mod render;
mod state;

pub use component::FlowCanvas;
pub use state::InteractionState;
