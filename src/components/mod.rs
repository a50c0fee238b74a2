pub mod flow_canvas;
pub mod header;
pub mod inspector;
pub mod toolbar;
