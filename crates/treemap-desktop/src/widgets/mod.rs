mod status;
pub mod treemap;

pub use status::{ui as status_ui, Status};
pub use treemap::{ui as treemap_ui, TreemapStyle};
