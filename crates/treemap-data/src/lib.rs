mod config;
mod error;
mod fetch;
mod group_by;
mod selection;
mod source;
mod tree;

pub use config::{BackendConfig, RequestMethod, DEFAULT_BASE_URL, DEFAULT_ENDPOINT_PATH};
pub use error::{Error, ErrorKind};
pub use fetch::{FetchController, FetchState, Snapshot};
pub use group_by::GroupBy;
pub use selection::Selection;
pub use source::{HttpSource, Source};
pub use tree::{TreeData, TreeNode};
