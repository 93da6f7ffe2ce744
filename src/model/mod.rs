pub mod display;
pub mod registry;

pub use display::{display_path, display_path_for_user, last_used_label};
pub use registry::{missing_fields, ProjectRegistry, DEFAULT_REQUIRED_FIELDS};
