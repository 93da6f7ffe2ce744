//! 视图状态（与渲染解耦）

pub mod configure;
pub mod image_view;
pub mod list;

pub use configure::{ConfigDialog, ConfigEdit, ConfigureView};
pub use image_view::ImageView;
pub use list::{ListPhase, LoadReason, ProjectActionHandler, ProjectListView};
