pub mod home;
pub mod placeholder;
pub mod registry;

pub use registry::{bound_views, render_view};
