mod handler;
pub mod model;

pub use handler::{get_course, list_courses};
