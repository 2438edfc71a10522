mod handler;
pub mod model;

pub use handler::{get_job, list_jobs, recommended_jobs};
