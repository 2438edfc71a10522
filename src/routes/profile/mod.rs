mod handler;
pub mod model;

pub use handler::{add_education, add_experience, add_skill, get_profile, update_profile};
