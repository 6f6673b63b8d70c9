pub mod courses;
pub mod upload;

pub use courses::get_courses;
pub use upload::upload_course;
