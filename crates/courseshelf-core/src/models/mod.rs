pub mod course;

pub use course::{display_name, Course, CourseMeta};
