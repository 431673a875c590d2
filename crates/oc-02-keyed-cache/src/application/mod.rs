//! Application layer: the cached services.

pub mod course_catalog;
pub mod user_directory;

pub use course_catalog::CourseCatalog;
pub use user_directory::UserDirectory;
