pub mod encode;
pub mod summary;
