pub mod details;
pub mod legal;
pub mod section;
