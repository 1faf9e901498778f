//! Save confirmation and image upload modals

mod view_model;

pub use view_model::{SaveTextConfirm, UploadImageForm};
