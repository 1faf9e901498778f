//! FAQ modal forms (add, edit, delete confirmation)
//!
//! - model.rs: store access
//! - view_model.rs: form state, validation and commands

mod model;
mod view_model;

pub use view_model::{
    AddFaqForm, DeleteFaqConfirm, EditFaqForm, FAQ_ADDED, FAQ_ADD_FAILED, FAQ_DELETED,
    FAQ_DELETE_FAILED, FILL_ALL_FIELDS,
};
