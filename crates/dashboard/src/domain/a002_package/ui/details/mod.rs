//! Pricing and package description modal forms

mod model;
mod view_model;

pub use view_model::{EditDescriptionForm, EditPricingForm};
