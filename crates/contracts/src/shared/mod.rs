pub mod modal;
pub mod notification;
pub mod record;
