mod dashboard;

pub use dashboard::{ContentDashboard, ContentTab};
