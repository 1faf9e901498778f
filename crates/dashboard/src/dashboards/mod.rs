pub mod d001_content;

pub use d001_content::ui::ContentDashboard;
