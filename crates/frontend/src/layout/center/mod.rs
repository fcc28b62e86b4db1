pub mod center;
pub mod error_panel;
pub mod page;
pub mod subnav;

pub use center::Center;
pub use page::PageShell;
