pub mod icons;
pub mod nav;
pub mod page_frame;
