pub mod demo;
pub mod navigation;
