pub mod chapter;
pub mod entity;
pub mod project;
pub mod scene;
