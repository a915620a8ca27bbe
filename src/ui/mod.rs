pub mod headless;
pub mod modal;
