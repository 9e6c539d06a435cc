pub mod modal;
pub mod ui;
