mod theme;

pub mod app;
pub mod config;
pub mod widgets;

pub use theme::Theme;
