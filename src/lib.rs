// Theme library - typed visual constants for the land cover dashboard

pub mod color;
pub mod config;
pub mod dimension;
pub mod export;
pub mod theme;

pub use theme::Theme;
