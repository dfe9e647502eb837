pub mod config;

pub use config::{parse_colors, Preset};
