//! Configuration module.
//!
//! Handles loading and saving the TOML settings file.

mod settings;

pub use settings::{GeneralSettings, Settings, TranscriptSettings, WeatherSettings};
