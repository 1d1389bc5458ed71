//! A single colored triangle, moved with the arrow keys and spun with A/D.
//!
//! The per-frame logic lives in [`controller::FrameLoop`]; everything under
//! [`view`] is one-time GPU setup plus the draw call.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use app::run;
pub use config::Settings;
pub use error::StartupError;
