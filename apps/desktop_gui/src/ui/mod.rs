//! UI layer for desktop GUI: form editor and consultation modal.

pub mod app;

pub use app::{StartupConfig, TodoAiApp};
