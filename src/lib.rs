//! BioCode - Client Data Layer
//!
//! This library provides the data access core of the BioCode platform, a
//! browser-style learning environment for bioinformatics coding problems.
//!
//! # Features
//!
//! - Dual-path data access: remote REST API with transparent local fallback
//! - Availability probing with a one-shot, permanent fallback switch
//! - Local CRUD emulation over a key-value blob store, with seed data
//! - Problem editor draft autosave with a single global slot
//! - Capability-based identity with a local credential backend
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Services**: Dispatch, draft autosave, and identity logic
//! - **Store**: Remote API client, local fallback store, storage façade
//! - **Models**: Domain records and request DTOs

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::{DataService, StoreMode};
