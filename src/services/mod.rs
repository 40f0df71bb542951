//! Business logic services

pub mod auth_service;
pub mod data_service;
pub mod draft_service;

pub use auth_service::{IdentityProvider, LocalCredentials};
pub use data_service::{DataService, StoreMode};
pub use draft_service::{DraftSession, DraftState};
