//! Hotspot Core - Domain models, filters, and configuration
//!
//! This crate contains the core domain logic shared by the resolver, the
//! backend adapters, and the view-models.

pub mod config;
pub mod error;
pub mod filter;
pub mod formats;
pub mod models;
pub mod time;

pub use error::{AuthFailure, HotspotError, Permission, Result};
