//! Screen view-models
//!
//! Each screen keeps its state behind an `Arc<Mutex<_>>` so a live
//! subscription can update it while the screen is active. `activate` and
//! `deactivate` mirror the screen gaining and losing focus.

pub mod detail;
pub mod favorites;
pub mod map;
pub mod report;

pub use detail::{DetailScreen, DetailState, ReportRow};
pub use favorites::{FavoritesScreen, FavoritesState};
pub use map::{MapPin, MapScreen, MapState};
pub use report::{ReportForm, ReportScreen, ReportState};
