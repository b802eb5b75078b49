//! Hotspot App - Screens and navigation as headless view-models
//!
//! Each screen owns its transient state (form fields, notifications, loaded
//! data) and talks to the backend through the ports in `hotspot-store`. The
//! signed-in user is carried by an explicit [`Session`] rather than a global.

pub mod context;
pub mod device;
pub mod navigation;
pub mod notification;
pub mod screens;
pub mod session;
pub mod shell;
pub mod subscription;

pub use context::AppContext;
pub use navigation::{Navigator, Route, Tab};
pub use session::Session;
pub use shell::AppShell;
pub use subscription::LiveSubscription;
