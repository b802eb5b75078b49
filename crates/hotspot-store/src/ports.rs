use async_trait::async_trait;
use futures::stream::BoxStream;
use hotspot_core::error::Result;
use hotspot_core::models::{
    Favorite, Location, LocationId, NewReport, RecentReportsQuery, Report, User, UserId,
};

/// A live subscription: yields the current snapshot first, then one snapshot
/// per change. Dropping the stream unsubscribes.
pub type Subscription<T> = BoxStream<'static, T>;

/// Port for account management and sign-in state
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create an account and sign it in
    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<User>;

    /// Sign in with existing credentials
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    /// Sign out the current user, if any
    async fn sign_out(&self) -> Result<()>;

    /// The signed-in user right now
    fn current_user(&self) -> Option<User>;

    /// Sign-in state changes, starting with the current state
    fn watch_auth(&self) -> Subscription<Option<User>>;
}

/// Port for the document collections: locations, reports, and per-user favorites
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a report; the store assigns the id and timestamp
    async fn create_report(&self, report: NewReport) -> Result<Report>;

    /// Reports for one location newer than the query cutoff, newest first
    async fn recent_reports(&self, query: &RecentReportsQuery) -> Result<Vec<Report>>;

    /// All locations
    async fn list_locations(&self) -> Result<Vec<Location>>;

    /// Live view of all locations
    fn watch_locations(&self) -> Subscription<Vec<Location>>;

    /// Insert or replace a location
    async fn put_location(&self, location: &Location) -> Result<()>;

    /// Delete a location. Reports keep their snapshot of it.
    async fn remove_location(&self, id: &LocationId) -> Result<()>;

    /// A user's favorites
    async fn list_favorites(&self, user: &UserId) -> Result<Vec<Favorite>>;

    /// Live view of a user's favorites
    fn watch_favorites(&self, user: &UserId) -> Subscription<Vec<Favorite>>;

    /// Add or replace a favorite
    async fn add_favorite(&self, user: &UserId, favorite: &Favorite) -> Result<()>;

    /// Remove a favorite; missing entries are ignored
    async fn remove_favorite(&self, user: &UserId, location: &LocationId) -> Result<()>;
}

/// Port for photo storage
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `path`, replacing anything already there
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Public URL for a stored blob
    async fn download_url(&self, path: &str) -> Result<String>;
}
