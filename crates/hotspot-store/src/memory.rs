//! In-memory backend implementations for development and testing.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state.
//!
//! Live data (locations, favorites, sign-in state) lives in `tokio::sync::watch`
//! channels so every subscriber starts from the current value and then sees
//! each change.

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use hotspot_core::error::{AuthFailure, HotspotError, Result};
use hotspot_core::models::{
    Favorite, Location, LocationId, NewReport, RecentReportsQuery, Report, ReportId, User, UserId,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::ports::{AuthProvider, BlobStore, DocumentStore, Subscription};

/// Shortest password the backend accepts
pub const MIN_PASSWORD_LEN: usize = 6;

/// Stored account: the password is kept as a salted SHA-256 digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub user: User,
    pub salt: String,
    pub digest: String,
}

impl AccountRecord {
    fn new(user: User, password: &str) -> Self {
        let salt = uuid::Uuid::new_v4().simple().to_string();
        let digest = password_digest(&salt, password);
        Self { user, salt, digest }
    }

    fn verify(&self, password: &str) -> bool {
        password_digest(&self.salt, password) == self.digest
    }
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_well_formed_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

/// In-memory implementation of AuthProvider
#[derive(Debug, Clone)]
pub struct MemoryAuth {
    accounts: Arc<RwLock<HashMap<String, AccountRecord>>>,
    current: Arc<watch::Sender<Option<User>>>,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self {
            accounts: Arc::default(),
            current: Arc::new(watch::channel(None).0),
        }
    }
}

impl MemoryAuth {
    /// Create a new in-memory auth provider with no accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored accounts, for snapshots
    pub fn accounts(&self) -> Vec<AccountRecord> {
        let mut accounts: Vec<_> = self.accounts.read().unwrap().values().cloned().collect();
        accounts.sort_by(|a, b| a.user.email.cmp(&b.user.email));
        accounts
    }

    /// Replace stored accounts and the signed-in user
    pub fn restore(&self, accounts: Vec<AccountRecord>, session: Option<UserId>) {
        let mut store = self.accounts.write().unwrap();
        store.clear();
        for account in accounts {
            store.insert(normalize_email(&account.user.email), account);
        }
        let current = session
            .and_then(|id| store.values().find(|a| a.user.id == id).map(|a| a.user.clone()));
        self.current.send_replace(current);
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<User> {
        let email = normalize_email(email);
        if !is_well_formed_email(&email) {
            return Err(HotspotError::Auth(AuthFailure::InvalidEmail));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(HotspotError::Auth(AuthFailure::WeakPassword));
        }

        let user = {
            let mut accounts = self.accounts.write().unwrap();
            if accounts.contains_key(&email) {
                return Err(HotspotError::Auth(AuthFailure::EmailAlreadyInUse));
            }
            let display_name = display_name.trim();
            let user = User {
                id: UserId(uuid::Uuid::new_v4().to_string()),
                email: email.clone(),
                display_name: (!display_name.is_empty()).then(|| display_name.to_string()),
            };
            accounts.insert(email, AccountRecord::new(user.clone(), password));
            user
        };

        tracing::info!(user = %user.id, "Account created");
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        if !is_well_formed_email(&email) {
            return Err(HotspotError::Auth(AuthFailure::InvalidEmail));
        }

        let user = {
            let accounts = self.accounts.read().unwrap();
            let account =
                accounts.get(&email).ok_or(HotspotError::Auth(AuthFailure::UserNotFound))?;
            if !account.verify(password) {
                return Err(HotspotError::Auth(AuthFailure::WrongPassword));
            }
            account.user.clone()
        };

        tracing::info!(user = %user.id, "Signed in");
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(user) = self.current.send_replace(None) {
            tracing::info!(user = %user.id, "Signed out");
        }
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    fn watch_auth(&self) -> Subscription<Option<User>> {
        WatchStream::new(self.current.subscribe()).boxed()
    }
}

/// In-memory implementation of DocumentStore
#[derive(Debug, Clone)]
pub struct MemoryDocumentStore {
    locations: Arc<watch::Sender<Vec<Location>>>,
    reports: Arc<RwLock<Vec<Report>>>,
    favorites: Arc<RwLock<HashMap<UserId, Arc<watch::Sender<Vec<Favorite>>>>>>,
    offline: Arc<AtomicBool>,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self {
            locations: Arc::new(watch::channel(Vec::new()).0),
            reports: Arc::default(),
            favorites: Arc::default(),
            offline: Arc::default(),
        }
    }
}

impl MemoryDocumentStore {
    /// Create a new in-memory document store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a lost connection: writes fail until switched back
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self, operation: &str) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(HotspotError::backend(operation, "network unavailable"))
        } else {
            Ok(())
        }
    }

    /// Current locations without going through the async port
    pub fn locations_now(&self) -> Vec<Location> {
        self.locations.borrow().clone()
    }

    /// Replace every location in one change
    pub fn restore_locations(&self, locations: Vec<Location>) {
        self.locations.send_replace(locations);
    }

    /// Store a report exactly as given, keeping its id and timestamp
    pub fn import_report(&self, report: Report) {
        self.reports.write().unwrap().push(report);
    }

    /// Every stored report, oldest first
    pub fn all_reports(&self) -> Vec<Report> {
        let mut reports = self.reports.read().unwrap().clone();
        reports.sort_by_key(|r| r.timestamp);
        reports
    }

    /// Every user's favorites, for snapshots
    pub fn all_favorites(&self) -> HashMap<UserId, Vec<Favorite>> {
        self.favorites
            .read()
            .unwrap()
            .iter()
            .map(|(user, sender)| (user.clone(), sender.borrow().clone()))
            .filter(|(_, favorites)| !favorites.is_empty())
            .collect()
    }

    /// Replace all stored documents
    pub fn restore(
        &self,
        locations: Vec<Location>,
        reports: Vec<Report>,
        favorites: HashMap<UserId, Vec<Favorite>>,
    ) {
        self.locations.send_replace(locations);
        *self.reports.write().unwrap() = reports;

        let existing = self.favorites.read().unwrap().clone();
        for (user, sender) in &existing {
            if !favorites.contains_key(user) {
                sender.send_replace(Vec::new());
            }
        }
        for (user, entries) in favorites {
            self.favorites_channel(&user).send_replace(entries);
        }
    }

    fn favorites_channel(&self, user: &UserId) -> Arc<watch::Sender<Vec<Favorite>>> {
        if let Some(sender) = self.favorites.read().unwrap().get(user) {
            return sender.clone();
        }
        self.favorites
            .write()
            .unwrap()
            .entry(user.clone())
            .or_insert_with(|| Arc::new(watch::channel(Vec::new()).0))
            .clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_report(&self, report: NewReport) -> Result<Report> {
        self.ensure_online("create_report")?;

        let report = report.into_report(ReportId(uuid::Uuid::new_v4().to_string()), Utc::now());
        self.reports.write().unwrap().push(report.clone());
        tracing::debug!(report = %report.id, level = report.crowd_level.level(), "Report stored");
        Ok(report)
    }

    async fn recent_reports(&self, query: &RecentReportsQuery) -> Result<Vec<Report>> {
        let reports = self.reports.read().unwrap();

        let mut matching: Vec<Report> =
            reports.iter().filter(|r| query.matches(r)).cloned().collect();

        // Newest first
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matching.truncate(query.limit);

        Ok(matching)
    }

    async fn list_locations(&self) -> Result<Vec<Location>> {
        Ok(self.locations.borrow().clone())
    }

    fn watch_locations(&self) -> Subscription<Vec<Location>> {
        WatchStream::new(self.locations.subscribe()).boxed()
    }

    async fn put_location(&self, location: &Location) -> Result<()> {
        self.ensure_online("put_location")?;

        self.locations.send_modify(|locations| {
            match locations.iter_mut().find(|l| l.id == location.id) {
                Some(existing) => *existing = location.clone(),
                None => locations.push(location.clone()),
            }
        });
        Ok(())
    }

    async fn remove_location(&self, id: &LocationId) -> Result<()> {
        self.ensure_online("remove_location")?;

        self.locations.send_if_modified(|locations| {
            let before = locations.len();
            locations.retain(|l| &l.id != id);
            locations.len() != before
        });
        Ok(())
    }

    async fn list_favorites(&self, user: &UserId) -> Result<Vec<Favorite>> {
        let favorites = self.favorites.read().unwrap();
        Ok(favorites.get(user).map(|s| s.borrow().clone()).unwrap_or_default())
    }

    fn watch_favorites(&self, user: &UserId) -> Subscription<Vec<Favorite>> {
        WatchStream::new(self.favorites_channel(user).subscribe()).boxed()
    }

    async fn add_favorite(&self, user: &UserId, favorite: &Favorite) -> Result<()> {
        self.ensure_online("add_favorite")?;

        self.favorites_channel(user).send_modify(|favorites| {
            match favorites.iter_mut().find(|f| f.location_id == favorite.location_id) {
                Some(existing) => *existing = favorite.clone(),
                None => favorites.push(favorite.clone()),
            }
        });
        Ok(())
    }

    async fn remove_favorite(&self, user: &UserId, location: &LocationId) -> Result<()> {
        self.ensure_online("remove_favorite")?;

        self.favorites_channel(user).send_if_modified(|favorites| {
            let before = favorites.len();
            favorites.retain(|f| &f.location_id != location);
            favorites.len() != before
        });
        Ok(())
    }
}

/// A stored photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-memory implementation of BlobStore
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    bucket: String,
    blobs: Arc<RwLock<HashMap<String, Blob>>>,
    offline: Arc<AtomicBool>,
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("hotspot")
    }
}

impl MemoryBlobStore {
    /// Create a new in-memory blob store; URLs are prefixed with `bucket`
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            blobs: Arc::default(),
            offline: Arc::default(),
        }
    }

    /// Simulate a lost connection: uploads fail until switched back
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn get(&self, path: &str) -> Option<Blob> {
        self.blobs.read().unwrap().get(path).cloned()
    }

    /// Every stored blob, for snapshots
    pub fn all_blobs(&self) -> HashMap<String, Blob> {
        self.blobs.read().unwrap().clone()
    }

    pub fn restore(&self, blobs: HashMap<String, Blob>) {
        *self.blobs.write().unwrap() = blobs;
    }

    fn url_for(&self, path: &str) -> String {
        format!("memory://{}/{}", self.bucket, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(HotspotError::UploadFailed { reason: "network unavailable".to_string() });
        }
        if path.trim().is_empty() {
            return Err(HotspotError::UploadFailed { reason: "empty storage path".to_string() });
        }

        tracing::debug!(path, size = bytes.len(), "Blob uploaded");
        self.blobs.write().unwrap().insert(
            path.to_string(),
            Blob { bytes, content_type: content_type.to_string() },
        );
        Ok(())
    }

    async fn download_url(&self, path: &str) -> Result<String> {
        if self.blobs.read().unwrap().contains_key(path) {
            Ok(self.url_for(path))
        } else {
            Err(HotspotError::backend("download_url", format!("no object at {}", path)))
        }
    }
}

/// The three in-memory adapters bundled together
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    pub auth: MemoryAuth,
    pub documents: MemoryDocumentStore,
    pub blobs: MemoryBlobStore,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use hotspot_core::models::{Coordinate, CrowdLevel, LocationSnapshot};

    fn location(id: &str, level: CrowdLevel) -> Location {
        Location::new(id, id, Coordinate::new(40.79, -77.86), level, "study")
    }

    fn new_report(location: &Location, level: CrowdLevel) -> NewReport {
        NewReport {
            crowd_level: level,
            additional_info: None,
            photo_url: None,
            location_reported: Some(location.snapshot()),
            author_id: None,
            author_name: "tester".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let auth = MemoryAuth::new();

        let user = auth.sign_up("Student@PSU.edu ", "secret1", "Nittany").await.unwrap();
        assert_eq!(user.email, "student@psu.edu");
        assert_eq!(auth.current_user(), Some(user.clone()));

        auth.sign_out().await.unwrap();
        assert!(auth.current_user().is_none());

        let again = auth.sign_in("student@psu.edu", "secret1").await.unwrap();
        assert_eq!(again.id, user.id);
    }

    #[tokio::test]
    async fn test_auth_failures() {
        let auth = MemoryAuth::new();
        auth.sign_up("a@psu.edu", "secret1", "A").await.unwrap();

        let cases = [
            (auth.sign_up("a@psu.edu", "secret1", "A").await, AuthFailure::EmailAlreadyInUse),
            (auth.sign_up("b@psu.edu", "12345", "B").await, AuthFailure::WeakPassword),
            (auth.sign_up("not-an-email", "secret1", "C").await, AuthFailure::InvalidEmail),
            (auth.sign_in("nobody@psu.edu", "secret1").await, AuthFailure::UserNotFound),
            (auth.sign_in("a@psu.edu", "wrong-pass").await, AuthFailure::WrongPassword),
        ];

        for (result, expected) in cases {
            match result {
                Err(HotspotError::Auth(failure)) => assert_eq!(failure, expected),
                other => panic!("expected {:?}, got {:?}", expected, other),
            }
        }
    }

    #[tokio::test]
    async fn test_passwords_are_not_stored_in_clear() {
        let auth = MemoryAuth::new();
        auth.sign_up("a@psu.edu", "secret1", "A").await.unwrap();
        let account = &auth.accounts()[0];
        assert_ne!(account.digest, "secret1");
        assert_eq!(account.digest.len(), 64);
    }

    #[tokio::test]
    async fn test_watch_auth_starts_with_current_state() {
        let auth = MemoryAuth::new();
        let mut events = auth.watch_auth();
        assert_eq!(events.next().await, Some(None));

        let user = auth.sign_up("a@psu.edu", "secret1", "A").await.unwrap();
        assert_eq!(events.next().await, Some(Some(user)));
    }

    #[tokio::test]
    async fn test_watch_locations_sees_changes() {
        let store = MemoryDocumentStore::new();
        store.put_location(&location("a", CrowdLevel::NotCrowded)).await.unwrap();

        let mut updates = store.watch_locations();
        assert_eq!(updates.next().await.unwrap().len(), 1);

        store.put_location(&location("a", CrowdLevel::VeryCrowded)).await.unwrap();
        let snapshot = updates.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].crowd_level, CrowdLevel::VeryCrowded);

        store.remove_location(&LocationId::new("a")).await.unwrap();
        assert!(updates.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_reports_order_window_and_limit() {
        let store = MemoryDocumentStore::new();
        let rec = location("rec", CrowdLevel::NotCrowded);
        let other = location("other", CrowdLevel::NotCrowded);
        let now = Utc::now();

        for minutes in [5, 150, 30, 90] {
            store.import_report(
                new_report(&rec, CrowdLevel::SomewhatCrowded)
                    .into_report(ReportId(format!("r{}", minutes)), now - Duration::minutes(minutes)),
            );
        }
        store.import_report(
            new_report(&other, CrowdLevel::VeryCrowded).into_report(ReportId("x".into()), now),
        );

        let query = RecentReportsQuery::within(rec.id.clone(), Duration::hours(2), 2, now);
        let ids: Vec<_> =
            store.recent_reports(&query).await.unwrap().into_iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec!["r5", "r30"]);
    }

    #[tokio::test]
    async fn test_reports_keep_snapshot_after_location_removed() {
        let store = MemoryDocumentStore::new();
        let rec = location("rec", CrowdLevel::NotCrowded);
        store.put_location(&rec).await.unwrap();
        let report = store.create_report(new_report(&rec, CrowdLevel::VeryCrowded)).await.unwrap();

        store.remove_location(&rec.id).await.unwrap();

        let stored = &store.all_reports()[0];
        assert_eq!(stored.id, report.id);
        assert_eq!(
            stored.location_reported,
            Some(LocationSnapshot { id: rec.id.clone(), name: "rec".into(), coordinates: rec.coordinates })
        );
    }

    #[tokio::test]
    async fn test_offline_writes_fail() {
        let store = MemoryDocumentStore::new();
        store.set_offline(true);
        let err = store
            .create_report(new_report(&location("a", CrowdLevel::NotCrowded), CrowdLevel::NotCrowded))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(store.all_reports().is_empty());
    }

    #[tokio::test]
    async fn test_favorites_are_per_user() {
        let store = MemoryDocumentStore::new();
        let alice = UserId("alice".into());
        let bob = UserId("bob".into());
        let rec = location("rec", CrowdLevel::NotCrowded);

        let mut alice_updates = store.watch_favorites(&alice);
        assert!(alice_updates.next().await.unwrap().is_empty());

        store.add_favorite(&alice, &Favorite::from(&rec)).await.unwrap();
        store.add_favorite(&alice, &Favorite::from(&rec)).await.unwrap();
        assert_eq!(alice_updates.next().await.unwrap().len(), 1);
        assert!(store.list_favorites(&bob).await.unwrap().is_empty());

        store.remove_favorite(&alice, &rec.id).await.unwrap();
        assert!(alice_updates.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blob_upload_and_url() {
        let blobs = MemoryBlobStore::new("campus");
        assert!(blobs.download_url("reports/a.jpg").await.is_err());

        blobs.upload("reports/a.jpg", vec![1, 2, 3], "image/jpeg").await.unwrap();
        assert_eq!(blobs.download_url("reports/a.jpg").await.unwrap(), "memory://campus/reports/a.jpg");
        assert_eq!(blobs.get("reports/a.jpg").unwrap().bytes, vec![1, 2, 3]);

        blobs.set_offline(true);
        let err = blobs.upload("reports/b.jpg", vec![4], "image/jpeg").await.unwrap_err();
        assert!(matches!(err, HotspotError::UploadFailed { .. }));
    }
}
