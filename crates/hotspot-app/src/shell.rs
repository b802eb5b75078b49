use crate::context::AppContext;
use crate::navigation::{Navigator, Route};
use crate::session::Session;
use crate::subscription::LiveSubscription;
use hotspot_core::models::User;
use std::sync::{Arc, Mutex};

/// Top-level app: owns the session and keeps the navigator in step with
/// auth state for as long as it is running
pub struct AppShell {
    context: AppContext,
    session: Session,
    navigator: Arc<Mutex<Navigator>>,
    auth_subscription: Option<LiveSubscription>,
}

impl AppShell {
    pub fn new(context: AppContext) -> Self {
        let session = Session::new(context.auth.clone(), context.settings.clone());
        Self {
            context,
            session,
            navigator: Arc::new(Mutex::new(Navigator::new())),
            auth_subscription: None,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start listening for auth changes; idempotent
    pub fn start(&mut self) {
        if self.auth_subscription.is_some() {
            return;
        }
        self.auth_subscription = Some(LiveSubscription::spawn(
            "auth",
            self.session.subscribe(),
            self.navigator.clone(),
            |nav: &mut Navigator, user: Option<User>| nav.on_auth_change(user.as_ref()),
        ));
    }

    /// Wait until the navigator has seen `count` auth events
    pub async fn wait_auth_events(&mut self, count: u64) {
        if let Some(sub) = self.auth_subscription.as_mut() {
            sub.wait_applied(count).await;
        }
    }

    pub fn route(&self) -> Route {
        self.navigator.lock().unwrap().current()
    }

    /// Run `f` against the navigator
    pub fn navigate<R>(&self, f: impl FnOnce(&mut Navigator) -> R) -> R {
        f(&mut self.navigator.lock().unwrap())
    }

    pub fn stop(&mut self) {
        if let Some(mut sub) = self.auth_subscription.take() {
            sub.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Tab;
    use crate::session::SignupForm;
    use hotspot_core::config::AppSettings;
    use hotspot_store::memory::MemoryBackend;

    #[tokio::test]
    async fn test_route_follows_auth_state() {
        let backend = MemoryBackend::new();
        let mut shell = AppShell::new(AppContext::from_memory(&backend, AppSettings::default()));
        assert_eq!(shell.route(), Route::Splash);

        shell.start();
        shell.wait_auth_events(1).await;
        assert_eq!(shell.route(), Route::Login);

        shell
            .session()
            .sign_up(&SignupForm::new("Ann", "ann@psu.edu", "secret1"))
            .await
            .unwrap();
        shell.wait_auth_events(2).await;
        assert_eq!(shell.route(), Route::Tab(Tab::Map));

        shell.stop();
        shell.session().sign_out().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(shell.route(), Route::Tab(Tab::Map));
    }
}
