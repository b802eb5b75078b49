//! Navigation state machine
//!
//! Auth state picks the stack: a splash route until the first auth event,
//! then the login/sign-up pair when signed out or the tab stack when signed
//! in. Each tab keeps its own detail stack.

use hotspot_core::models::{LocationId, User};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Report,
    Map,
    Favorites,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Report => "Report",
            Tab::Map => "Map",
            Tab::Favorites => "Favorites",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Splash,
    Login,
    Signup,
    Tab(Tab),
    Detail {
        tab: Tab,
        location_id: LocationId,
        location_name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stack {
    Splash,
    Auth { signup: bool },
    Main,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Stack,
    tab: Tab,
    details: HashMap<Tab, (LocationId, String)>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: Stack::Splash,
            tab: Tab::Map,
            details: HashMap::new(),
        }
    }

    pub fn current(&self) -> Route {
        match self.stack {
            Stack::Splash => Route::Splash,
            Stack::Auth { signup: false } => Route::Login,
            Stack::Auth { signup: true } => Route::Signup,
            Stack::Main => match self.details.get(&self.tab) {
                Some((id, name)) => Route::Detail {
                    tab: self.tab,
                    location_id: id.clone(),
                    location_name: name.clone(),
                },
                None => Route::Tab(self.tab),
            },
        }
    }

    /// Apply an auth event. Switching stacks resets the tab state.
    pub fn on_auth_change(&mut self, user: Option<&User>) {
        match (user, self.stack) {
            (Some(_), Stack::Main) => {}
            (Some(_), _) => {
                self.stack = Stack::Main;
                self.tab = Tab::Map;
                self.details.clear();
            }
            (None, Stack::Auth { .. }) => {}
            (None, _) => {
                self.stack = Stack::Auth { signup: false };
                self.details.clear();
            }
        }
        tracing::debug!(route = ?self.current(), "Auth state applied");
    }

    pub fn show_signup(&mut self) {
        if let Stack::Auth { .. } = self.stack {
            self.stack = Stack::Auth { signup: true };
        }
    }

    pub fn show_login(&mut self) {
        if let Stack::Auth { .. } = self.stack {
            self.stack = Stack::Auth { signup: false };
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.stack == Stack::Main {
            self.tab = tab;
        }
    }

    /// Push the detail view for a location onto the current tab
    pub fn open_detail(&mut self, location_id: LocationId, location_name: impl Into<String>) {
        if self.stack == Stack::Main {
            self.details.insert(self.tab, (location_id, location_name.into()));
        }
    }

    /// Pop one level; returns false when there was nothing to pop
    pub fn back(&mut self) -> bool {
        match self.stack {
            Stack::Auth { signup: true } => {
                self.stack = Stack::Auth { signup: false };
                true
            }
            Stack::Main => self.details.remove(&self.tab).is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotspot_core::models::UserId;

    fn user() -> User {
        User {
            id: UserId("u1".into()),
            email: "ann@psu.edu".into(),
            display_name: None,
        }
    }

    #[test]
    fn test_splash_until_first_auth_event() {
        let mut nav = Navigator::new();
        assert_eq!(nav.current(), Route::Splash);

        nav.on_auth_change(None);
        assert_eq!(nav.current(), Route::Login);

        nav.on_auth_change(Some(&user()));
        assert_eq!(nav.current(), Route::Tab(Tab::Map));
    }

    #[test]
    fn test_auth_stack_toggles() {
        let mut nav = Navigator::new();
        nav.on_auth_change(None);
        nav.show_signup();
        assert_eq!(nav.current(), Route::Signup);
        assert!(nav.back());
        assert_eq!(nav.current(), Route::Login);
        assert!(!nav.back());

        // tab selection is ignored while signed out
        nav.select_tab(Tab::Favorites);
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn test_detail_stack_per_tab() {
        let mut nav = Navigator::new();
        nav.on_auth_change(Some(&user()));
        nav.open_detail(LocationId::new("hub"), "HUB");
        assert!(matches!(nav.current(), Route::Detail { tab: Tab::Map, .. }));

        nav.select_tab(Tab::Report);
        assert_eq!(nav.current(), Route::Tab(Tab::Report));

        nav.select_tab(Tab::Map);
        assert!(nav.back());
        assert_eq!(nav.current(), Route::Tab(Tab::Map));
        assert!(!nav.back());
    }

    #[test]
    fn test_detail_on_one_tab_keeps_the_other() {
        let mut nav = Navigator::new();
        nav.on_auth_change(Some(&user()));
        nav.open_detail(LocationId::new("hub"), "HUB");

        nav.select_tab(Tab::Favorites);
        nav.open_detail(LocationId::new("pattee"), "Pattee Library");

        nav.select_tab(Tab::Map);
        assert_eq!(
            nav.current(),
            Route::Detail {
                tab: Tab::Map,
                location_id: LocationId::new("hub"),
                location_name: "HUB".to_string(),
            }
        );

        nav.select_tab(Tab::Favorites);
        assert!(nav.back());
        assert_eq!(nav.current(), Route::Tab(Tab::Favorites));

        nav.select_tab(Tab::Map);
        assert!(matches!(nav.current(), Route::Detail { tab: Tab::Map, .. }));
    }

    #[test]
    fn test_sign_out_returns_to_login() {
        let mut nav = Navigator::new();
        nav.on_auth_change(Some(&user()));
        nav.select_tab(Tab::Favorites);
        nav.on_auth_change(None);
        assert_eq!(nav.current(), Route::Login);

        nav.on_auth_change(Some(&user()));
        assert_eq!(nav.current(), Route::Tab(Tab::Map));
    }
}
