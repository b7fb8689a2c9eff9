//! Session gate.
//!
//! Single source of truth for whether the visitor is logged in, and the
//! access policy deciding which pages are reachable in which state.
//!
//! ```text
//!                login / signup
//! Unauthenticated ──────────────▶ Authenticated
//!        ▲                              │
//!        └──────────── logout ──────────┘
//! ```
//!
//! Every page load starts unauthenticated (see [`SessionGate::initialize`]).
//! Sessions never expire on their own.

use std::sync::Arc;

use zhimpa_core::error::{Result, ZhimpaError};
use zhimpa_core::navigation::Navigator;
use zhimpa_core::page::Page;
use zhimpa_core::session::{Session, SessionStore, User};

/// Result of evaluating the access policy for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    /// Authentication state at the time of the check
    pub authenticated: bool,
    /// Where the visitor must be sent, if anywhere
    pub redirect: Option<Page>,
}

impl AccessDecision {
    /// Applies the access policy, in order:
    ///
    /// 1. unauthenticated on a protected page: go to login
    /// 2. authenticated on a public page: go home
    /// 3. otherwise stay
    pub fn evaluate(authenticated: bool, page: &Page) -> Self {
        let redirect = if !authenticated && page.is_protected() {
            Some(Page::LOGIN)
        } else if authenticated && page.is_public() {
            Some(Page::HOME)
        } else {
            None
        };

        Self {
            authenticated,
            redirect,
        }
    }
}

#[derive(Clone)]
pub struct SessionGate {
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl SessionGate {
    pub fn new(store: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Clears any persisted session. Runs at the start of every page load.
    pub fn initialize(&self) -> Result<()> {
        tracing::debug!("[SessionGate] Clearing persisted session");
        self.store.clear()
    }

    /// Reads the persisted session. A storage failure reads as anonymous.
    pub fn session(&self) -> Session {
        self.store.get().unwrap_or_else(|e| {
            tracing::warn!("[SessionGate] Failed to read session: {}", e);
            Session::Anonymous
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// The logged in user, or an empty user when no one is logged in.
    pub fn current_user(&self) -> User {
        match self.session() {
            Session::Authenticated(user) => user,
            Session::Anonymous => User::default(),
        }
    }

    /// Evaluates the access policy for `page` and issues its redirect, if any.
    pub fn enforce(&self, page: &Page) -> AccessDecision {
        let decision = AccessDecision::evaluate(self.is_authenticated(), page);

        tracing::debug!(
            "[SessionGate] page={} authenticated={} redirect={:?}",
            page,
            decision.authenticated,
            decision.redirect
        );

        if let Some(target) = &decision.redirect {
            tracing::info!("[SessionGate] Redirecting from {} to {}", page, target);
            self.navigator.navigate(target.clone());
        }

        decision
    }

    /// Enforces the access policy for `page` and returns the authentication
    /// state. Issues at most one navigation.
    pub fn enforce_page_access(&self, page: &Page) -> bool {
        self.enforce(page).authenticated
    }

    /// Logs in with any non-empty email and password.
    ///
    /// Credentials are not verified. The user is named after the local part
    /// of the email.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.is_empty() || password.is_empty() {
            return Err(ZhimpaError::validation("Please fill in all fields"));
        }

        let user = User::from_email(email);
        self.store.set(&user)?;
        tracing::info!("[SessionGate] Logged in as {}", user.name);

        self.navigator.navigate(Page::HOME);
        Ok(user)
    }

    /// Creates an account and logs it in.
    pub fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User> {
        if password != confirm_password {
            return Err(ZhimpaError::validation("Passwords do not match"));
        }
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ZhimpaError::validation("Please fill in all fields"));
        }

        let user = User::new(name, email);
        self.store.set(&user)?;
        tracing::info!("[SessionGate] Account created for {}", user.name);

        self.navigator.navigate(Page::HOME);
        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("[SessionGate] Logged out");

        self.navigator.navigate(Page::LOGIN);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zhimpa_infrastructure::{HistoryNavigator, MemoryStore};

    fn gate() -> (SessionGate, Arc<HistoryNavigator>) {
        let navigator = Arc::new(HistoryNavigator::new());
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        (SessionGate::new(store, navigator.clone()), navigator)
    }

    #[test]
    fn test_policy_table() {
        let cases = [
            (false, Page::Index, Some(Page::Login)),
            (false, Page::Other("blog.html".into()), Some(Page::Login)),
            (false, Page::Login, None),
            (false, Page::Signup, None),
            (true, Page::Login, Some(Page::Index)),
            (true, Page::Signup, Some(Page::Index)),
            (true, Page::Recipe, None),
        ];

        for (authenticated, page, redirect) in cases {
            let decision = AccessDecision::evaluate(authenticated, &page);
            assert_eq!(decision.redirect, redirect, "page={page} auth={authenticated}");
            assert_eq!(decision.authenticated, authenticated);
        }
    }

    #[test]
    fn test_initialize_clears_session() {
        let (gate, _) = gate();
        gate.login("a@b.com", "pw").unwrap();
        assert!(gate.is_authenticated());

        gate.initialize().unwrap();
        assert!(!gate.is_authenticated());
        assert_eq!(gate.current_user(), User::default());
    }

    #[test]
    fn test_initialize_on_fresh_store() {
        let (gate, _) = gate();
        gate.initialize().unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_unauthenticated_protected_page_redirects_to_login() {
        let (gate, navigator) = gate();
        assert!(!gate.enforce_page_access(&Page::Index));
        assert_eq!(navigator.history(), vec![Page::Login]);
    }

    #[test]
    fn test_authenticated_public_page_redirects_home() {
        let (gate, navigator) = gate();
        gate.login("a@b.com", "pw").unwrap();
        navigator.take_pending();

        assert!(gate.enforce_page_access(&Page::Login));
        assert_eq!(navigator.take_pending(), Some(Page::Index));
    }

    #[test]
    fn test_no_redirect_when_page_matches_state() {
        let (gate, navigator) = gate();
        assert!(!gate.enforce_page_access(&Page::Signup));
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_enforce_is_idempotent_after_redirect() {
        let (gate, navigator) = gate();
        gate.enforce_page_access(&Page::Recipe);
        let target = navigator.take_pending().unwrap();

        // The destination evaluates against its own classification
        assert!(!gate.enforce_page_access(&target));
        assert!(navigator.take_pending().is_none());
    }

    #[test]
    fn test_login_derives_name_and_navigates_home() {
        let (gate, navigator) = gate();
        let user = gate.login("a@b.com", "pw").unwrap();

        assert_eq!(user.name, "a");
        assert_eq!(gate.current_user().name, "a");
        assert_eq!(gate.current_user().email, "a@b.com");
        assert!(gate.is_authenticated());
        assert_eq!(navigator.take_pending(), Some(Page::Index));
    }

    #[test]
    fn test_login_with_empty_field_fails_and_keeps_session() {
        let (gate, navigator) = gate();

        let err = gate.login("", "pw").unwrap_err();
        assert!(err.is_validation());
        assert!(gate.login("a@b.com", "").unwrap_err().is_validation());

        assert!(!gate.is_authenticated());
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let (gate, _) = gate();
        gate.login("first@b.com", "pw").unwrap();

        assert!(gate.login("", "pw").is_err());
        assert_eq!(gate.current_user().name, "first");
    }

    #[test]
    fn test_signup_password_mismatch() {
        let (gate, navigator) = gate();
        let err = gate.signup("N", "e@x.com", "p1", "p2").unwrap_err();

        assert_eq!(err, ZhimpaError::validation("Passwords do not match"));
        assert!(!gate.is_authenticated());
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_signup_missing_fields() {
        let (gate, _) = gate();
        let err = gate.signup("", "e@x.com", "p1", "p1").unwrap_err();
        assert_eq!(err, ZhimpaError::validation("Please fill in all fields"));

        // Mismatch is reported before emptiness
        let err = gate.signup("", "e@x.com", "", "x").unwrap_err();
        assert_eq!(err, ZhimpaError::validation("Passwords do not match"));
    }

    #[test]
    fn test_signup_keeps_given_name() {
        let (gate, navigator) = gate();
        let user = gate.signup("Efua", "e@x.com", "p1", "p1").unwrap();

        assert_eq!(user, User::new("Efua", "e@x.com"));
        assert_eq!(gate.current_user(), user);
        assert_eq!(navigator.take_pending(), Some(Page::Index));
    }

    #[test]
    fn test_logout_resets_and_navigates_to_login() {
        let (gate, navigator) = gate();
        gate.login("a@b.com", "pw").unwrap();

        gate.logout().unwrap();

        assert!(!gate.is_authenticated());
        assert_eq!(gate.session().user(), None);
        assert_eq!(navigator.take_pending(), Some(Page::Login));
    }

    #[test]
    fn test_logout_when_anonymous() {
        let (gate, _) = gate();
        gate.logout().unwrap();
        assert!(!gate.is_authenticated());
    }
}
