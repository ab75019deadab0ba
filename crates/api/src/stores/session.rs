use tokio::sync::RwLock;

/// Tokens and home region of the signed-in eWeLink account.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Region the account lives in (`eu`, `us`, `as`, `cn`); selects the
    /// API base URL for every call made on this session.
    pub region: String,
}

/// Holds the portal's single login session plus the `state` nonce of an
/// OAuth flow in progress.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. A second completed login overwrites the
/// first (last-write-wins), matching the single-account model.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    session: Option<Session>,
    pending_state: Option<String>,
}

impl SessionStore {
    /// Create a new, logged-out store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an OAuth login: generate and remember the `state` nonce the
    /// callback must echo. Starting a new login invalidates any earlier
    /// pending nonce.
    pub async fn begin_login(&self) -> String {
        let state = uuid::Uuid::new_v4().simple().to_string();
        self.inner.write().await.pending_state = Some(state.clone());
        state
    }

    /// Consume the pending `state` nonce if it matches the echoed value.
    ///
    /// Each nonce is good for exactly one callback: a match clears it, so a
    /// replayed callback fails the check.
    pub async fn take_state(&self, echoed: &str) -> bool {
        let mut inner = self.inner.write().await;
        if !echoed.is_empty() && inner.pending_state.as_deref() == Some(echoed) {
            inner.pending_state = None;
            true
        } else {
            false
        }
    }

    /// Replace the current session after a completed token exchange.
    pub async fn set(&self, session: Session) {
        self.inner.write().await.session = Some(session);
    }

    /// The current session, if logged in.
    pub async fn get(&self) -> Option<Session> {
        self.inner.read().await.session.clone()
    }
}
