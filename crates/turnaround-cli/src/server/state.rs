//! Application state for the HTTP server.

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::debug;
use turnaround_core::DashboardConfig;
use turnaround_engine::InMemoryProvider;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Base dataset, read-only once the server is up
    pub provider: Arc<InMemoryProvider>,
    pub config: Arc<DashboardConfig>,
    pub sessions: Arc<SessionStore>,
    /// Fixed anchor for date scopes; `None` uses the local date per request
    pub today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(config: DashboardConfig, provider: InMemoryProvider) -> Self {
        Self {
            provider: Arc::new(provider),
            config: Arc::new(config),
            sessions: Arc::new(SessionStore::default()),
            today: None,
        }
    }

    /// Pin the date used for `today`/`yesterday` scopes
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Default number of live sessions kept before the oldest is dropped
pub const MAX_SESSIONS: usize = 1_024;

#[derive(Debug, Default)]
struct Tokens {
    /// Live tokens, oldest first
    order: VecDeque<String>,
    live: HashSet<String>,
}

/// Session tokens issued by successful logins
///
/// Holds at most `capacity` tokens; issuing past that evicts the oldest.
#[derive(Debug)]
pub struct SessionStore {
    tokens: Mutex<Tokens>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Mutex::new(Tokens::default()),
            capacity: capacity.max(1),
        }
    }

    /// Issue a fresh random token
    pub fn issue(&self) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let mut tokens = self.tokens.lock();
        while tokens.live.len() >= self.capacity {
            match tokens.order.pop_front() {
                Some(oldest) => {
                    tokens.live.remove(&oldest);
                    debug!("oldest session evicted");
                }
                None => break,
            }
        }
        tokens.order.push_back(token.clone());
        tokens.live.insert(token.clone());
        token
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.tokens.lock().live.contains(token)
    }

    /// Forget a token; returns whether it was live
    pub fn revoke(&self, token: &str) -> bool {
        let mut tokens = self.tokens.lock();
        if !tokens.live.remove(token) {
            return false;
        }
        tokens.order.retain(|t| t != token);
        true
    }

    pub fn len(&self) -> usize {
        self.tokens.lock().live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.lock().live.is_empty()
    }
}
