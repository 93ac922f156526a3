//! Application state management.
//!
//! One user store and one recorder per process, shared by every handler.

use domain_users::{InMemoryUserRepository, UserService};
use observability::Recorder;

pub type Users = UserService<InMemoryUserRepository>;

/// Shared application state.
///
/// Cloning is cheap: the user table and the recorder are behind `Arc`s, so
/// every clone sees the same data.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// User store, reporting to `recorder`
    pub users: Users,
    /// Event log and counters
    pub recorder: Recorder,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        let recorder = Recorder::new();
        let users = UserService::new(InMemoryUserRepository::new()).with_recorder(recorder.clone());

        Self {
            config,
            users,
            recorder,
        }
    }
}
