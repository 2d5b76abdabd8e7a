use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error::{AppError, AppResult};
use crate::xsrf::XsrfToken;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dashboard: Arc<Mutex<Dashboard>>,
    pub xsrf_token: XsrfToken,
}

impl AppState {
    pub fn new(config: Config, dashboard: Dashboard, xsrf_token: XsrfToken) -> Self {
        Self {
            config: Arc::new(config),
            dashboard: Arc::new(Mutex::new(dashboard)),
            xsrf_token,
        }
    }

    pub fn dashboard(&self) -> AppResult<MutexGuard<'_, Dashboard>> {
        self.dashboard
            .lock()
            .map_err(|_| AppError::Internal("Dashboard lock poisoned".into()))
    }

    /// Run `f` against the dashboard while holding the lock.
    pub fn with_dashboard<T>(&self, f: impl FnOnce(&mut Dashboard) -> AppResult<T>) -> AppResult<T> {
        let mut dashboard = self.dashboard()?;
        f(&mut dashboard)
    }
}
