use crate::config::Config;
use crate::repository::UserStore;
use crate::services::profile::ProfileService;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub profiles: ProfileService,
    pub config: Config,
}

impl AppState {
    pub fn new(users: UserStore, config: Config) -> Self {
        Self {
            profiles: ProfileService::new(users.clone()),
            users,
            config,
        }
    }
}

impl FromRef<AppState> for UserStore {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for ProfileService {
    fn from_ref(state: &AppState) -> Self {
        state.profiles.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
