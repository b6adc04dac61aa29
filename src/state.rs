use crate::config::AppConfig;
use crate::services::messaging::{MessagingProvider, ProfileProvider};
use crate::services::search::SearchProvider;
use crate::services::slots::{SlotStore, TurnLocks};

pub struct AppState {
    pub config: AppConfig,
    pub slots: Box<dyn SlotStore>,
    pub turn_locks: TurnLocks,
    pub messaging: Box<dyn MessagingProvider>,
    pub profiles: Box<dyn ProfileProvider>,
    pub search: Box<dyn SearchProvider>,
}
