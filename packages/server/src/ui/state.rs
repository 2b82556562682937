//! Shared application state.

use std::{sync::Arc, time::Duration};

use crate::{
    config::ServerConfig,
    domain::{CommunityRepository, EventPublisher},
    infrastructure::{realtime::BroadcastRegistry, repository::InMemoryCommunityRepository},
};

/// Shared application state
pub struct AppState {
    /// Document store（データアクセス層の抽象化）
    pub repository: Arc<dyn CommunityRepository>,
    /// Open real-time channels; constructed once per process
    pub registry: Arc<BroadcastRegistry>,
    /// Keep-alive interval for new channels
    pub ping_interval: Duration,
    /// Static password for the admin endpoints
    pub admin_password: String,
}

impl AppState {
    /// State backed by the in-memory document store
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_repository(config, Arc::new(InMemoryCommunityRepository::default()))
    }

    pub fn with_repository(
        config: &ServerConfig,
        repository: Arc<dyn CommunityRepository>,
    ) -> Self {
        Self {
            repository,
            registry: Arc::new(BroadcastRegistry::new()),
            ping_interval: config.ping_interval,
            admin_password: config.admin_password.clone(),
        }
    }

    /// The registry seen through its publish interface
    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        self.registry.clone()
    }
}
