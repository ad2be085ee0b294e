//! Shared application state injected into every handler.

use std::sync::Arc;

use url::Url;

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::follow_recorder::FollowRecorder;
use crate::infrastructure::persistence::SqliteLinkRepository;
use crate::stats::Stats;

pub type AppLinkService = LinkService<SqliteLinkRepository>;

/// Request-independent settings the handlers need.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub secret: String,
    /// Maximum `long_url` length in bytes, `None` for no limit.
    pub length_limit: Option<usize>,
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            secret: config.secret.clone(),
            length_limit: config.length_limit(),
        }
    }

    pub fn base_path(&self) -> &str {
        self.base_url.path()
    }

    /// Full short URL for `short_path`: the base URL followed by the path.
    pub fn short_url(&self, short_path: &str) -> String {
        format!("{}{}", self.base_url, short_path)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub follow_recorder: FollowRecorder,
    pub stats: Arc<Stats>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        link_service: Arc<AppLinkService>,
        follow_recorder: FollowRecorder,
        stats: Arc<Stats>,
        settings: Settings,
    ) -> Self {
        Self {
            link_service,
            follow_recorder,
            stats,
            settings: Arc::new(settings),
        }
    }
}
