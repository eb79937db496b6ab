//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// Connection settings for the REST backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    pub token: String,
}

impl ApiConfig {
    pub fn is_complete(&self) -> bool {
        !self.base_url.is_empty() && !self.token.is_empty()
    }
}

const CONFIG_KEY: &str = "pesquera.api-config";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read the saved connection settings, if any.
pub fn load_config() -> Option<ApiConfig> {
    let raw = local_storage()?.get_item(CONFIG_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

pub fn save_config(cfg: &ApiConfig) {
    if let (Some(storage), Ok(raw)) = (local_storage(), serde_json::to_string(cfg)) {
        let _ = storage.set_item(CONFIG_KEY, &raw);
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Backend connection settings - read
    pub config: ReadSignal<Option<ApiConfig>>,
    /// Backend connection settings - write
    set_config: WriteSignal<Option<ApiConfig>>,
    /// Trigger to reload resource lists from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload resource lists from the backend - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        config: (ReadSignal<Option<ApiConfig>>, WriteSignal<Option<ApiConfig>>),
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            config: config.0,
            set_config: config.1,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    /// Persist and adopt new connection settings
    pub fn set_config(&self, cfg: ApiConfig) {
        save_config(&cfg);
        self.set_config.set(Some(cfg));
    }

    /// Trigger a reload of resource lists
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
