use lightbot_responses::ResponderOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub responder: ResponderOptions,

    /// Used by `/Pause` without an argument.
    #[serde(default = "default_pause_ms")]
    pub default_pause_ms: u64,

    #[serde(default = "default_max_pause_ms")]
    pub max_pause_ms: u64,

    /// Keep the lights state between runs. Disable for throwaway sessions.
    #[serde(default = "default_persist_state")]
    pub persist_state: bool,
}

fn default_pause_ms() -> u64 {
    1000
}

fn default_max_pause_ms() -> u64 {
    10 * 1000
}

fn default_persist_state() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            responder: Default::default(),
            default_pause_ms: default_pause_ms(),
            max_pause_ms: default_max_pause_ms(),
            persist_state: default_persist_state(),
        }
    }
}

impl Config {
    pub fn pause_ms(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_pause_ms)
            .min(self.max_pause_ms)
    }
}
