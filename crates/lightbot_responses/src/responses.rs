use serde::{Deserialize, Serialize};

use crate::ResponsesError;

pub const CURRENTLY: &str = "{currently}";
pub const OPPOSITE: &str = "{opposite}";
pub const ACTION: &str = "{action}";

pub const LIGHT_STATE: [&str; 5] = [
    "The lights are currently {currently}.",
    "It looks like the lights are {currently}.",
    "Right now the lights are {currently}.",
    "The lights are {currently} at the moment.",
    "They are {currently}.",
];

/// Appended to a [`LIGHT_STATE`] phrase, so every non-empty entry starts with a space.
pub const LIGHT_SUGGESTION: [&str; 5] = [
    " Would you like to switch them {opposite}?",
    " Should I turn them {opposite}?",
    " Can I flip them {opposite} for you?",
    " Would you like them {opposite}?",
    "",
];

pub const UNKNOWN_ACTION: [&str; 5] = [
    "I'm sorry, I'm not sure how to {action}.",
    "I don't know the first thing about {action}.",
    "I'm not sure I'm the best person to help with {action}.",
    "I'm still learning about {action}, but I'll try my best.",
    "I'm afraid I'm not experienced enough with {action}.",
];

pub const OFF_TOPIC: [&str; 5] = [
    "I'm sorry, I'm not sure I can help you with that.",
    "I'm sorry, I'm afraid I'm not allowed to talk about such things.",
    "I'm sorry, I'm not sure I'm the right person to help you with that.",
    "I wish I could help you with that, but it's not something I can talk about.",
    "I'm sorry, I'm not allowed to discuss that topic.",
];

/// All templates a [`crate::Responder`] chooses from. Missing fields fall back to the built-in
/// English tables, so a localization file only needs to list the sets it overrides.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ResponseSets {
    pub light_state: Vec<String>,
    pub light_suggestion: Vec<String>,
    pub unknown_action: Vec<String>,
    pub off_topic: Vec<String>,
}

impl Default for ResponseSets {
    fn default() -> Self {
        Self {
            light_state: to_owned(&LIGHT_STATE),
            light_suggestion: to_owned(&LIGHT_SUGGESTION),
            unknown_action: to_owned(&UNKNOWN_ACTION),
            off_topic: to_owned(&OFF_TOPIC),
        }
    }
}

impl ResponseSets {
    pub fn validate(&self) -> Result<(), ResponsesError> {
        let sets = [
            ("lightState", &self.light_state),
            ("lightSuggestion", &self.light_suggestion),
            ("unknownAction", &self.unknown_action),
            ("offTopic", &self.off_topic),
        ];
        for (name, set) in sets {
            if set.is_empty() {
                return Err(ResponsesError::EmptyResponseSet(name));
            }
        }
        Ok(())
    }
}

fn to_owned(set: &[&str]) -> Vec<String> {
    set.iter().map(|s| s.to_string()).collect()
}
