use serde::{Deserialize, Serialize};

use crate::responses::ResponseSets;

/// How a unit sample `u` in `[0, 1)` is turned into an index into a response set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexPolicy {
    /// `floor(u * (len - 1))`: the last entry of a set is never picked.
    #[default]
    Observed,
    /// `floor(u * len)`: every entry can be picked.
    Uniform,
}

impl IndexPolicy {
    pub fn pick_index(self, u: f64, len: usize) -> usize {
        debug_assert!(len > 0, "response set must not be empty");
        let span = match self {
            IndexPolicy::Observed => len.saturating_sub(1),
            IndexPolicy::Uniform => len,
        };
        ((u * span as f64).floor() as usize).min(len.saturating_sub(1))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ResponderOptions {
    pub index_policy: IndexPolicy,
    pub responses: ResponseSets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_policy_never_reaches_last_index() {
        assert_eq!(IndexPolicy::Observed.pick_index(0.0, 5), 0);
        assert_eq!(IndexPolicy::Observed.pick_index(0.5, 5), 2);
        assert_eq!(IndexPolicy::Observed.pick_index(0.999_999, 5), 3);
        assert_eq!(IndexPolicy::Observed.pick_index(0.999_999, 1), 0);
    }

    #[test]
    fn uniform_policy_reaches_last_index() {
        assert_eq!(IndexPolicy::Uniform.pick_index(0.0, 5), 0);
        assert_eq!(IndexPolicy::Uniform.pick_index(0.999_999, 5), 4);
        assert_eq!(IndexPolicy::Uniform.pick_index(1.0, 5), 4);
        assert_eq!(IndexPolicy::Uniform.pick_index(0.7, 1), 0);
    }

    #[test]
    fn options_default_from_empty_yaml() {
        let options: ResponderOptions = serde_yaml::from_str("{}").unwrap();
        assert_eq!(options, ResponderOptions::default());
        assert_eq!(options.index_policy, IndexPolicy::Observed);
    }

    #[test]
    fn index_policy_is_camel_case() {
        let options: ResponderOptions = serde_yaml::from_str("indexPolicy: uniform").unwrap();
        assert_eq!(options.index_policy, IndexPolicy::Uniform);
    }
}
