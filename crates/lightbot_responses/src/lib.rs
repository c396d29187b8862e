//! Canned replies for LightBot.
//!
//! A [`Responder`] picks one template from a fixed response set and fills in its placeholders.
//! Randomness is injected, so a seeded or mock generator gives reproducible output.

use log::trace;
use rand::rngs::ThreadRng;
use rand::Rng;
use thiserror::Error;

mod options;
pub mod responses;

pub use options::{IndexPolicy, ResponderOptions};
pub use responses::ResponseSets;

use responses::{ACTION, CURRENTLY, OPPOSITE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponsesError {
    #[error("Response set `{0}` is empty")]
    EmptyResponseSet(&'static str),
}

pub struct Responder<R = ThreadRng> {
    rng: R,
    policy: IndexPolicy,
    sets: ResponseSets,
}

impl Responder<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for Responder<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Responder<R> {
    /// Built-in English responses with the [`IndexPolicy::Observed`] pick.
    pub fn with_rng(rng: R) -> Self {
        Responder {
            rng,
            policy: IndexPolicy::default(),
            sets: ResponseSets::default(),
        }
    }

    pub fn with_options(options: ResponderOptions, rng: R) -> Result<Self, ResponsesError> {
        options.responses.validate()?;
        Ok(Responder {
            rng,
            policy: options.index_policy,
            sets: options.responses,
        })
    }

    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Current state of the lights followed by an offer to flip them. The offer may be empty.
    pub fn light_status(&mut self, status: bool) -> String {
        let (currently, opposite) = if status { ("on", "off") } else { ("off", "on") };
        let state = pick_random(&mut self.rng, self.policy, &self.sets.light_state)
            .replace(CURRENTLY, currently);
        let suggestion = pick_random(&mut self.rng, self.policy, &self.sets.light_suggestion)
            .replace(OPPOSITE, opposite);
        state + &suggestion
    }

    /// `action` is inserted verbatim, whatever it contains.
    pub fn unknown_action(&mut self, action: &str) -> String {
        pick_random(&mut self.rng, self.policy, &self.sets.unknown_action).replace(ACTION, action)
    }

    pub fn off_topic(&mut self) -> String {
        pick_random(&mut self.rng, self.policy, &self.sets.off_topic).clone()
    }
}

fn pick_random<'a, T>(rng: &mut impl Rng, policy: IndexPolicy, options: &'a [T]) -> &'a T {
    let u: f64 = rng.gen();
    let index = policy.pick_index(u, options.len());
    trace!("Picked response {}/{} ({policy:?})", index + 1, options.len());
    &options[index]
}
