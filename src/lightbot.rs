use std::time::Duration;

use anyhow::Result;
use lightbot_responses::Responder;
use log::{debug, info};
use rand::Rng;
use tokio::io::{AsyncWrite, AsyncWriteExt as _};
use tokio::sync::mpsc;

use crate::utils::ResultExt as _;
use command::Command;
use config::Config;
use conversation::ConversationState;
use store::Store;

pub mod command;
pub mod config;
pub mod conversation;
pub mod input;
pub mod store;

/// Something LightBot does in reply to a command, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Say(String),
    Wait(Duration),
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Reply::Say(text.into())
    }
}

pub struct LightBot<R> {
    state: ConversationState,
    config: Config,
    responder: Responder<R>,
    store: Option<Store>,
}

impl<R: Rng> LightBot<R> {
    /// Without a `store` the conversation state lives only in memory.
    pub fn new(
        state: ConversationState,
        config: Config,
        responder: Responder<R>,
        store: Option<Store>,
    ) -> Self {
        let store = store.filter(|_| config.persist_state);
        LightBot {
            state,
            config,
            responder,
            store,
        }
    }

    pub fn lights_on(&self) -> bool {
        self.state.lights_on
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<Reply> {
        debug!("dispatch({:?})", command);
        match command {
            Command::LightsOn => self.switch_lights(true),
            Command::LightsOff => self.switch_lights(false),
            Command::Pause(requested) => self.pause(requested),
            Command::LightStatus => vec![Reply::Say(
                self.responder.light_status(self.state.lights_on),
            )],
            Command::Unknown(action) => vec![Reply::Say(self.responder.unknown_action(&action))],
            Command::OffTopic => vec![Reply::Say(self.responder.off_topic())],
            Command::Quit => vec![],
        }
    }

    fn switch_lights(&mut self, on: bool) -> Vec<Reply> {
        let word = if on { "on" } else { "off" };
        info!("Lights {word}");
        self.state.lights_on = on;
        self.store_state().print_err();
        vec![
            Reply::say(format!("[lights {word}]")),
            Reply::say(format!("The lights are now {word}.")),
        ]
    }

    fn pause(&self, requested: Option<u64>) -> Vec<Reply> {
        let ms = self.config.pause_ms(requested);
        vec![
            Reply::say(format!("[pausing for {}]", seconds_text(ms))),
            Reply::Wait(Duration::from_millis(ms)),
        ]
    }

    pub fn store_state(&self) -> Result<()> {
        match &self.store {
            Some(store) => store.store_state(&self.state),
            None => Ok(()),
        }
    }

    /// Answers every line of `input` until `/quit` or end of input.
    pub async fn run(
        &mut self,
        mut input: mpsc::Receiver<String>,
        mut output: impl AsyncWrite + Unpin,
    ) -> Result<()> {
        while let Some(line) = input.recv().await {
            let Some(command) = Command::parse(&line) else {
                continue;
            };
            if command == Command::Quit {
                break;
            }
            for reply in self.dispatch(command) {
                match reply {
                    Reply::Say(text) => {
                        output.write_all(text.as_bytes()).await?;
                        output.write_all(b"\n").await?;
                    }
                    Reply::Wait(duration) => {
                        output.flush().await?;
                        info!("Pausing for {duration:?}");
                        tokio::time::sleep(duration).await;
                    }
                }
            }
            output.flush().await?;
        }
        debug!("Conversation finished");
        Ok(())
    }
}

fn seconds_text(ms: u64) -> String {
    if ms == 1000 {
        String::from("1 second")
    } else {
        format!("{} seconds", ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use tempdir::TempDir;

    use super::input::spawn_line_reader;
    use super::*;

    fn test_config() -> Config {
        Config {
            default_pause_ms: 5,
            max_pause_ms: 20,
            ..Default::default()
        }
    }

    /// Always picks the first response of every set.
    fn first_pick_bot(store: Option<Store>) -> LightBot<StepRng> {
        LightBot::new(
            ConversationState::default(),
            test_config(),
            Responder::with_rng(StepRng::new(0, 0)),
            store,
        )
    }

    fn said(texts: &[&str]) -> Vec<Reply> {
        texts.iter().map(|t| Reply::say(*t)).collect()
    }

    #[test]
    fn lights_on_then_status() {
        let mut bot = first_pick_bot(None);
        assert_eq!(
            bot.dispatch(Command::LightsOn),
            said(&["[lights on]", "The lights are now on."])
        );
        assert!(bot.lights_on());
        assert_eq!(
            bot.dispatch(Command::LightStatus),
            said(&["The lights are currently on. Would you like to switch them off?"])
        );
        bot.dispatch(Command::LightsOff);
        assert!(!bot.lights_on());
        assert_eq!(
            bot.dispatch(Command::LightStatus),
            said(&["The lights are currently off. Would you like to switch them on?"])
        );
    }

    #[test]
    fn unknown_and_off_topic_use_responder() {
        let mut bot = first_pick_bot(None);
        assert_eq!(
            bot.dispatch(Command::Unknown("fly".into())),
            said(&["I'm sorry, I'm not sure how to fly."])
        );
        assert_eq!(
            bot.dispatch(Command::OffTopic),
            said(&["I'm sorry, I'm not sure I can help you with that."])
        );
        assert!(bot.dispatch(Command::Quit).is_empty());
    }

    #[test]
    fn pause_announces_then_waits_clamped_length() {
        let mut bot = first_pick_bot(None);
        assert_eq!(
            bot.dispatch(Command::Pause(None)),
            vec![
                Reply::say("[pausing for 0.005 seconds]"),
                Reply::Wait(Duration::from_millis(5)),
            ]
        );
        assert_eq!(
            bot.dispatch(Command::Pause(Some(60_000))),
            vec![
                Reply::say("[pausing for 0.02 seconds]"),
                Reply::Wait(Duration::from_millis(20)),
            ]
        );
    }

    #[test]
    fn switching_lights_persists_state() -> Result<()> {
        let tmp_dir = TempDir::new("lightbot")?;
        let store = Store::new(tmp_dir.path());
        let mut bot = first_pick_bot(Some(store.clone()));

        bot.dispatch(Command::LightsOn);
        assert!(store.load_state()?.lights_on);
        Ok(())
    }

    #[test]
    fn persistence_can_be_disabled() -> Result<()> {
        let tmp_dir = TempDir::new("lightbot")?;
        let config = Config {
            persist_state: false,
            ..test_config()
        };
        let mut bot = LightBot::new(
            ConversationState::default(),
            config,
            Responder::with_rng(StepRng::new(0, 0)),
            Some(Store::new(tmp_dir.path())),
        );

        bot.dispatch(Command::LightsOn);
        assert!(!tmp_dir.path().join("state.yaml").exists());
        Ok(())
    }

    #[tokio::test]
    async fn run_answers_until_quit() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut bot = first_pick_bot(None);
        let input = "/LightsOn\n\nare the lights on?\n/Pause 1\n/Fly\n/quit\n/LightsOff\n";
        let mut output = Vec::new();

        bot.run(spawn_line_reader(input.as_bytes()), &mut output).await?;

        assert_eq!(
            String::from_utf8(output)?,
            "[lights on]\n\
             The lights are now on.\n\
             The lights are currently on. Would you like to switch them off?\n\
             [pausing for 0.001 seconds]\n\
             I'm sorry, I'm not sure how to Fly.\n"
        );
        assert!(bot.lights_on());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_end_conversation() -> Result<()> {
        let mut bot = first_pick_bot(None);
        let mut output = Vec::new();

        bot.run(
            spawn_line_reader(&b"caf\xe9 lights?\n/LightsOn\n"[..]),
            &mut output,
        )
        .await?;

        assert_eq!(
            String::from_utf8(output)?,
            "The lights are currently off. Would you like to switch them on?\n\
             [lights on]\n\
             The lights are now on.\n"
        );
        assert!(bot.lights_on());
        Ok(())
    }

    #[test]
    fn pause_length_reads_naturally() {
        assert_eq!(seconds_text(1000), "1 second");
        assert_eq!(seconds_text(2000), "2 seconds");
        assert_eq!(seconds_text(1500), "1.5 seconds");
        assert_eq!(seconds_text(0), "0 seconds");

        let mut bot = LightBot::new(
            ConversationState::default(),
            Config::default(),
            Responder::with_rng(StepRng::new(0, 0)),
            None,
        );
        assert_eq!(
            bot.dispatch(Command::Pause(None)),
            vec![
                Reply::say("[pausing for 1 second]"),
                Reply::Wait(Duration::from_secs(1)),
            ]
        );
    }
}
