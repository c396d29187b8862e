use std::future::Future;
use std::io::BufReader;
use std::pin::Pin;

use anyhow::{Context, Result};
use lightbot::input::spawn_line_reader;
use lightbot::store::{self, Store};
use lightbot::LightBot;
use lightbot_responses::Responder;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::signal;
use utils::{unwrap_or_def_verbose, ResultExt as _};

mod lightbot;
mod logging;
mod utils;

async fn terminate_on_signal() -> Result<()> {
    let interrupt_signal: Pin<Box<dyn Future<Output = _>>> = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::interrupt())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    let terminate_signal = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    futures_util::future::select_all([interrupt_signal, terminate_signal])
        .await
        .0
}

#[tokio::main]
async fn main() -> Result<()> {
    let _logger = logging::init(&store::logs_dir()?)?;
    let store = Store::open_default()?;
    let config = unwrap_or_def_verbose(store.load_config());
    let state = unwrap_or_def_verbose(store.load_state());
    let responder = Responder::with_options(config.responder.clone(), StdRng::from_entropy())
        .context("Invalid responder options in config")?;
    debug!("Index policy: {:?}", responder.policy());
    let mut bot = LightBot::new(state, config, responder, Some(store));

    info!("Running, lights {}", if bot.lights_on() { "on" } else { "off" });
    let input = spawn_line_reader(BufReader::new(std::io::stdin()));
    tokio::select! {
        result = bot.run(input, tokio::io::stdout()) => result?,
        result = terminate_on_signal() => result?,
    }
    info!("Terminating.");
    bot.store_state().print_err();
    Ok(())
}
