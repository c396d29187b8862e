/// One turn of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LightsOn,
    LightsOff,
    /// Pause length in milliseconds, `None` for the configured default.
    Pause(Option<u64>),
    LightStatus,
    /// An action invocation LightBot has no handler for, by bare name without arguments.
    Unknown(String),
    OffTopic,
    Quit,
}

impl Command {
    /// `/Name [arg]` invokes an action, anything else is chat. Returns `None` for blank input.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(invocation) = line.strip_prefix('/') else {
            return Some(if line.to_lowercase().contains("light") {
                Command::LightStatus
            } else {
                Command::OffTopic
            });
        };

        let mut parts = invocation.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let command = match (name.to_lowercase().as_str(), parts.next()) {
            ("lightson", _) => Command::LightsOn,
            ("lightsoff", _) => Command::LightsOff,
            ("lightstatus", _) => Command::LightStatus,
            ("pause", None) => Command::Pause(None),
            ("pause", Some(ms)) => match ms.parse() {
                Ok(ms) => Command::Pause(Some(ms)),
                Err(_) => Command::Unknown(name.to_string()),
            },
            ("quit" | "exit", _) => Command::Quit,
            _ => Command::Unknown(name.to_string()),
        };
        Some(command)
    }
}
