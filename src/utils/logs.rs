use std::str::FromStr;
use tracing::Level;

pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

pub fn setup_tracing(level: Level, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
