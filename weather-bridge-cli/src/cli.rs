use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;
use weather_bridge_core::{Config, Coordinate, HostEvent, StdoutSink, WeatherFetcher, log_host_event};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-bridge", version, about = "Current weather for a paired watch")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure {
        /// Key to store; prompted for when absent.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Fetch current weather and print the watch message as one JSON line.
    Fetch {
        /// Latitude in decimal degrees.
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in decimal degrees.
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Use this key instead of the stored one.
        #[arg(long)]
        api_key: Option<String>,

        /// Override the provider base URL.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Read host lifecycle events (JSON lines) from stdin and log them.
    Events,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Fetch { latitude, longitude, api_key, base_url } => {
                fetch(Coordinate::new(latitude, longitude), api_key, base_url).await
            }
            Command::Events => {
                replay_events(BufReader::new(tokio::io::stdin())).await?;
                Ok(())
            }
        }
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => inquire::Password::new("OpenWeatherMap API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };
    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn fetch(coord: Coordinate, api_key: Option<String>, base_url: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(key) = api_key {
        config.set_api_key(key);
    }
    if let Some(url) = base_url {
        config.base_url = url;
    }

    let fetcher = WeatherFetcher::with_reqwest(config.fetcher_config()?, Arc::new(StdoutSink::new()))?;

    if let Err(err) = fetcher.fetch(coord).await {
        let hint = err.user_message();
        return Err(anyhow::Error::new(err).context(hint));
    }

    Ok(())
}

/// Log every readable event from `input`; returns how many were handled.
async fn replay_events<R: AsyncBufRead + Unpin>(input: R) -> anyhow::Result<usize> {
    let mut lines = input.lines();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read host events")? {
        if line.trim().is_empty() {
            continue;
        }
        match HostEvent::from_json_line(&line) {
            Ok(event) => {
                log_host_event(&event);
                handled += 1;
            }
            Err(err) => warn!(error = %err, "skipping unreadable host event"),
        }
    }

    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fetch_with_negative_coordinates() {
        let cli = Cli::try_parse_from(["weather-bridge", "fetch", "-33.87", "-151.2"]).unwrap();
        match cli.command {
            Command::Fetch { latitude, longitude, api_key, base_url } => {
                assert_eq!(latitude, -33.87);
                assert_eq!(longitude, -151.2);
                assert!(api_key.is_none());
                assert!(base_url.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_fetch_overrides() {
        let cli = Cli::try_parse_from([
            "weather-bridge",
            "fetch",
            "48.85",
            "2.35",
            "--api-key",
            "KEY",
            "--base-url",
            "http://localhost:8080",
        ])
        .unwrap();
        match cli.command {
            Command::Fetch { api_key, base_url, .. } => {
                assert_eq!(api_key.as_deref(), Some("KEY"));
                assert_eq!(base_url.as_deref(), Some("http://localhost:8080"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_latitude() {
        assert!(Cli::try_parse_from(["weather-bridge", "fetch", "north", "2.35"]).is_err());
    }

    #[test]
    fn parses_configure_and_events() {
        let cli = Cli::try_parse_from(["weather-bridge", "configure", "--api-key", "abc"]).unwrap();
        assert!(matches!(cli.command, Command::Configure { api_key: Some(ref k) } if k == "abc"));

        let cli = Cli::try_parse_from(["weather-bridge", "events"]).unwrap();
        assert!(matches!(cli.command, Command::Events));
    }

    #[tokio::test]
    async fn replay_skips_blank_and_unreadable_lines() {
        let input = concat!(
            "{\"type\":\"ready\",\"payload\":{}}\n",
            "\n",
            "this is not json\n",
            "{\"type\":\"showconfiguration\"}\n",
            "{\"type\":\"webviewclosed\",\"payload\":{\"response\":\"\"}}\n",
        );

        let handled = replay_events(input.as_bytes()).await.unwrap();
        assert_eq!(handled, 2);
    }

    #[tokio::test]
    async fn replay_handles_last_line_without_newline() {
        let handled = replay_events(&b"{\"type\":\"appmessage\",\"payload\":{\"KEY\":1}}"[..])
            .await
            .unwrap();
        assert_eq!(handled, 1);
    }

    #[tokio::test]
    async fn replay_of_empty_input_is_ok() {
        assert_eq!(replay_events(&b""[..]).await.unwrap(), 0);
    }
}
