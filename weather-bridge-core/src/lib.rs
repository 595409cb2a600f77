//! Core library for the `weather-bridge` host.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap fetch that feeds the paired watch
//! - Condition-code classification and temperature formatting
//! - HTTP and message-delivery capabilities, swappable for tests
//! - Host lifecycle events
//!
//! It is used by `weather-bridge-cli`, but can also be embedded in other hosts.

pub mod config;
pub mod error;
pub mod events;
pub mod fetcher;
pub mod icon;
pub mod model;
pub mod sink;
pub mod temperature;
pub mod transport;

pub use config::{Config, FetcherConfig};
pub use error::FetchError;
pub use events::{HostEvent, log_host_event};
pub use fetcher::{WeatherFetcher, process_response};
pub use icon::IconCategory;
pub use model::{Coordinate, OutboundMessage, WeatherResponse};
pub use sink::{ChannelSink, MemorySink, MessageSink, StdoutSink};
pub use transport::{HttpClient, HttpResponse, ReqwestClient};
