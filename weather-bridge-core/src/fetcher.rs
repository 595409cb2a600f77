use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::FetcherConfig,
    error::FetchError,
    model::{Coordinate, OutboundMessage, WeatherResponse},
    sink::MessageSink,
    transport::{HttpClient, ReqwestClient, truncate_body},
};

const WEATHER_PATH: &str = "data/2.5/weather";

/// Looks up the current weather for a coordinate and forwards it to the paired device.
///
/// Each call to [`WeatherFetcher::fetch`] is independent: concurrent calls are
/// neither deduplicated nor ordered, so responses may be emitted in any order.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    config: FetcherConfig,
    http: Arc<dyn HttpClient>,
    sink: Arc<dyn MessageSink>,
}

impl WeatherFetcher {
    pub fn new(config: FetcherConfig, http: Arc<dyn HttpClient>, sink: Arc<dyn MessageSink>) -> Self {
        Self { config, http, sink }
    }

    /// Fetcher backed by a real HTTP client honouring the configured timeout.
    pub fn with_reqwest(config: FetcherConfig, sink: Arc<dyn MessageSink>) -> Result<Self, FetchError> {
        let http = ReqwestClient::new(config.timeout)?;
        Ok(Self::new(config, Arc::new(http), sink))
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn request_url(&self, coord: Coordinate) -> Result<Url, FetchError> {
        let base = format!("{}/{}", self.config.base_url.trim_end_matches('/'), WEATHER_PATH);
        Url::parse_with_params(
            &base,
            &[
                ("lat", coord.latitude.to_string()),
                ("lon", coord.longitude.to_string()),
                ("cnt", self.config.result_count.to_string()),
                ("appid", self.config.api_key.clone()),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))
    }

    /// One request, and on success exactly one message to the sink.
    #[instrument(skip_all, fields(coord = %coord))]
    pub async fn fetch(&self, coord: Coordinate) -> Result<OutboundMessage, FetchError> {
        let url = self.request_url(coord)?;

        let response = self.http.get(&url).await.inspect_err(|err| {
            warn!(error = %err, "weather request did not complete");
        })?;

        let message = process_response(response.status, &response.body)?;

        self.sink.send(&message).await.inspect_err(|err| {
            warn!(error = %err, "could not deliver weather update");
        })?;

        info!(
            icon = %message.icon,
            temperature = %message.temperature,
            city = %message.city,
            "weather update sent"
        );
        Ok(message)
    }
}

/// Turn a completed provider response into the device message.
pub fn process_response(status: u16, body: &str) -> Result<OutboundMessage, FetchError> {
    if status != 200 {
        let body = truncate_body(body);
        warn!(status, body = %body, "weather provider returned an error");
        return Err(FetchError::Provider { status, body });
    }

    debug!(body, "weather provider payload");

    let parsed: WeatherResponse = serde_json::from_str(body).inspect_err(|err| {
        warn!(error = %err, "weather payload is not valid");
    })?;

    OutboundMessage::from_response(&parsed).inspect_err(|err| {
        warn!(error = %err, "weather payload is incomplete");
    })
}
