use async_trait::async_trait;
use indoc::indoc;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::toolkit::Toolkit;
use crate::errors::{AgentError, AgentResult};
use crate::models::content::Content;
use crate::models::tool::{Tool, ToolCall};

const GEOCODING_HOST: &str = "https://geocoding-api.open-meteo.com";
const FORECAST_HOST: &str = "https://api.open-meteo.com";
const SEARCH_HOST: &str = "https://api.duckduckgo.com";

/// Weather lookup and web search over keyless public APIs
/// (Open-Meteo and the DuckDuckGo instant-answer endpoint).
pub struct WebToolkit {
    client: Client,
    geocoding_host: String,
    forecast_host: String,
    search_host: String,
    tools: Vec<Tool>,
}

impl Default for WebToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl WebToolkit {
    pub fn new() -> Self {
        Self::with_hosts(
            GEOCODING_HOST.to_string(),
            FORECAST_HOST.to_string(),
            SEARCH_HOST.to_string(),
        )
    }

    /// Construct against alternate endpoints. Used by tests to point at a
    /// local mock server.
    pub fn with_hosts(geocoding_host: String, forecast_host: String, search_host: String) -> Self {
        let get_weather = Tool::new(
            "get_weather",
            "Fetches current weather for a city.",
            json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "The city to look up, e.g. 'Paris'."
                    }
                },
                "required": ["city"]
            }),
        );

        let quick_search = Tool::new(
            "quick_search",
            "Performs a quick web search and returns an instant answer if one exists.",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The exact search query."
                    }
                },
                "required": ["query"]
            }),
        );

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
            geocoding_host,
            forecast_host,
            search_host,
            tools: vec![get_weather, quick_search],
        }
    }

    async fn get_json(&self, url: &str) -> AgentResult<Value> {
        debug!(url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AgentError::ExecutionError(format!("Request failed: {}", e)))?;
        response
            .json()
            .await
            .map_err(|e| AgentError::ExecutionError(format!("Invalid response body: {}", e)))
    }

    async fn get_weather(&self, params: &Value) -> AgentResult<Vec<Content>> {
        let city = params
            .get("city")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::InvalidParameters("'city' parameter required".into()))?;

        // Geocode first, then fetch the forecast for the coordinates
        let geo_url = format!(
            "{}/v1/search?name={}&count=1",
            self.geocoding_host,
            urlencoding::encode(city)
        );
        let geo_data = self.get_json(&geo_url).await?;

        let location = geo_data
            .get("results")
            .and_then(|r| r.get(0))
            .ok_or_else(|| {
                AgentError::ExecutionError(format!("Could not find coordinates for {}.", city))
            })?;
        let lat = location.get("latitude").and_then(|v| v.as_f64());
        let lon = location.get("longitude").and_then(|v| v.as_f64());
        let (lat, lon) = match (lat, lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(AgentError::ExecutionError(format!(
                    "Geocoding response for {} had no coordinates.",
                    city
                )))
            }
        };

        let weather_url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true",
            self.forecast_host, lat, lon
        );
        let weather_data = self.get_json(&weather_url).await?;

        let temp = weather_data
            .get("current_weather")
            .and_then(|w| w.get("temperature"))
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                AgentError::ExecutionError("Weather response had no current temperature.".into())
            })?;

        Ok(vec![Content::text(format!(
            "The current temperature in {} is {}°C.",
            city, temp
        ))])
    }

    async fn quick_search(&self, params: &Value) -> AgentResult<Vec<Content>> {
        let query = params
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::InvalidParameters("'query' parameter required".into()))?;

        let url = format!(
            "{}/?q={}&format=json",
            self.search_host,
            urlencoding::encode(query)
        );
        let data = self.get_json(&url).await?;

        let abstract_text = data
            .get("AbstractText")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        if abstract_text.is_empty() {
            Ok(vec![Content::text(
                "No instant answer found. Try a different query.",
            )])
        } else {
            Ok(vec![Content::text(format!(
                "Search Result: {}",
                abstract_text
            ))])
        }
    }
}

#[async_trait]
impl Toolkit for WebToolkit {
    fn name(&self) -> &str {
        "web"
    }

    fn description(&self) -> &str {
        "Looks up current weather and searches the web"
    }

    fn instructions(&self) -> &str {
        indoc! {"
            Use get_weather for weather questions and quick_search for
            current events or external knowledge. Answer from your own
            knowledge when neither is needed.
        "}
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> AgentResult<Vec<Content>> {
        match tool_call.name.as_str() {
            "get_weather" => self.get_weather(&tool_call.arguments).await,
            "quick_search" => self.quick_search(&tool_call.arguments).await,
            _ => Err(AgentError::ToolNotFound(tool_call.name)),
        }
    }
}
