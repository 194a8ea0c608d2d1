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

const COINGECKO_HOST: &str = "https://api.coingecko.com";

/// Live cryptocurrency prices from the CoinGecko API.
pub struct PriceToolkit {
    client: Client,
    host: String,
    tools: Vec<Tool>,
}

impl Default for PriceToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceToolkit {
    pub fn new() -> Self {
        Self::with_host(COINGECKO_HOST.to_string())
    }

    /// Construct against an alternate endpoint. Used by tests to point at a
    /// local mock server.
    pub fn with_host(host: String) -> Self {
        let get_crypto_price = Tool::new(
            "get_crypto_price",
            "Returns the current price of a cryptocurrency. Use this tool only when the user asks for a price.",
            json!({
                "type": "object",
                "properties": {
                    "coin_id": {
                        "type": "string",
                        "description": "The ID of the cryptocurrency, e.g. 'bitcoin' or 'ethereum'."
                    },
                    "currency": {
                        "type": "string",
                        "description": "The fiat currency to check the price in, e.g. 'usd' or 'eur'."
                    }
                },
                "required": ["coin_id", "currency"]
            }),
        );

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
            host,
            tools: vec![get_crypto_price],
        }
    }

    async fn get_crypto_price(&self, params: &Value) -> AgentResult<Vec<Content>> {
        let coin_id = params
            .get("coin_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::InvalidParameters("'coin_id' parameter required".into()))?
            .to_lowercase();
        let currency = params
            .get("currency")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::InvalidParameters("'currency' parameter required".into()))?
            .to_lowercase();

        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies={}",
            self.host,
            urlencoding::encode(&coin_id),
            urlencoding::encode(&currency)
        );
        debug!(url = url.as_str(), "fetching price");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AgentError::ExecutionError(format!("Request failed: {}", e)))?;
        let data: Value = response
            .json()
            .await
            .map_err(|e| AgentError::ExecutionError(format!("Invalid response body: {}", e)))?;

        let price = data
            .get(&coin_id)
            .and_then(|c| c.get(&currency))
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                AgentError::ExecutionError(format!(
                    "Could not find price data for {} in {}.",
                    coin_id, currency
                ))
            })?;

        Ok(vec![Content::text(format!(
            "The current price of {} is {} {}.",
            coin_id,
            price,
            currency.to_uppercase()
        ))])
    }
}

#[async_trait]
impl Toolkit for PriceToolkit {
    fn name(&self) -> &str {
        "price"
    }

    fn description(&self) -> &str {
        "Looks up live cryptocurrency prices"
    }

    fn instructions(&self) -> &str {
        indoc! {"
            Use get_crypto_price when the user asks for a specific coin
            price, then give a clear final answer based on its result.
        "}
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> AgentResult<Vec<Content>> {
        match tool_call.name.as_str() {
            "get_crypto_price" => self.get_crypto_price(&tool_call.arguments).await,
            _ => Err(AgentError::ToolNotFound(tool_call.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_crypto_price() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bitcoin": {"usd": 68000.0}
            })))
            .mount(&mock_server)
            .await;

        let toolkit = PriceToolkit::with_host(mock_server.uri());
        let result = toolkit
            .call(ToolCall::new(
                "get_crypto_price",
                json!({"coin_id": "Bitcoin", "currency": "USD"}),
            ))
            .await
            .unwrap();
        assert_eq!(
            result[0].as_text(),
            Some("The current price of bitcoin is 68000 USD.")
        );
    }

    #[tokio::test]
    async fn test_unknown_coin() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let toolkit = PriceToolkit::with_host(mock_server.uri());
        let result = toolkit
            .call(ToolCall::new(
                "get_crypto_price",
                json!({"coin_id": "notacoin", "currency": "usd"}),
            ))
            .await;
        assert!(matches!(result, Err(AgentError::ExecutionError(_))));
    }

    #[tokio::test]
    async fn test_missing_arguments() {
        let toolkit = PriceToolkit::new();
        let result = toolkit
            .call(ToolCall::new("get_crypto_price", json!({"coin_id": "bitcoin"})))
            .await;
        assert!(matches!(result, Err(AgentError::InvalidParameters(_))));
    }
}
