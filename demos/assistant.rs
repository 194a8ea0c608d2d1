//! A multi-toolkit assistant: weather, web search, crypto prices, and
//! arithmetic in one agent. Requires a running Ollama with a tool-capable
//! model; network access is needed for the web and price toolkits.
//!
//! cargo run --example assistant -- "Tell me the weather in Paris and the price of bitcoin in usd"

use anyhow::Result;

use loon::agent::Agent;
use loon::models::message::Message;
use loon::providers::configs::{OllamaProviderConfig, OpenAiProviderConfig, ProviderConfig};
use loon::providers::factory::get_provider;
use loon::toolkits::{CalculatorToolkit, PriceToolkit, WebToolkit};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // LOON_PROVIDER=openai switches to a hosted endpoint; default is a
    // local Ollama
    let config = match std::env::var("LOON_PROVIDER").as_deref() {
        Ok("openai") => ProviderConfig::OpenAi(OpenAiProviderConfig::from_env()?),
        _ => ProviderConfig::Ollama(OllamaProviderConfig::from_env()?),
    };
    let provider = get_provider(config)?;

    let mut agent = Agent::new(provider);
    agent.add_toolkit(Box::new(WebToolkit::new()));
    agent.add_toolkit(Box::new(PriceToolkit::new()));
    agent.add_toolkit(Box::new(CalculatorToolkit::new()));

    let question = std::env::args().nth(1).unwrap_or_else(|| {
        "Tell me the weather in Paris and search for what the MCP protocol is.".to_string()
    });
    println!("> {}", question);

    let resolution = agent
        .resolve(&[Message::user().with_text(question)])
        .await?;

    for message in &resolution.trace {
        for request in message.tool_requests() {
            if let Ok(call) = &request.tool_call {
                println!("[tool] {} {}", call.name, call.arguments);
            }
        }
    }

    if resolution.truncated {
        println!("(stopped at the tool round limit)");
    }
    println!("{}", resolution.answer);

    Ok(())
}
