//! An agent that browses the current directory through the filesystem
//! toolkit. Requires a running Ollama with a tool-capable model
//! (OLLAMA_HOST / OLLAMA_MODEL override the defaults).
//!
//! cargo run --example file_agent

use anyhow::Result;
use futures::TryStreamExt;

use loon::agent::Agent;
use loon::models::message::Message;
use loon::providers::configs::OllamaProviderConfig;
use loon::providers::ollama::OllamaProvider;
use loon::toolkits::FilesystemToolkit;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let provider = OllamaProvider::new(OllamaProviderConfig::from_env()?)?;

    let mut agent = Agent::new(Box::new(provider));
    agent.add_toolkit(Box::new(FilesystemToolkit::new(std::env::current_dir()?)));

    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "List the files in this folder.".to_string());
    println!("> {}", question);

    let messages = vec![Message::user().with_text(question)];
    let mut stream = agent.reply(&messages).await?;
    while let Some(message) = stream.try_next().await? {
        let text = message.text();
        if !text.is_empty() {
            println!("{}", text);
        }
        for request in message.tool_requests() {
            if let Ok(call) = &request.tool_call {
                println!("[tool] {} {}", call.name, call.arguments);
            }
        }
    }

    Ok(())
}
