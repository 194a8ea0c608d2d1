//! Prompt chaining and self-consistency against a local Ollama.
//!
//! cargo run --example patterns

use anyhow::Result;

use loon::patterns::{chain, self_consistency};
use loon::providers::configs::OllamaProviderConfig;
use loon::providers::ollama::OllamaProvider;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let provider = OllamaProvider::new(OllamaProviderConfig::from_env()?)?;

    let text = "Large Language Models are deep neural networks trained on \
                large corpora of text. They predict the next token given a \
                context window and can be adapted to many tasks.";

    let outputs = chain(
        &provider,
        text,
        &[
            "Summarize the following text in 5 bullet points:",
            "Generate 5 quiz questions based on this summary:",
        ],
    )
    .await?;

    println!("Summary:\n{}\n", outputs[0]);
    println!("Quiz questions:\n{}\n", outputs[1]);

    let consensus = self_consistency(
        &provider,
        "A farmer has 17 sheep. All but 9 die. How many are left? Answer with just the number.",
        5,
    )
    .await?;
    println!("Consensus answer: {}", consensus);

    Ok(())
}
