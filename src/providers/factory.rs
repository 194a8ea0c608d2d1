use anyhow::Result;

use super::base::Provider;
use super::configs::ProviderConfig;
use super::ollama::OllamaProvider;
use super::openai::OpenAiProvider;

pub fn get_provider(config: ProviderConfig) -> Result<Box<dyn Provider>> {
    match config {
        ProviderConfig::Ollama(ollama_config) => Ok(Box::new(OllamaProvider::new(ollama_config)?)),
        ProviderConfig::OpenAi(openai_config) => Ok(Box::new(OpenAiProvider::new(openai_config)?)),
    }
}
