use anyhow::{anyhow, Result};
use std::env;

pub const OLLAMA_HOST: &str = "http://localhost:11434";
pub const OLLAMA_MODEL: &str = "mistral";
pub const OPENAI_HOST: &str = "https://api.openai.com";
pub const OPENAI_MODEL: &str = "gpt-4o-mini";

/// Unified enum to wrap different provider configurations
pub enum ProviderConfig {
    Ollama(OllamaProviderConfig),
    OpenAi(OpenAiProviderConfig),
}

#[derive(Debug, Clone)]
pub struct OllamaProviderConfig {
    pub host: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl OllamaProviderConfig {
    pub fn new(host: String, model: String) -> Self {
        Self {
            host,
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            get_env("OLLAMA_HOST", Some(OLLAMA_HOST))?,
            get_env("OLLAMA_MODEL", Some(OLLAMA_MODEL))?,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl OpenAiProviderConfig {
    pub fn new(host: String, api_key: String, model: String) -> Self {
        Self {
            host,
            api_key,
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            get_env("OPENAI_HOST", Some(OPENAI_HOST))?,
            get_env("OPENAI_API_KEY", None)?,
            get_env("OPENAI_MODEL", Some(OPENAI_MODEL))?,
        ))
    }
}

fn get_env(name: &str, default: Option<&str>) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => default
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Required environment variable {} is not set", name)),
    }
}
