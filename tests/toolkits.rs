use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

use loon::agent::Agent;
use loon::errors::{AgentError, AgentResult};
use loon::models::content::Content;
use loon::models::message::Message;
use loon::models::tool::{Tool, ToolCall};
use loon::providers::base::{Provider, Usage};
use loon::toolkits::{CalculatorToolkit, FilesystemToolkit, Toolkit};

/// A simple toolkit that echoes input back to the caller
pub struct EchoToolkit {
    tools: Vec<Tool>,
}

impl Default for EchoToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoToolkit {
    pub fn new() -> Self {
        Self {
            tools: vec![Tool::new(
                "echo",
                "reply with the input",
                json!({
                    "type": "object",
                    "properties": {
                        "message": {
                            "type": "string",
                            "description": "The message to echo"
                        }
                    },
                    "required": ["message"]
                }),
            )],
        }
    }

    async fn echo(&self, params: Value) -> AgentResult<Vec<Content>> {
        let message = params
            .get("message")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::InvalidParameters("message parameter required".into()))?;

        Ok(vec![Content::text(message)])
    }
}

#[async_trait]
impl Toolkit for EchoToolkit {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "A simple toolkit that echoes input back to the caller"
    }

    fn instructions(&self) -> &str {
        "Use the echo tool to get a response back with your input message"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> AgentResult<Vec<Content>> {
        match tool_call.name.as_str() {
            "echo" => self.echo(tool_call.arguments).await,
            _ => Err(AgentError::ToolNotFound(tool_call.name)),
        }
    }
}

/// A provider that plays back a scripted sequence of responses
struct ScriptedProvider {
    responses: Mutex<Vec<Message>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<Message>) -> Self {
        Self {
            responses: Mutex::new(responses),
        }
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn complete(
        &self,
        _system: &str,
        _messages: &[Message],
        _tools: &[Tool],
    ) -> Result<(Message, Usage)> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok((Message::assistant().with_text(""), Usage::default()))
        } else {
            Ok((responses.remove(0), Usage::default()))
        }
    }
}

#[tokio::test]
async fn test_echo_success() {
    let toolkit = EchoToolkit::new();

    let tool_call = ToolCall::new("echo", json!({"message": "hello world"}));
    let result = toolkit.call(tool_call).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].as_text(), Some("hello world"));
}

#[tokio::test]
async fn test_echo_missing_message() {
    let toolkit = EchoToolkit::new();

    let tool_call = ToolCall::new("echo", json!({}));
    let result = toolkit.call(tool_call).await;
    assert!(matches!(result, Err(AgentError::InvalidParameters(_))));
}

#[tokio::test]
async fn test_echo_unknown_tool() {
    let toolkit = EchoToolkit::new();

    let tool_call = ToolCall::new("shout", json!({"message": "hello"}));
    let result = toolkit.call(tool_call).await;
    assert!(matches!(result, Err(AgentError::ToolNotFound(_))));
}

#[tokio::test]
async fn test_agent_resolves_through_calculator() -> Result<()> {
    let provider = ScriptedProvider::new(vec![
        Message::assistant().with_tool_request(
            "call_1",
            Ok(ToolCall::new(
                "calculator__multiply",
                json!({"a": 234, "b": 89}),
            )),
        ),
        Message::assistant().with_text("234 * 89 = 20826"),
    ]);

    let mut agent = Agent::new(Box::new(provider));
    agent.add_toolkit(Box::new(CalculatorToolkit::new()));

    let resolution = agent
        .resolve(&[Message::user().with_text("What is 234 * 89?")])
        .await?;

    assert_eq!(resolution.answer, "234 * 89 = 20826");
    assert!(!resolution.truncated);

    // The trace carries the tool round: request, result, final answer
    assert_eq!(resolution.trace.len(), 3);
    let tool_result = resolution.trace[1]
        .content
        .iter()
        .find_map(|c| c.as_tool_response())
        .expect("expected a tool response in the trace");
    assert_eq!(tool_result.id, "call_1");
    assert_eq!(tool_result.tool_result, Ok(vec![Content::text("20826")]));
    Ok(())
}

#[tokio::test]
async fn test_agent_resolves_through_filesystem() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("mcp_server.log"), "line one\nline two\n")?;

    let provider = ScriptedProvider::new(vec![
        Message::assistant().with_tool_request(
            "call_1",
            Ok(ToolCall::new("filesystem__list_files", json!({}))),
        ),
        Message::assistant().with_tool_request(
            "call_2",
            Ok(ToolCall::new(
                "filesystem__read_file",
                json!({"filename": "mcp_server.log"}),
            )),
        ),
        Message::assistant().with_text("The log has two lines."),
    ]);

    let mut agent = Agent::new(Box::new(provider));
    agent.add_toolkit(Box::new(FilesystemToolkit::new(dir.path())));

    let resolution = agent
        .resolve(&[Message::user().with_text(
            "Check if there is a log file and tell me what it says.",
        )])
        .await?;

    assert_eq!(resolution.answer, "The log has two lines.");
    assert_eq!(resolution.trace.len(), 5);

    let listing = resolution.trace[1]
        .content
        .iter()
        .find_map(|c| c.as_tool_response())
        .unwrap();
    assert_eq!(
        listing.tool_result,
        Ok(vec![Content::text("mcp_server.log")])
    );

    let contents = resolution.trace[3]
        .content
        .iter()
        .find_map(|c| c.as_tool_response())
        .unwrap();
    assert_eq!(
        contents.tool_result,
        Ok(vec![Content::text("line one\nline two\n")])
    );
    Ok(())
}
