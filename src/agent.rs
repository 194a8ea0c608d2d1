use anyhow::Result;
use futures::stream::BoxStream;
use indoc::indoc;
use tracing::{debug, warn};

use crate::errors::{AgentError, AgentResult};
use crate::models::content::Content;
use crate::models::message::{Message, ToolRequest};
use crate::models::tool::{Tool, ToolCall};
use crate::providers::base::Provider;
use crate::toolkits::Toolkit;

/// How many tool rounds a single query may use before the loop fails closed.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

const ROUND_LIMIT_NOTICE: &str =
    "Stopped before a final answer: the maximum number of tool rounds was reached. \
     The conversation so far contains every tool result gathered.";

/// The outcome of driving a conversation to completion.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The final assistant text, or a truncation notice if the round limit
    /// was hit first
    pub answer: String,
    /// Every message produced while resolving: assistant responses and tool
    /// results, in order
    pub trace: Vec<Message>,
    /// True when the round limit cut the resolution short
    pub truncated: bool,
}

/// Drives a conversation to a final natural-language answer, transparently
/// executing the tool calls the model requests along the way.
///
/// Each round sends the conversation and the registered tool descriptors to
/// the provider. A response without tool requests is the final answer. A
/// response with tool requests gets every call dispatched (concurrently, but
/// results keep the order the calls were issued in), the results appended,
/// and the model queried again. Unknown tools and failed executions become
/// error-tagged tool results the model can react to; only provider transport
/// failures abort the query.
pub struct Agent {
    toolkits: Vec<Box<dyn Toolkit>>,
    provider: Box<dyn Provider>,
    max_tool_rounds: usize,
}

impl Agent {
    /// Create a new Agent with the specified provider
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            toolkits: Vec::new(),
            provider,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Override the tool round limit
    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    /// Register a toolkit with the agent
    pub fn add_toolkit(&mut self, toolkit: Box<dyn Toolkit>) {
        self.toolkits.push(toolkit);
    }

    /// Get all tools from all toolkits with proper toolkit prefixing
    fn prefixed_tools(&self) -> Vec<Tool> {
        let mut tools = Vec::new();
        for toolkit in &self.toolkits {
            for tool in toolkit.tools() {
                tools.push(Tool::new(
                    format!("{}__{}", toolkit.name(), tool.name),
                    &tool.description,
                    tool.input_schema.clone(),
                ));
            }
        }
        tools
    }

    /// Find the appropriate toolkit for a tool call based on the prefixed name
    fn toolkit_for_tool(&self, prefixed_name: &str) -> Option<&dyn Toolkit> {
        let toolkit_name = prefixed_name.split("__").next()?;
        self.toolkits
            .iter()
            .find(|toolkit| toolkit.name() == toolkit_name)
            .map(|v| &**v)
    }

    fn system_prompt(&self) -> String {
        let mut prompt = String::from(indoc! {"
            You are a helpful assistant. You can call tools to look up
            information or act on the user's behalf. Use a tool only when it
            is needed to answer, and answer directly otherwise.
        "});
        for toolkit in &self.toolkits {
            prompt.push_str(&format!(
                "\n## {}\n{}\n\n{}",
                toolkit.name(),
                toolkit.description(),
                toolkit.instructions()
            ));
        }
        prompt
    }

    /// Dispatch a single tool call to the appropriate toolkit
    async fn dispatch_tool_call(
        &self,
        tool_call: AgentResult<ToolCall>,
    ) -> AgentResult<Vec<Content>> {
        let call = tool_call?;
        let toolkit = self
            .toolkit_for_tool(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;

        let tool_name = call
            .name
            .splitn(2, "__")
            .nth(1)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;

        debug!(tool = call.name.as_str(), "dispatching tool call");
        toolkit.call(ToolCall::new(tool_name, call.arguments)).await
    }

    /// Execute every requested call of one round and collect the results
    /// into a single tool-result message. Calls run concurrently, but the
    /// responses are attached in the order the requests were issued, each
    /// under its originating correlation id.
    async fn execute_round(&self, requests: &[ToolRequest]) -> Message {
        let futures: Vec<_> = requests
            .iter()
            .map(|request| self.dispatch_tool_call(request.tool_call.clone()))
            .collect();

        let outputs = futures::future::join_all(futures).await;

        let mut message = Message::user();
        for (request, output) in requests.iter().zip(outputs.into_iter()) {
            message = message.with_tool_response(request.id.clone(), output);
        }
        message
    }

    /// Create a stream that yields each message as it is generated: the
    /// assistant's responses and the tool-result messages that answer them.
    pub async fn reply(&self, messages: &[Message]) -> Result<BoxStream<'_, Result<Message>>> {
        let mut messages = messages.to_vec();
        let tools = self.prefixed_tools();
        let system_prompt = self.system_prompt();

        Ok(Box::pin(async_stream::try_stream! {
            let mut round = 0;
            loop {
                let (response, usage) = self.provider.complete(
                    &system_prompt,
                    &messages,
                    &tools,
                ).await?;
                debug!(round, total_tokens = ?usage.total_tokens, "model response received");

                yield response.clone();

                // Ensure the response is delivered before potentially
                // long-running tool executions start
                tokio::task::yield_now().await;

                let tool_requests: Vec<ToolRequest> = response
                    .tool_requests()
                    .into_iter()
                    .cloned()
                    .collect();

                if tool_requests.is_empty() {
                    // No more tool calls, end the reply loop
                    break;
                }

                if round >= self.max_tool_rounds {
                    warn!(round, "tool round limit reached, giving up on resolution");
                    yield Message::assistant().with_text(ROUND_LIMIT_NOTICE);
                    break;
                }
                round += 1;

                messages.push(response);
                let tool_message = self.execute_round(&tool_requests).await;
                yield tool_message.clone();
                messages.push(tool_message);
            }
        }))
    }

    /// Drive the conversation to completion and collect the outcome: the
    /// final answer, the full trace of produced messages, and whether the
    /// round limit cut the resolution short.
    pub async fn resolve(&self, messages: &[Message]) -> Result<Resolution> {
        let mut conversation = messages.to_vec();
        let tools = self.prefixed_tools();
        let system_prompt = self.system_prompt();

        let mut trace = Vec::new();
        let mut round = 0;
        loop {
            let (response, _usage) = self
                .provider
                .complete(&system_prompt, &conversation, &tools)
                .await?;
            trace.push(response.clone());

            let tool_requests: Vec<ToolRequest> =
                response.tool_requests().into_iter().cloned().collect();

            if tool_requests.is_empty() {
                return Ok(Resolution {
                    answer: response.text(),
                    trace,
                    truncated: false,
                });
            }

            if round >= self.max_tool_rounds {
                warn!(round, "tool round limit reached, giving up on resolution");
                return Ok(Resolution {
                    answer: ROUND_LIMIT_NOTICE.to_string(),
                    trace,
                    truncated: true,
                });
            }
            round += 1;

            conversation.push(response);
            let tool_message = self.execute_round(&tool_requests).await;
            trace.push(tool_message.clone());
            conversation.push(tool_message);
        }
    }
}
