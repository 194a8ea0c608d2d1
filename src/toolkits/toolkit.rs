use async_trait::async_trait;

use crate::errors::AgentResult;
use crate::models::content::Content;
use crate::models::tool::{Tool, ToolCall};

/// A named group of tools the agent can dispatch to.
///
/// A toolkit does not care how its tools are implemented (local function,
/// subprocess, HTTP call); it only promises that every tool it advertises is
/// addressable by name and produces text. Execution failures come back as
/// `AgentError` values which the loop renders into the conversation rather
/// than propagating.
#[async_trait]
pub trait Toolkit: Send + Sync {
    /// Get the name of the toolkit. Used to prefix its tool names, so it
    /// must not contain a double underscore.
    fn name(&self) -> &str;

    /// Get the toolkit description
    fn description(&self) -> &str;

    /// Get usage instructions for the model's system prompt
    fn instructions(&self) -> &str;

    /// Get the tool descriptors this toolkit exposes
    fn tools(&self) -> &[Tool];

    /// Execute one of this toolkit's tools with the given arguments
    async fn call(&self, tool_call: ToolCall) -> AgentResult<Vec<Content>>;
}
