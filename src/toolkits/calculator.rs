use async_trait::async_trait;
use indoc::indoc;
use serde_json::{json, Value};

use super::toolkit::Toolkit;
use crate::errors::{AgentError, AgentResult};
use crate::models::content::Content;
use crate::models::tool::{Tool, ToolCall};

/// Basic arithmetic for models that are bad at it.
pub struct CalculatorToolkit {
    tools: Vec<Tool>,
}

impl Default for CalculatorToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorToolkit {
    pub fn new() -> Self {
        let number_args = json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "number",
                    "description": "The first operand"
                },
                "b": {
                    "type": "number",
                    "description": "The second operand"
                }
            },
            "required": ["a", "b"]
        });

        Self {
            tools: vec![
                Tool::new(
                    "add",
                    "Adds two numbers together and returns the result.",
                    number_args.clone(),
                ),
                Tool::new(
                    "multiply",
                    "Multiplies two numbers together and returns the result.",
                    number_args,
                ),
            ],
        }
    }

    fn operands(params: &Value) -> AgentResult<(f64, f64)> {
        let a = params
            .get("a")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| AgentError::InvalidParameters("'a' must be a number".into()))?;
        let b = params
            .get("b")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| AgentError::InvalidParameters("'b' must be a number".into()))?;
        Ok((a, b))
    }

    fn format_number(value: f64) -> String {
        if value.fract() == 0.0 {
            format!("{}", value as i64)
        } else {
            format!("{}", value)
        }
    }
}

#[async_trait]
impl Toolkit for CalculatorToolkit {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Performs exact arithmetic"
    }

    fn instructions(&self) -> &str {
        indoc! {"
            Use the add and multiply tools for any arithmetic instead of
            computing results yourself, so the numbers are exact.
        "}
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> AgentResult<Vec<Content>> {
        let (a, b) = Self::operands(&tool_call.arguments)?;
        let result = match tool_call.name.as_str() {
            "add" => a + b,
            "multiply" => a * b,
            _ => return Err(AgentError::ToolNotFound(tool_call.name)),
        };
        Ok(vec![Content::text(Self::format_number(result))])
    }
}
