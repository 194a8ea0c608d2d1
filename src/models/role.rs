use serde::{Deserialize, Serialize};

/// The speaker of a message. Tool results travel as user messages carrying
/// `ToolResponse` content; they are rendered with role `tool` only at the
/// wire layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}
