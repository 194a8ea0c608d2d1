//! The objects passed around by the agent loop.
//!
//! The internal model is deliberately provider-neutral: messages hold tool
//! requests and tool responses as structured content, and the provider layer
//! converts to and from the wire format of whichever endpoint is in use.
pub mod content;
pub mod message;
pub mod role;
pub mod tool;
