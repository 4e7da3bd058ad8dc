//! AI collaborator module
//!
//! Gateway client, prompt contracts and response extraction.

pub mod client;
pub mod prompts;
pub mod response;

pub use client::{AiError, CompletionClient, CompletionRequest, GatewayClient};
pub use prompts::{nutrition_request, workout_request};
pub use response::{extract_json_object, ParseError};
