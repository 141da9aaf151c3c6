//! citelens-llm — completion backend for the retrieval-augmented chat.

pub mod backend;

pub use backend::{CompletionBackend, CompletionRequest, CompletionResponse, LlmError, OpenAiCompatibleBackend};
