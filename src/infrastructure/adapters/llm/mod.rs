//! LLM Adapter - 对话补全客户端实现

mod fake_chat_client;
mod groq_chat_client;

pub use fake_chat_client::{FakeChatClient, FakeChatClientConfig};
pub use groq_chat_client::*;
