//! 应用层 - 命令
//!
//! 产生外部副作用（调用上游服务）的用例

mod generate_voice_commands;

pub mod handlers;

pub use generate_voice_commands::*;
