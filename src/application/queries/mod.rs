//! 应用层 - 查询（读操作）

mod tone_queries;

pub mod handlers;

pub use tone_queries::*;
