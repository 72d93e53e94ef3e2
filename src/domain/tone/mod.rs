//! Tone Context - 语气限界上下文
//!
//! 职责:
//! - 语气名称 → 音色标识 的静态映射
//! - 语气查询

mod catalog;
mod errors;
mod value_objects;

pub use catalog::ToneCatalog;
pub use errors::ToneError;
pub use value_objects::{ToneName, VoiceId};
