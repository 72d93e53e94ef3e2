//! Domain Layer - 领域层
//!
//! Tone Context: 语气 → 音色映射

pub mod tone;

pub use tone::{ToneCatalog, ToneError, ToneName, VoiceId};
