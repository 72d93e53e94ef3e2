//! HTTP Handlers

mod generate_voice;
mod ping;
mod tones;

pub use generate_voice::*;
pub use ping::*;
pub use tones::*;
