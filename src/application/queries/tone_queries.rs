//! Tone Queries

/// 列出所有可用语气
#[derive(Debug, Clone)]
pub struct ListTones;
