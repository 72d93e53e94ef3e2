//! Tone Context - Catalog
//!
//! 语气 → 音色的静态映射表，启动时加载一次，之后只读

use std::collections::BTreeMap;
use std::path::Path;

use super::{ToneError, ToneName, VoiceId};

/// 内置语气目录（仓库根目录的 voices.json）
const BUILTIN_CATALOG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/voices.json"));

/// 语气目录
///
/// 不变量:
/// - 至少包含一个条目
/// - 加载后不可变（通过 `Arc` 在请求间共享）
/// - 查找为精确匹配，大小写敏感
#[derive(Debug, Clone)]
pub struct ToneCatalog {
    entries: BTreeMap<ToneName, VoiceId>,
}

impl ToneCatalog {
    /// 解析 JSON 对象 `{ "<tone>": "<voice id>" }`
    pub fn from_json(json: &str) -> Result<Self, ToneError> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| ToneError::InvalidFormat(e.to_string()))?;

        if raw.is_empty() {
            return Err(ToneError::EmptyCatalog);
        }

        let mut entries = BTreeMap::new();
        for (tone, voice) in raw {
            let name = ToneName::new(tone.clone())
                .map_err(|reason| ToneError::InvalidEntry { tone: tone.clone(), reason })?;
            let voice_id =
                VoiceId::new(voice).map_err(|reason| ToneError::InvalidEntry { tone, reason })?;
            entries.insert(name, voice_id);
        }

        Ok(Self { entries })
    }

    /// 内置默认目录
    pub fn builtin() -> Result<Self, ToneError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// 从文件加载，未指定路径时使用内置目录
    pub fn load(path: Option<&Path>) -> Result<Self, ToneError> {
        let Some(path) = path else {
            return Self::builtin();
        };

        let json = std::fs::read_to_string(path).map_err(|e| ToneError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            tones = catalog.len(),
            "Tone catalog loaded"
        );
        Ok(catalog)
    }

    /// 查找语气对应的音色
    pub fn resolve(&self, tone: &str) -> Option<&VoiceId> {
        self.entries.get(tone)
    }

    /// 所有语气名称（按字母序）
    pub fn tones(&self) -> Vec<&ToneName> {
        self.entries.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
