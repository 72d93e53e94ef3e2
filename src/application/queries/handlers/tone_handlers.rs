//! Tone Query Handlers

use std::sync::Arc;

use crate::application::queries::ListTones;
use crate::domain::tone::ToneCatalog;

/// ListTones Handler
pub struct ListTonesHandler {
    catalog: Arc<ToneCatalog>,
}

impl ListTonesHandler {
    pub fn new(catalog: Arc<ToneCatalog>) -> Self {
        Self { catalog }
    }

    /// 返回按字母序排列的语气名称
    pub fn handle(&self, _query: ListTones) -> Vec<String> {
        self.catalog
            .tones()
            .into_iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_tones() {
        let catalog = Arc::new(ToneCatalog::from_json(r#"{"formal": "a", "excited": "b"}"#).unwrap());
        let handler = ListTonesHandler::new(catalog);
        assert_eq!(handler.handle(ListTones), vec!["excited", "formal"]);
    }
}
