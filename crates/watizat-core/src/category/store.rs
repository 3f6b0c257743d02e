//! Category Store
//!
//! カテゴリ定義のランタイムストア。
//! ビルトイン定義に設定ファイルの表示上書き（ラベル等）をマージして保持。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::builtin::{CategoryDef, Resource, BUILTIN_CATEGORIES};

/// カテゴリ定義のランタイムストア
#[derive(Debug, Clone)]
pub struct CategoryStore {
    /// レジストリ順
    categories: Vec<CategoryDef>,
}

impl CategoryStore {
    /// ビルトインカテゴリのみで初期化
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES.iter().map(CategoryDef::from).collect();
        Self { categories }
    }

    /// 設定ファイルで表示情報を上書き
    ///
    /// - 既知カテゴリのラベル・アイコン・説明のみ上書き可能
    /// - 未知のIDは無視する（カテゴリ集合は固定）
    pub fn with_config(mut self, config: &CategoriesConfig) -> Self {
        for (id, entry) in &config.categories {
            match self.categories.iter_mut().find(|c| &c.id == id) {
                Some(def) => {
                    if let Some(label) = &entry.label {
                        def.label = label.clone();
                    }
                    if let Some(icon) = &entry.icon {
                        def.icon = icon.clone();
                    }
                    if let Some(description) = &entry.description {
                        def.description = Some(description.clone());
                    }
                }
                None => {
                    tracing::warn!(category = %id, "ignoring override for unknown category");
                }
            }
        }
        self
    }

    /// カテゴリ定義を取得（未登録ならNone）
    pub fn get(&self, id: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// カテゴリ定義を取得（未登録ならプレースホルダ、失敗しない）
    ///
    /// 過去データに残る旧カテゴリIDもここを通して表示できる。
    pub fn lookup(&self, id: &str) -> CategoryDef {
        self.get(id)
            .cloned()
            .unwrap_or_else(|| CategoryDef::placeholder(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// 全カテゴリを取得（レジストリ順）
    pub fn all(&self) -> &[CategoryDef] {
        &self.categories
    }

    /// カテゴリID一覧
    pub fn ids(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.id.as_str()).collect()
    }

    /// カテゴリに紐づく外部リソース（未登録なら空）
    pub fn resources(&self, id: &str) -> &'static [Resource] {
        BUILTIN_CATEGORIES
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.resources)
            .unwrap_or(&[])
    }

    /// アイコンを並べた短い表示（"🍽️ ⚖️"）
    pub fn icons<S: AsRef<str>>(&self, ids: &[S]) -> String {
        ids.iter()
            .map(|id| self.lookup(id.as_ref()).icon)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `config.toml`のcategoriesセクション
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriesConfig {
    #[serde(flatten)]
    pub categories: HashMap<String, CategoryConfigEntry>,
}

impl CategoriesConfig {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// 個別カテゴリの表示上書き
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfigEntry {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_store_builtin() {
        let store = CategoryStore::builtin();
        assert!(store.get("food").is_some());
        assert!(store.get("transport").is_some());
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_lookup_unknown_returns_placeholder() {
        let store = CategoryStore::builtin();
        let def = store.lookup("xyz");
        assert_eq!(def.id, "xyz");
        assert_eq!(def.label, "xyz");
        assert_eq!(def.icon, "📝");
        assert!(def.description.is_none());
        assert!(!def.known);
    }

    #[test]
    fn test_lookup_known() {
        let store = CategoryStore::builtin();
        let def = store.lookup("legal");
        assert_eq!(def.icon, "⚖️");
        assert!(def.known);
    }

    #[test]
    fn test_registry_order() {
        let store = CategoryStore::builtin();
        let ids = store.ids();
        assert_eq!(ids.first(), Some(&"food"));
        assert_eq!(ids.last(), Some(&"transport"));
    }

    #[test]
    fn test_category_store_override() {
        let config = CategoriesConfig {
            categories: [
                (
                    "food".to_string(),
                    CategoryConfigEntry {
                        label: Some("Alimentação".to_string()),
                        ..Default::default()
                    },
                ),
                (
                    "unknown".to_string(),
                    CategoryConfigEntry {
                        label: Some("Ignored".to_string()),
                        ..Default::default()
                    },
                ),
            ]
            .into_iter()
            .collect(),
        };

        let store = CategoryStore::builtin().with_config(&config);
        let food = store.get("food").unwrap();
        assert_eq!(food.label, "Alimentação");
        assert_eq!(food.icon, "🍽️");
        assert!(store.get("unknown").is_none());
        assert_eq!(store.all().len(), 10);
    }

    #[test]
    fn test_resources() {
        let store = CategoryStore::builtin();
        let housing = store.resources("housing");
        assert!(housing.iter().any(|r| r.urgent));
        assert!(store.resources("xyz").is_empty());
    }

    #[test]
    fn test_icons() {
        let store = CategoryStore::builtin();
        assert_eq!(store.icons(&["food", "xyz"]), "🍽️ 📝");
    }
}
