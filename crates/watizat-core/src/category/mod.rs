//! # Category Module
//!
//! ヘルプカテゴリ（food, legal, housing 等）の定義・選択・照合を提供する。
//!
//! ## 設計目的
//!
//! フィード、ボランティア登録、「手伝いたい」画面はすべて同じカテゴリ集合を
//! 扱う。画面ごとに異なるのは選択数の制約と、未選択時の扱いだけである：
//!
//! - **投稿作成**: 1〜3個、最後の1個は外せない
//! - **フィード**: 0個以上、未選択なら全件
//! - **手伝いたい**: 0個以上、未選択なら何も表示しない
//!
//! ## モジュール構成
//!
//! - `builtin`: ビルトインカテゴリ定義（10種、固定）
//! - `store`: ランタイムストア（未知IDはプレースホルダ）
//! - `selector`: 選択状態とポリシー
//! - `matcher`: 投稿・ボランティアの照合
//!
//! ## 使用例
//!
//! ```rust
//! use watizat_core::category::{CategorySelection, CategoryStore, SelectionPolicy, Toggle};
//!
//! let store = CategoryStore::builtin();
//! assert_eq!(store.lookup("food").icon, "🍽️");
//! assert_eq!(store.lookup("xyz").label, "xyz");
//!
//! let mut selection = CategorySelection::post_default();
//! assert_eq!(selection.toggle("food").unwrap(), Toggle::KeptMinimum);
//! assert_eq!(selection.toggle("legal").unwrap(), Toggle::Added);
//! assert_eq!(selection.policy(), SelectionPolicy::post());
//! ```

mod builtin;
mod matcher;
mod selector;
mod store;

// Re-exports
pub use builtin::{
    BuiltinCategory, CategoryDef, Resource, BUILTIN_CATEGORIES, UNKNOWN_CATEGORY_COLOR,
    UNKNOWN_CATEGORY_ICON,
};
pub use matcher::{match_records, Categorized, EmptySelection, RecordFilter, TypeFilter};
pub use selector::{CategorySelection, SelectionPolicy, Toggle, MAX_POST_CATEGORIES};
pub use store::{CategoriesConfig, CategoryConfigEntry, CategoryStore};
