//! Category Matcher
//!
//! 投稿・ボランティアをカテゴリ集合と種別でフィルタする。
//! 入力順を保つ純粋関数で、隠れた状態は持たない。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WatizatError};
use crate::post::PostType;

/// カテゴリ集合を持つレコード
pub trait Categorized {
    /// レコードのカテゴリ集合（旧形式のフォールバック込み）
    fn category_set(&self) -> &[String];

    /// 投稿種別（種別を持たないレコードはNone）
    fn kind(&self) -> Option<PostType> {
        None
    }

    /// 作成者のユーザーID
    fn author(&self) -> Option<&str> {
        None
    }
}

/// 種別フィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Need,
    Offer,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Need => "need",
            Self::Offer => "offer",
        }
    }

    pub fn accepts(&self, kind: Option<PostType>) -> bool {
        match self {
            Self::All => true,
            Self::Need => kind == Some(PostType::Need),
            Self::Offer => kind == Some(PostType::Offer),
        }
    }
}

impl From<PostType> for TypeFilter {
    fn from(post_type: PostType) -> Self {
        match post_type {
            PostType::Need => Self::Need,
            PostType::Offer => Self::Offer,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = WatizatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "need" => Ok(Self::Need),
            "offer" => Ok(Self::Offer),
            _ => Err(WatizatError::UnknownValue {
                kind: "type filter",
                value: s.to_string(),
            }),
        }
    }
}

/// カテゴリ未選択時の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySelection {
    /// フィードなど: 全件表示
    #[default]
    MatchAll,
    /// 「手伝いたい」画面など: 選ぶまで何も表示しない
    MatchNone,
}

/// 投稿・ボランティアのフィルタ条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub categories: Vec<String>,
    pub type_filter: TypeFilter,
    pub on_empty: EmptySelection,
    /// このユーザーの投稿を除外
    pub exclude_author: Option<String>,
    /// 先頭N件のみ
    pub limit: Option<usize>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn type_filter(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }

    pub fn on_empty(mut self, on_empty: EmptySelection) -> Self {
        self.on_empty = on_empty;
        self
    }

    pub fn exclude_author(mut self, user_id: impl Into<String>) -> Self {
        self.exclude_author = Some(user_id.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// 1件のレコードが条件を満たすか（limitは対象外）
    pub fn matches<R: Categorized>(&self, record: &R) -> bool {
        if !self.type_filter.accepts(record.kind()) {
            return false;
        }
        if let (Some(excluded), Some(author)) = (&self.exclude_author, record.author()) {
            if excluded == author {
                return false;
            }
        }
        if self.categories.is_empty() {
            return self.on_empty == EmptySelection::MatchAll;
        }
        record
            .category_set()
            .iter()
            .any(|c| self.categories.contains(c))
    }

    /// 条件を満たすレコードを入力順で返す
    pub fn apply<'a, R: Categorized>(&self, records: &'a [R]) -> Vec<&'a R> {
        let matched = records.iter().filter(|r| self.matches(*r));
        match self.limit {
            Some(limit) => matched.take(limit).collect(),
            None => matched.collect(),
        }
    }

    /// 所有権を取るバージョン
    pub fn apply_owned<R: Categorized>(&self, records: Vec<R>) -> Vec<R> {
        let matched = records.into_iter().filter(|r| self.matches(r));
        match self.limit {
            Some(limit) => matched.take(limit).collect(),
            None => matched.collect(),
        }
    }
}

/// 基本の照合: 種別一致 AND（選択なし OR カテゴリが1つ以上重なる）
pub fn match_records<'a, R: Categorized>(
    records: &'a [R],
    categories: &[String],
    type_filter: TypeFilter,
) -> Vec<&'a R> {
    RecordFilter::new()
        .categories(categories.iter().cloned())
        .type_filter(type_filter)
        .apply(records)
}
