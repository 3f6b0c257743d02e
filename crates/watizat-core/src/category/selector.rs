//! Category Selector
//!
//! 投稿・プロフィール・フィルタで共有するカテゴリ選択状態。
//! 最小数・最大数は呼び出し側のポリシーで決まる。

use crate::error::{Result, WatizatError};

/// 投稿あたりの最大カテゴリ数
pub const MAX_POST_CATEGORIES: usize = 3;

/// 選択数の制約
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// 最小選択数（0ならすべて外せる）
    pub min: usize,
    /// 最大選択数（Noneなら無制限）
    pub max: Option<usize>,
}

impl SelectionPolicy {
    /// 投稿作成用: 1〜3個
    pub const fn post() -> Self {
        Self {
            min: 1,
            max: Some(MAX_POST_CATEGORIES),
        }
    }

    /// フィルタ用: 0個以上、上限なし
    pub const fn filter() -> Self {
        Self { min: 0, max: None }
    }

    /// ボランティア登録・プロフィール編集用: 上限なし、送信時に1個以上を要求
    pub const fn profile() -> Self {
        Self::filter()
    }

    fn allows_more(&self, len: usize) -> bool {
        self.max.map_or(true, |max| len < max)
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::filter()
    }
}

/// toggleの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// 最小数を割るため外さなかった
    KeptMinimum,
}

/// カテゴリ選択状態（追加順を保持）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelection {
    policy: SelectionPolicy,
    selected: Vec<String>,
}

impl CategorySelection {
    /// 空の選択状態
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            selected: Vec::new(),
        }
    }

    /// 初期値付きで作成（重複は除去、ポリシー違反はエラー）
    pub fn seeded<I, S>(policy: SelectionPolicy, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new(policy);
        for id in ids {
            let id = id.into();
            if selection.contains(&id) {
                continue;
            }
            if !policy.allows_more(selection.selected.len()) {
                return Err(WatizatError::SelectionLimitExceeded {
                    max: policy.max.unwrap_or_default(),
                });
            }
            selection.selected.push(id);
        }
        if selection.selected.len() < policy.min {
            return Err(WatizatError::NoCategorySelected);
        }
        Ok(selection)
    }

    /// 新規投稿のデフォルト選択（food）
    pub fn post_default() -> Self {
        Self {
            policy: SelectionPolicy::post(),
            selected: vec!["food".to_string()],
        }
    }

    /// 選択済みなら外し、未選択なら追加する
    ///
    /// 上限超過は`SelectionLimitExceeded`（状態は変わらない）。
    /// 最小数を割る削除は`Toggle::KeptMinimum`を返して何もしない。
    pub fn toggle(&mut self, id: &str) -> Result<Toggle> {
        if let Some(pos) = self.selected.iter().position(|c| c == id) {
            if self.selected.len() <= self.policy.min {
                tracing::debug!(category = id, "keeping last required category");
                return Ok(Toggle::KeptMinimum);
            }
            self.selected.remove(pos);
            return Ok(Toggle::Removed);
        }

        if !self.policy.allows_more(self.selected.len()) {
            let max = self.policy.max.unwrap_or_default();
            tracing::debug!(category = id, max, "selection limit reached");
            return Err(WatizatError::SelectionLimitExceeded { max });
        }
        self.selected.push(id.to_string());
        Ok(Toggle::Added)
    }

    /// 選択中のカテゴリ（追加順）
    pub fn current(&self) -> &[String] {
        &self.selected
    }

    /// 先頭カテゴリ（旧`category`フィールド用）
    pub fn primary(&self) -> Option<&str> {
        self.selected.first().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|c| c == id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// 上限に達しておらず、追加可能か
    pub fn can_select(&self, id: &str) -> bool {
        self.contains(id) || self.policy.allows_more(self.selected.len())
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// 全解除（min == 0 のときのみ）
    pub fn clear(&mut self) -> Toggle {
        if self.policy.min > 0 {
            return Toggle::KeptMinimum;
        }
        self.selected.clear();
        Toggle::Removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_one_keeps_last() {
        let mut sel = CategorySelection::seeded(SelectionPolicy::post(), ["food"]).unwrap();
        let result = sel.toggle("food").unwrap();
        assert_eq!(result, Toggle::KeptMinimum);
        assert_eq!(sel.current(), ["food"]);
    }

    #[test]
    fn test_maximum_three_rejects_fourth() {
        let mut sel =
            CategorySelection::seeded(SelectionPolicy::post(), ["food", "legal", "health"])
                .unwrap();
        let err = sel.toggle("housing").unwrap_err();
        assert!(matches!(
            err,
            WatizatError::SelectionLimitExceeded { max: 3 }
        ));
        assert_eq!(sel.current(), ["food", "legal", "health"]);
    }

    #[test]
    fn test_toggle_add_and_remove() {
        let mut sel = CategorySelection::post_default();
        assert_eq!(sel.toggle("legal").unwrap(), Toggle::Added);
        assert_eq!(sel.current(), ["food", "legal"]);
        assert_eq!(sel.toggle("food").unwrap(), Toggle::Removed);
        assert_eq!(sel.current(), ["legal"]);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut sel = CategorySelection::new(SelectionPolicy::filter());
        sel.toggle("transport").unwrap();
        sel.toggle("food").unwrap();
        sel.toggle("legal").unwrap();
        assert_eq!(sel.current(), ["transport", "food", "legal"]);
        assert_eq!(sel.primary(), Some("transport"));
    }

    #[test]
    fn test_filter_policy_allows_empty_and_unbounded() {
        let mut sel = CategorySelection::new(SelectionPolicy::filter());
        for id in ["food", "legal", "health", "housing", "work"] {
            assert_eq!(sel.toggle(id).unwrap(), Toggle::Added);
        }
        assert_eq!(sel.len(), 5);
        for id in ["food", "legal", "health", "housing", "work"] {
            assert_eq!(sel.toggle(id).unwrap(), Toggle::Removed);
        }
        assert!(sel.is_empty());
    }

    #[test]
    fn test_seeded_rejects_policy_violations() {
        assert!(matches!(
            CategorySelection::seeded(SelectionPolicy::post(), Vec::<String>::new()),
            Err(WatizatError::NoCategorySelected)
        ));
        assert!(matches!(
            CategorySelection::seeded(
                SelectionPolicy::post(),
                ["food", "legal", "health", "work"]
            ),
            Err(WatizatError::SelectionLimitExceeded { max: 3 })
        ));
    }

    #[test]
    fn test_seeded_dedups() {
        let sel =
            CategorySelection::seeded(SelectionPolicy::post(), ["food", "food", "legal"]).unwrap();
        assert_eq!(sel.current(), ["food", "legal"]);
    }

    #[test]
    fn test_can_select() {
        let sel =
            CategorySelection::seeded(SelectionPolicy::post(), ["food", "legal", "health"])
                .unwrap();
        assert!(sel.can_select("food"));
        assert!(!sel.can_select("work"));
    }

    #[test]
    fn test_clear_respects_minimum() {
        let mut post = CategorySelection::post_default();
        assert_eq!(post.clear(), Toggle::KeptMinimum);
        assert_eq!(post.len(), 1);

        let mut filter = CategorySelection::seeded(SelectionPolicy::filter(), ["food"]).unwrap();
        assert_eq!(filter.clear(), Toggle::Removed);
        assert!(filter.is_empty());
    }
}
