//! View state for the feed, the "I want to help" request list and the
//! volunteer directory. Each view owns a filter-policy selection and
//! recomputes its visible records from scratch on every call.

use std::collections::HashMap;

use crate::category::{
    CategorySelection, Categorized, EmptySelection, RecordFilter, SelectionPolicy, Toggle,
    TypeFilter,
};
use crate::error::Result;
use crate::post::{Post, PostDraft, PostType};
use crate::volunteer::VolunteerProfile;

/// How many matching requests the offer form previews
pub const OFFER_PREVIEW_LIMIT: usize = 5;

/// Main feed: every post, filtered by category and type
#[derive(Debug, Clone)]
pub struct FeedView {
    posts: Vec<Post>,
    selection: CategorySelection,
    type_filter: TypeFilter,
}

impl FeedView {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            selection: CategorySelection::new(SelectionPolicy::filter()),
            type_filter: TypeFilter::All,
        }
    }

    /// Pre-seeded filters (from flags or config)
    pub fn with_filters<I, S>(posts: Vec<Post>, categories: I, type_filter: TypeFilter) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            posts,
            selection: CategorySelection::seeded(SelectionPolicy::filter(), categories)?,
            type_filter,
        })
    }

    /// Replace the posts after a re-fetch; filters are kept
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    pub fn toggle_category(&mut self, id: &str) -> Result<Toggle> {
        self.selection.toggle(id)
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        self.type_filter = type_filter;
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    pub fn filter(&self) -> RecordFilter {
        RecordFilter::new()
            .categories(self.selection.current().iter().cloned())
            .type_filter(self.type_filter)
    }

    /// Posts to display, in server order
    pub fn visible(&self) -> Vec<&Post> {
        let filter = self.filter();
        self.posts
            .iter()
            .filter(|p| p.visible_in_feed() && filter.matches(*p))
            .collect()
    }

    /// Visible-in-feed post count per category (ignores the active filter)
    pub fn category_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for post in self.posts.iter().filter(|p| p.visible_in_feed()) {
            for cat in post.category_set() {
                *counts.entry(cat.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// "I want to help": open requests in the categories a volunteer picked.
/// Nothing is shown until at least one category is selected.
#[derive(Debug, Clone)]
pub struct HelpRequestsView {
    requests: Vec<Post>,
    selection: CategorySelection,
}

impl HelpRequestsView {
    pub fn new(requests: Vec<Post>) -> Self {
        Self {
            requests,
            selection: CategorySelection::new(SelectionPolicy::filter()),
        }
    }

    /// Start from the volunteer's saved help categories
    pub fn seeded<I, S>(requests: Vec<Post>, categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            requests,
            selection: CategorySelection::seeded(SelectionPolicy::filter(), categories)?,
        })
    }

    pub fn toggle_category(&mut self, id: &str) -> Result<Toggle> {
        self.selection.toggle(id)
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    /// Whether requests need to be fetched at all
    pub fn needs_fetch(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn set_requests(&mut self, requests: Vec<Post>) {
        self.requests = requests;
    }

    pub fn visible(&self) -> Vec<&Post> {
        RecordFilter::new()
            .categories(self.selection.current().iter().cloned())
            .type_filter(TypeFilter::Need)
            .on_empty(EmptySelection::MatchNone)
            .apply(&self.requests)
    }
}

/// Other users' requests matching the categories of an offer being written.
/// Empty for `need` drafts.
pub fn offer_matches<'a>(draft: &PostDraft, posts: &'a [Post], user_id: Option<&str>) -> Vec<&'a Post> {
    if draft.post_type != PostType::Offer || draft.categories.is_empty() {
        return Vec::new();
    }
    let mut filter = RecordFilter::new()
        .categories(draft.categories.current().iter().cloned())
        .type_filter(TypeFilter::Need)
        .on_empty(EmptySelection::MatchNone)
        .limit(OFFER_PREVIEW_LIMIT);
    if let Some(user_id) = user_id {
        filter = filter.exclude_author(user_id);
    }
    filter.apply(posts)
}

/// Volunteers willing to help in any of the given categories (all when empty)
pub fn filter_volunteers<'a>(
    volunteers: &'a [VolunteerProfile],
    categories: &[String],
) -> Vec<&'a VolunteerProfile> {
    RecordFilter::new()
        .categories(categories.iter().cloned())
        .apply(volunteers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: &str, user: &str, kind: &str, categories: &[&str]) -> Post {
        serde_json::from_value(json!({
            "id": id,
            "user_id": user,
            "type": kind,
            "category": categories.first().copied().unwrap_or(""),
            "categories": categories,
            "title": format!("post {}", id),
            "description": "d",
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap()
    }

    fn legacy(id: &str, kind: &str, category: &str) -> Post {
        serde_json::from_value(json!({
            "id": id,
            "user_id": "u9",
            "type": kind,
            "category": category,
            "title": "legacy",
            "description": "d",
            "created_at": "2024-01-01T10:00:00Z"
        }))
        .unwrap()
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    fn sample() -> Vec<Post> {
        vec![
            post("1", "u1", "need", &["food"]),
            post("2", "u2", "offer", &["legal", "health"]),
            legacy("3", "need", "work"),
            post("4", "u3", "need", &["health", "housing"]),
        ]
    }

    #[test]
    fn test_feed_unfiltered_shows_everything() {
        let feed = FeedView::new(sample());
        assert_eq!(ids(&feed.visible()), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_feed_hides_auto_responses() {
        let mut posts = sample();
        posts[1].is_auto_response = true;
        let feed = FeedView::new(posts);
        assert_eq!(ids(&feed.visible()), vec!["1", "3", "4"]);
    }

    #[test]
    fn test_feed_category_and_type() {
        let mut feed = FeedView::new(sample());
        feed.toggle_category("health").unwrap();
        assert_eq!(ids(&feed.visible()), vec!["2", "4"]);
        feed.set_type_filter(TypeFilter::Need);
        assert_eq!(ids(&feed.visible()), vec!["4"]);
    }

    #[test]
    fn test_feed_legacy_category_fallback() {
        let feed = FeedView::with_filters(sample(), ["work"], TypeFilter::All).unwrap();
        assert_eq!(ids(&feed.visible()), vec!["3"]);
    }

    #[test]
    fn test_feed_keeps_filters_across_refetch() {
        let mut feed = FeedView::with_filters(sample(), ["food"], TypeFilter::All).unwrap();
        feed.set_posts(vec![post("9", "u1", "need", &["food"])]);
        assert_eq!(ids(&feed.visible()), vec!["9"]);
    }

    #[test]
    fn test_category_counts() {
        let feed = FeedView::new(sample());
        let counts = feed.category_counts();
        assert_eq!(counts.get("health"), Some(&2));
        assert_eq!(counts.get("work"), Some(&1));
        assert_eq!(counts.get("transport"), None);
    }

    #[test]
    fn test_help_requests_empty_until_selected() {
        let mut view = HelpRequestsView::new(sample());
        assert!(!view.needs_fetch());
        assert!(view.visible().is_empty());

        view.toggle_category("health").unwrap();
        assert!(view.needs_fetch());
        // offers are never listed as requests
        assert_eq!(ids(&view.visible()), vec!["4"]);

        view.toggle_category("health").unwrap();
        assert!(view.visible().is_empty());
    }

    #[test]
    fn test_help_requests_seeded() {
        let view = HelpRequestsView::seeded(sample(), ["food", "work"]).unwrap();
        assert_eq!(ids(&view.visible()), vec!["1", "3"]);
    }

    #[test]
    fn test_offer_matches_skip_own_posts_and_cap() {
        let mut posts: Vec<Post> = (0..8)
            .map(|i| post(&i.to_string(), "other", "need", &["legal"]))
            .collect();
        posts.insert(0, post("mine", "me", "need", &["legal"]));

        let draft = PostDraft::new(PostType::Offer)
            .with_categories(["legal"])
            .unwrap();
        let matches = offer_matches(&draft, &posts, Some("me"));
        assert_eq!(matches.len(), OFFER_PREVIEW_LIMIT);
        assert!(matches.iter().all(|p| p.user_id != "me"));
    }

    #[test]
    fn test_offer_matches_empty_for_need_draft() {
        let draft = PostDraft::new(PostType::Need);
        assert!(offer_matches(&draft, &sample(), None).is_empty());
    }

    #[test]
    fn test_filter_volunteers() {
        let volunteers: Vec<VolunteerProfile> = serde_json::from_value(json!([
            {"id": "v1", "name": "A", "help_categories": ["food", "legal"]},
            {"id": "v2", "name": "B", "help_categories": ["transport"]},
            {"id": "v3", "name": "C"}
        ]))
        .unwrap();
        let legal: Vec<_> = filter_volunteers(&volunteers, &["legal".to_string()])
            .iter()
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(legal, vec!["v1"]);
        assert_eq!(filter_volunteers(&volunteers, &[]).len(), 3);
    }
}
