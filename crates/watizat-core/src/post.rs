//! Posts (help requests and offers), comments, and the new-post draft.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::{CategorySelection, Categorized, SelectionPolicy, MAX_POST_CATEGORIES};
use crate::error::{Result, WatizatError};

/// Per-image cap, in decoded bytes.
pub const MAX_IMAGE_BYTES: usize = 5_000_000;

/// Whether a post asks for help or offers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Need,
    Offer,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Need => "need",
            Self::Offer => "offer",
        }
    }

    /// Default type for a new post: migrants ask, everyone else offers.
    pub fn default_for_role(role: &str) -> Self {
        if role == "migrant" {
            Self::Need
        } else {
            Self::Offer
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostType {
    type Err = WatizatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "need" => Ok(Self::Need),
            "offer" => Ok(Self::Offer),
            _ => Err(WatizatError::UnknownValue {
                kind: "post type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: Option<String>,
}

/// Author summary attached by the server (display-name masking already applied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub post_id: String,
    pub user_id: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<AuthorSummary>,
}

impl Comment {
    pub fn author_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or(&self.user_id)
    }
}

/// A help request (`need`) or offer as returned by `GET /api/posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    /// Legacy single category, always `categories[0]` on new records.
    #[serde(default)]
    pub category: String,
    /// Authoritative category set (1 to 3 entries). Missing on old records.
    #[serde(default)]
    pub categories: Vec<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub location: Option<Location>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub user: Option<AuthorSummary>,
    #[serde(default)]
    pub can_help: bool,
    #[serde(default)]
    pub is_auto_response: bool,
}

impl Post {
    /// Automated assistant replies are not shown in the feed.
    pub fn visible_in_feed(&self) -> bool {
        !self.is_auto_response
    }

    pub fn author_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or(&self.user_id)
    }
}

impl Categorized for Post {
    fn category_set(&self) -> &[String] {
        if !self.categories.is_empty() {
            &self.categories
        } else if self.category.is_empty() {
            &[]
        } else {
            std::slice::from_ref(&self.category)
        }
    }

    fn kind(&self) -> Option<PostType> {
        Some(self.post_type)
    }

    fn author(&self) -> Option<&str> {
        Some(&self.user_id)
    }
}

/// An image attached to a draft, already encoded as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decoded size estimated from the base64 payload length.
    pub fn decoded_len(&self) -> Option<usize> {
        let (header, data) = self.0.strip_prefix("data:")?.split_once(',')?;
        if !header.ends_with(";base64") {
            return None;
        }
        // wrapped encoders (GNU base64) insert line breaks
        let len = data.bytes().filter(|b| !b.is_ascii_whitespace()).count();
        let padding = data
            .bytes()
            .rev()
            .filter(|b| !b.is_ascii_whitespace())
            .take_while(|b| *b == b'=')
            .count();
        Some(((len / 4) * 3 + (len % 4) * 3 / 4).saturating_sub(padding.min(2)))
    }

    fn validate(&self, index: usize) -> Result<()> {
        let size = self
            .decoded_len()
            .ok_or(WatizatError::InvalidImage { index })?;
        if size > MAX_IMAGE_BYTES {
            return Err(WatizatError::ImageTooLarge {
                index,
                size,
                max: MAX_IMAGE_BYTES,
            });
        }
        Ok(())
    }
}

/// A post being composed. `categories` is held under the post selection
/// policy, so it can never exceed three entries or become empty.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub post_type: PostType,
    pub categories: CategorySelection,
    pub title: String,
    pub description: String,
    pub images: Vec<ImagePayload>,
    pub location: Option<Location>,
}

/// Body of `POST /api/posts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPostRequest {
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub title: String,
    pub description: String,
    pub images: Vec<ImagePayload>,
    pub location: Option<Location>,
    pub category: String,
    pub categories: Vec<String>,
}

impl PostDraft {
    /// Fresh draft: type from role, category preset to `food`.
    pub fn for_role(role: &str) -> Self {
        Self {
            post_type: PostType::default_for_role(role),
            categories: CategorySelection::post_default(),
            title: String::new(),
            description: String::new(),
            images: Vec::new(),
            location: None,
        }
    }

    pub fn new(post_type: PostType) -> Self {
        Self {
            post_type,
            ..Self::for_role("")
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Replaces the category selection; must satisfy 1..=3.
    pub fn with_categories<I, S>(mut self, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = CategorySelection::seeded(SelectionPolicy::post(), ids)?;
        Ok(self)
    }

    /// Adds an image after checking its size.
    pub fn add_image(&mut self, image: ImagePayload) -> Result<()> {
        image.validate(self.images.len())?;
        self.images.push(image);
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ImagePayload> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(WatizatError::MissingField { field: "title" });
        }
        if self.description.trim().is_empty() {
            return Err(WatizatError::MissingField {
                field: "description",
            });
        }
        if self.categories.is_empty() {
            return Err(WatizatError::NoCategorySelected);
        }
        if self.categories.len() > MAX_POST_CATEGORIES {
            return Err(WatizatError::SelectionLimitExceeded {
                max: MAX_POST_CATEGORIES,
            });
        }
        for (index, image) in self.images.iter().enumerate() {
            image.validate(index)?;
        }
        Ok(())
    }

    /// Validates and builds the request body. Both `category` and
    /// `categories` are always sent.
    pub fn to_request(&self) -> Result<NewPostRequest> {
        self.validate()?;
        let categories = self.categories.current().to_vec();
        Ok(NewPostRequest {
            post_type: self.post_type,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            images: self.images.clone(),
            location: self.location.clone(),
            category: categories[0].clone(),
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data_uri(decoded: usize) -> String {
        let encoded = "A".repeat(decoded.div_ceil(3) * 4);
        format!("data:image/png;base64,{}", encoded)
    }

    #[test]
    fn test_post_type_parse() {
        assert_eq!("need".parse::<PostType>().unwrap(), PostType::Need);
        assert_eq!("OFFER".parse::<PostType>().unwrap(), PostType::Offer);
        assert!("other".parse::<PostType>().is_err());
    }

    #[test]
    fn test_default_type_for_role() {
        assert_eq!(PostType::default_for_role("migrant"), PostType::Need);
        assert_eq!(PostType::default_for_role("volunteer"), PostType::Offer);
    }

    #[test]
    fn test_legacy_post_falls_back_to_category() {
        let post: Post = serde_json::from_value(json!({
            "id": "3",
            "user_id": "u1",
            "type": "need",
            "category": "work",
            "title": "CV help",
            "description": "Need a CV review",
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert!(post.categories.is_empty());
        assert_eq!(post.category_set(), ["work"]);
    }

    #[test]
    fn test_categories_take_precedence() {
        let post: Post = serde_json::from_value(json!({
            "id": "2",
            "user_id": "u1",
            "type": "offer",
            "category": "legal",
            "categories": ["legal", "health"],
            "title": "t",
            "description": "d",
            "created_at": "2024-05-01T10:00:00Z",
            "is_auto_response": true
        }))
        .unwrap();
        assert_eq!(post.category_set(), ["legal", "health"]);
        assert!(!post.visible_in_feed());
    }

    #[test]
    fn test_draft_requires_title_and_description() {
        let draft = PostDraft::new(PostType::Need).description("d");
        assert!(matches!(
            draft.validate(),
            Err(WatizatError::MissingField { field: "title" })
        ));
        let draft = PostDraft::new(PostType::Need).title("t").description("   ");
        assert!(matches!(
            draft.validate(),
            Err(WatizatError::MissingField {
                field: "description"
            })
        ));
    }

    #[test]
    fn test_draft_request_keeps_category_and_categories() {
        let request = PostDraft::new(PostType::Need)
            .title("Looking for a lawyer")
            .description("Asylum appeal")
            .with_categories(["legal", "housing"])
            .unwrap()
            .to_request()
            .unwrap();
        assert_eq!(request.category, "legal");
        assert_eq!(request.categories, vec!["legal", "housing"]);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["type"], "need");
        assert_eq!(body["category"], "legal");
        assert_eq!(body["categories"], json!(["legal", "housing"]));
        assert_eq!(body["location"], serde_json::Value::Null);
    }

    #[test]
    fn test_draft_rejects_four_categories() {
        let result = PostDraft::new(PostType::Offer).with_categories(["food", "legal", "health", "work"]);
        assert!(matches!(
            result,
            Err(WatizatError::SelectionLimitExceeded { max: 3 })
        ));
    }

    #[test]
    fn test_image_size_limit() {
        let mut draft = PostDraft::new(PostType::Need);
        draft
            .add_image(ImagePayload::new(data_uri(1_000)))
            .unwrap();
        let err = draft
            .add_image(ImagePayload::new(data_uri(MAX_IMAGE_BYTES + 3)))
            .unwrap_err();
        assert!(matches!(err, WatizatError::ImageTooLarge { index: 1, .. }));
        assert_eq!(draft.images.len(), 1);
    }

    #[test]
    fn test_image_requires_base64_data_uri() {
        let mut draft = PostDraft::new(PostType::Need);
        let err = draft
            .add_image(ImagePayload::new("https://example.com/a.png"))
            .unwrap_err();
        assert!(matches!(err, WatizatError::InvalidImage { index: 0 }));
    }

    #[test]
    fn test_decoded_len_accounts_for_padding() {
        // "hello" -> aGVsbG8=
        let image = ImagePayload::new("data:text/plain;base64,aGVsbG8=");
        assert_eq!(image.decoded_len(), Some(5));
    }

    #[test]
    fn test_decoded_len_ignores_line_wraps() {
        let image = ImagePayload::new("data:text/plain;base64,aGVs\nbG8=\n");
        assert_eq!(image.decoded_len(), Some(5));
    }

    #[test]
    fn test_wrapped_image_under_limit_accepted() {
        // 4_999_998 bytes, wrapped at 76 columns like `base64` output
        let body = "A".repeat(4_999_998 / 3 * 4);
        let wrapped = body
            .as_bytes()
            .chunks(76)
            .map(|line| std::str::from_utf8(line).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        let image = ImagePayload::new(format!("data:image/png;base64,{}\n", wrapped));
        assert_eq!(image.decoded_len(), Some(4_999_998));

        let mut draft = PostDraft::new(PostType::Need);
        assert!(draft.add_image(image).is_ok());
    }

    #[test]
    fn test_remove_image() {
        let mut draft = PostDraft::new(PostType::Need);
        draft.add_image(ImagePayload::new(data_uri(10))).unwrap();
        assert!(draft.remove_image(3).is_none());
        assert!(draft.remove_image(0).is_some());
        assert!(draft.images.is_empty());
    }
}
