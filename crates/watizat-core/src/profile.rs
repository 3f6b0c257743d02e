//! Current user's profile and the partial update sent to `PUT /api/profile`.

use serde::{Deserialize, Serialize};

use crate::category::{CategorySelection, SelectionPolicy};
use crate::error::Result;
use crate::post::Location;

/// `GET /api/profile` response (also the `user` of an auth response)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub use_display_name: bool,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub help_categories: Vec<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl UserProfile {
    pub fn public_name(&self) -> &str {
        match (&self.display_name, self.use_display_name) {
            (Some(display), true) if !display.trim().is_empty() => display,
            _ => &self.name,
        }
    }

    pub fn is_volunteer(&self) -> bool {
        matches!(self.role.as_str(), "volunteer" | "helper")
    }

    /// Editable selection seeded from the saved help categories
    pub fn help_selection(&self) -> Result<CategorySelection> {
        CategorySelection::seeded(SelectionPolicy::profile(), self.help_categories.clone())
    }
}

/// Partial profile update; unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_display_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_categories: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn display_name(name: impl Into<String>, use_it: bool) -> Self {
        Self {
            display_name: Some(name.into()),
            use_display_name: Some(use_it),
            ..Default::default()
        }
    }

    pub fn help_categories(selection: &CategorySelection) -> Self {
        Self {
            help_categories: Some(selection.current().to_vec()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.use_display_name.is_none()
            && self.help_categories.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_omits_unset_fields() {
        let update = ProfileUpdate::display_name("Helper M", true);
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(
            body,
            json!({"display_name": "Helper M", "use_display_name": true})
        );
    }

    #[test]
    fn test_update_help_categories() {
        let selection =
            CategorySelection::seeded(SelectionPolicy::profile(), ["food", "transport"]).unwrap();
        let body = serde_json::to_value(ProfileUpdate::help_categories(&selection)).unwrap();
        assert_eq!(body, json!({"help_categories": ["food", "transport"]}));
    }

    #[test]
    fn test_empty_update() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(!ProfileUpdate::display_name("x", false).is_empty());
    }

    #[test]
    fn test_profile_decode_and_selection() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": "u1",
            "name": "Ana",
            "role": "volunteer",
            "display_name": "A.",
            "use_display_name": true,
            "help_categories": ["legal", "health"],
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(profile.public_name(), "A.");
        assert!(profile.is_volunteer());
        let selection = profile.help_selection().unwrap();
        assert_eq!(selection.current(), ["legal", "health"]);
    }
}
