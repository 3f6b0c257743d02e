//! Volunteer directory records and the four-step registration wizard.
//!
//! Professional areas are a separate registry from help categories: a
//! lawyer (`legal` area) may still volunteer for `food` or `transport`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::{CategorySelection, Categorized, SelectionPolicy};
use crate::error::{Result, WatizatError};

/// Languages offered by the registration form.
pub const SUPPORTED_LANGUAGES: &[&str] = &["pt", "fr", "en", "es", "ar", "ru"];

/// Languages preselected on a new registration.
pub const DEFAULT_LANGUAGES: &[&str] = &["pt", "fr"];

/// Suggested help modalities.
pub const HELP_TYPES: &[&str] = &[
    "One-off help",
    "Ongoing follow-up",
    "Workshops",
    "Document review",
    "Remote",
    "In person",
    "Translation",
    "Emotional support",
];

/// Professional area (distinct from help categories)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfessionalArea {
    Legal,
    Health,
    Education,
    Translation,
    Family,
    Employment,
    Housing,
    Administration,
    Finance,
    Technology,
}

impl ProfessionalArea {
    pub fn all() -> &'static [ProfessionalArea] {
        &[
            Self::Legal,
            Self::Health,
            Self::Education,
            Self::Translation,
            Self::Family,
            Self::Employment,
            Self::Housing,
            Self::Administration,
            Self::Finance,
            Self::Technology,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Health => "health",
            Self::Education => "education",
            Self::Translation => "translation",
            Self::Family => "family",
            Self::Employment => "employment",
            Self::Housing => "housing",
            Self::Administration => "administration",
            Self::Finance => "finance",
            Self::Technology => "technology",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Legal => "Legal & immigration",
            Self::Health => "Health & psychology",
            Self::Education => "Education & languages",
            Self::Translation => "Translation & interpreting",
            Self::Family => "Family & social work",
            Self::Employment => "Employment & careers",
            Self::Housing => "Housing",
            Self::Administration => "Administrative procedures",
            Self::Finance => "Finance & budgeting",
            Self::Technology => "Technology & digital skills",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Legal => "⚖️",
            Self::Health => "🏥",
            Self::Education => "📚",
            Self::Translation => "🌍",
            Self::Family => "👨‍👩‍👧",
            Self::Employment => "💼",
            Self::Housing => "🏠",
            Self::Administration => "📋",
            Self::Finance => "💰",
            Self::Technology => "💻",
        }
    }
}

impl fmt::Display for ProfessionalArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ProfessionalArea {
    type Err = WatizatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|a| a.id() == s.to_lowercase())
            .ok_or_else(|| WatizatError::UnknownValue {
                kind: "professional area",
                value: s.to_string(),
            })
    }
}

/// Years of experience bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearsOfExperience {
    #[serde(rename = "0-2")]
    UpToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "6-10")]
    SixToTen,
    #[serde(rename = "11-15")]
    ElevenToFifteen,
    #[serde(rename = "16+")]
    SixteenPlus,
}

impl YearsOfExperience {
    pub fn all() -> &'static [YearsOfExperience] {
        &[
            Self::UpToTwo,
            Self::ThreeToFive,
            Self::SixToTen,
            Self::ElevenToFifteen,
            Self::SixteenPlus,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpToTwo => "0-2",
            Self::ThreeToFive => "3-5",
            Self::SixToTen => "6-10",
            Self::ElevenToFifteen => "11-15",
            Self::SixteenPlus => "16+",
        }
    }
}

impl fmt::Display for YearsOfExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for YearsOfExperience {
    type Err = WatizatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|y| y.as_str() == s.trim())
            .ok_or_else(|| WatizatError::UnknownValue {
                kind: "years of experience",
                value: s.to_string(),
            })
    }
}

/// Entry of `GET /api/volunteers`.
///
/// Area and experience are kept as raw strings because old accounts may
/// carry values outside the current registries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolunteerProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub use_display_name: bool,
    #[serde(default)]
    pub professional_area: Option<String>,
    #[serde(default)]
    pub professional_specialties: Vec<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub professional_id: Option<String>,
    #[serde(default)]
    pub years_experience: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub help_categories: Vec<String>,
    #[serde(default)]
    pub help_types: Vec<String>,
}

impl VolunteerProfile {
    /// Name shown publicly: the display name when the volunteer opted in.
    pub fn public_name(&self) -> &str {
        match (&self.display_name, self.use_display_name) {
            (Some(display), true) if !display.trim().is_empty() => display,
            _ => &self.name,
        }
    }

    pub fn area(&self) -> Option<ProfessionalArea> {
        self.professional_area.as_deref()?.parse().ok()
    }

    pub fn experience(&self) -> Option<YearsOfExperience> {
        self.years_experience.as_deref()?.parse().ok()
    }
}

impl Categorized for VolunteerProfile {
    fn category_set(&self) -> &[String] {
        &self.help_categories
    }

    fn author(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// Registration wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegistrationStep {
    Personal = 1,
    Professional = 2,
    Formation = 3,
    Availability = 4,
}

impl RegistrationStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Personal => "Personal information",
            Self::Professional => "Professional area",
            Self::Formation => "Education & experience",
            Self::Availability => "Availability",
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::Professional),
            Self::Professional => Some(Self::Formation),
            Self::Formation => Some(Self::Availability),
            Self::Availability => None,
        }
    }

    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::Personal => None,
            Self::Professional => Some(Self::Personal),
            Self::Formation => Some(Self::Professional),
            Self::Availability => Some(Self::Formation),
        }
    }
}

/// Volunteer registration form state
#[derive(Debug, Clone)]
pub struct Registration {
    step: RegistrationStep,
    // Step 1
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub languages: Vec<String>,
    // Step 2
    pub professional_area: Option<ProfessionalArea>,
    /// Comma-separated, split on submit
    pub specialties: String,
    pub organization: String,
    pub professional_id: String,
    // Step 3
    pub education: String,
    /// Comma-separated, split on submit
    pub certifications: String,
    pub years_experience: Option<YearsOfExperience>,
    pub experience: String,
    // Step 4
    pub availability: String,
    pub help_types: Vec<String>,
    pub help_categories: CategorySelection,
    pub linkedin: String,
}

/// Body of `POST /api/auth/register` for a volunteer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub languages: Vec<String>,
    pub professional_area: ProfessionalArea,
    pub professional_specialties: Vec<String>,
    pub availability: String,
    pub experience: String,
    pub education: String,
    pub certifications: Vec<String>,
    pub professional_id: String,
    pub organization: String,
    /// Empty string when not selected
    pub years_experience: String,
    pub help_types: Vec<String>,
    pub help_categories: Vec<String>,
    pub phone: String,
    pub linkedin: String,
}

impl Default for Registration {
    fn default() -> Self {
        Self::new()
    }
}

impl Registration {
    pub fn new() -> Self {
        Self {
            step: RegistrationStep::Personal,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            phone: String::new(),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            professional_area: None,
            specialties: String::new(),
            organization: String::new(),
            professional_id: String::new(),
            education: String::new(),
            certifications: String::new(),
            years_experience: None,
            experience: String::new(),
            availability: String::new(),
            help_types: Vec::new(),
            help_categories: CategorySelection::new(SelectionPolicy::profile()),
            linkedin: String::new(),
        }
    }

    pub fn step(&self) -> RegistrationStep {
        self.step
    }

    /// Validates the current step and moves forward.
    pub fn next_step(&mut self) -> Result<RegistrationStep> {
        self.validate_step(self.step)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn prev_step(&mut self) -> RegistrationStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    pub fn validate_step(&self, step: RegistrationStep) -> Result<()> {
        let incomplete = |reason: &str| WatizatError::IncompleteStep {
            step: step.number(),
            reason: reason.to_string(),
        };
        match step {
            RegistrationStep::Personal => {
                if [&self.name, &self.email, &self.password]
                    .iter()
                    .any(|f| f.trim().is_empty())
                {
                    return Err(incomplete("name, email and password are required"));
                }
            }
            RegistrationStep::Professional => {
                if self.professional_area.is_none() {
                    return Err(incomplete("select a professional area"));
                }
            }
            RegistrationStep::Formation => {}
            RegistrationStep::Availability => {
                if self.availability.trim().is_empty() {
                    return Err(incomplete("availability is required"));
                }
                if self.help_categories.is_empty() {
                    return Err(WatizatError::NoCategorySelected);
                }
            }
        }
        Ok(())
    }

    /// Replaces the spoken languages; an empty list keeps the defaults.
    pub fn set_languages<I, S>(&mut self, langs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let langs = dedup(langs);
        if !langs.is_empty() {
            self.languages = langs;
        }
    }

    /// Replaces the help modalities, dropping repeats.
    pub fn set_help_types<I, S>(&mut self, help_types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.help_types = dedup(help_types);
    }

    /// Replaces the help categories, dropping repeats.
    pub fn set_help_categories<I, S>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.help_categories = CategorySelection::seeded(SelectionPolicy::profile(), ids)?;
        Ok(())
    }

    /// Validates every step and builds the request body.
    pub fn to_request(&self) -> Result<RegisterRequest> {
        let mut step = Some(RegistrationStep::Personal);
        while let Some(current) = step {
            self.validate_step(current)?;
            step = current.next();
        }

        let professional_area = self
            .professional_area
            .ok_or(WatizatError::MissingField {
                field: "professional_area",
            })?;

        Ok(RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            name: self.name.trim().to_string(),
            role: "volunteer".to_string(),
            languages: self.languages.clone(),
            professional_area,
            professional_specialties: split_list(&self.specialties),
            availability: self.availability.trim().to_string(),
            experience: self.experience.clone(),
            education: self.education.clone(),
            certifications: split_list(&self.certifications),
            professional_id: self.professional_id.clone(),
            organization: self.organization.clone(),
            years_experience: self
                .years_experience
                .map(|y| y.as_str().to_string())
                .unwrap_or_default(),
            help_types: self.help_types.clone(),
            help_categories: self.help_categories.current().to_vec(),
            phone: self.phone.clone(),
            linkedin: self.linkedin.clone(),
        })
    }
}

fn dedup<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.into().trim().to_string();
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES
        .iter()
        .any(|l| l.eq_ignore_ascii_case(code.trim()))
}

/// Whether the value is one of the suggested modalities (free text is still accepted)
pub fn is_suggested_help_type(help_type: &str) -> bool {
    HELP_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(help_type.trim()))
}

/// Split a comma-separated field, dropping blanks
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_registration() -> Registration {
        let mut reg = Registration::new();
        reg.name = "Ana".to_string();
        reg.email = "ana@example.org".to_string();
        reg.password = "secret".to_string();
        reg.professional_area = Some(ProfessionalArea::Legal);
        reg.specialties = "asylum, , family law ".to_string();
        reg.years_experience = Some(YearsOfExperience::SixToTen);
        reg.availability = "Weekends".to_string();
        reg.set_help_categories(["legal"]).unwrap();
        reg
    }

    #[test]
    fn test_professional_area_parse() {
        assert_eq!(
            "technology".parse::<ProfessionalArea>().unwrap(),
            ProfessionalArea::Technology
        );
        assert!("plumbing".parse::<ProfessionalArea>().is_err());
        assert_eq!(ProfessionalArea::all().len(), 10);
    }

    #[test]
    fn test_years_of_experience_serde() {
        let value = serde_json::to_value(YearsOfExperience::SixteenPlus).unwrap();
        assert_eq!(value, json!("16+"));
        assert_eq!(
            "11-15".parse::<YearsOfExperience>().unwrap(),
            YearsOfExperience::ElevenToFifteen
        );
        assert_eq!(YearsOfExperience::all().len(), 5);
    }

    #[test]
    fn test_public_name_masking() {
        let mut vol = VolunteerProfile {
            id: "v1".to_string(),
            name: "Maria Silva".to_string(),
            display_name: Some("Helper M".to_string()),
            ..Default::default()
        };
        assert_eq!(vol.public_name(), "Maria Silva");
        vol.use_display_name = true;
        assert_eq!(vol.public_name(), "Helper M");
        vol.display_name = Some("  ".to_string());
        assert_eq!(vol.public_name(), "Maria Silva");
    }

    #[test]
    fn test_volunteer_tolerates_legacy_values() {
        let vol: VolunteerProfile = serde_json::from_value(json!({
            "id": "v2",
            "name": "Jo",
            "professional_area": "astrology",
            "years_experience": "",
            "help_categories": ["food"]
        }))
        .unwrap();
        assert!(vol.area().is_none());
        assert!(vol.experience().is_none());
        assert_eq!(vol.category_set(), ["food"]);
    }

    #[test]
    fn test_step_one_requires_fields() {
        let mut reg = Registration::new();
        reg.name = "Ana".to_string();
        let err = reg.next_step().unwrap_err();
        assert!(matches!(err, WatizatError::IncompleteStep { step: 1, .. }));
        assert_eq!(reg.step(), RegistrationStep::Personal);
    }

    #[test]
    fn test_wizard_walkthrough() {
        let mut reg = complete_registration();
        assert_eq!(reg.next_step().unwrap(), RegistrationStep::Professional);
        assert_eq!(reg.next_step().unwrap(), RegistrationStep::Formation);
        assert_eq!(reg.next_step().unwrap(), RegistrationStep::Availability);
        assert_eq!(reg.next_step().unwrap(), RegistrationStep::Availability);
        assert_eq!(reg.prev_step(), RegistrationStep::Formation);
    }

    #[test]
    fn test_step_two_requires_area() {
        let mut reg = complete_registration();
        reg.professional_area = None;
        reg.next_step().unwrap();
        let err = reg.next_step().unwrap_err();
        assert!(matches!(err, WatizatError::IncompleteStep { step: 2, .. }));
    }

    #[test]
    fn test_submit_requires_help_category() {
        let mut reg = complete_registration();
        reg.set_help_categories(Vec::<String>::new()).unwrap();
        assert!(matches!(
            reg.to_request(),
            Err(WatizatError::NoCategorySelected)
        ));
    }

    #[test]
    fn test_register_request_body() {
        let mut reg = complete_registration();
        reg.set_languages(["fr", "ar"]);
        reg.set_help_types(["Remote"]);
        let request = reg.to_request().unwrap();
        assert_eq!(request.role, "volunteer");
        assert_eq!(request.languages, vec!["fr", "ar"]);
        assert_eq!(
            request.professional_specialties,
            vec!["asylum", "family law"]
        );
        assert!(request.certifications.is_empty());

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["professional_area"], "legal");
        assert_eq!(body["years_experience"], "6-10");
        assert_eq!(body["help_categories"], json!(["legal"]));
        assert_eq!(body["help_types"], json!(["Remote"]));
    }

    #[test]
    fn test_repeated_help_categories_are_kept_once() {
        let mut reg = complete_registration();
        reg.set_help_categories(["food", "food", "legal"]).unwrap();
        let body = reg.to_request().unwrap();
        assert_eq!(body.help_categories, vec!["food", "legal"]);
    }

    #[test]
    fn test_repeated_help_types_are_kept_once() {
        let mut reg = complete_registration();
        reg.set_help_types(["Remote", "Remote", " ", "Translation"]);
        assert_eq!(reg.help_types, vec!["Remote", "Translation"]);
    }

    #[test]
    fn test_set_languages_replaces_defaults() {
        let mut reg = Registration::new();
        reg.set_languages(["pt"]);
        assert_eq!(reg.languages, vec!["pt"]);

        reg.set_languages(["en", "ar", "en"]);
        assert_eq!(reg.languages, vec!["en", "ar"]);

        reg.set_languages(Vec::<String>::new());
        assert_eq!(reg.languages, vec!["en", "ar"]);
    }

    #[test]
    fn test_known_languages_and_help_types() {
        assert!(is_supported_language("AR"));
        assert!(!is_supported_language("de"));
        assert!(is_suggested_help_type("remote"));
        assert!(!is_suggested_help_type("Cooking"));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_list(" , ").is_empty());
    }
}
