pub mod api;
pub mod category;
pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod post;
pub mod profile;
pub mod session;
pub mod sources;
pub mod volunteer;

pub use api::{load_sidebar, ApiClient, SidebarItem};
pub use config::{ApiConfig, Config, FeedConfig, BACKEND_URL_ENV, DEFAULT_BASE_URL};
pub use error::{Result, WatizatError};
pub use feed::{filter_volunteers, offer_matches, FeedView, HelpRequestsView, OFFER_PREVIEW_LIMIT};
pub use post::{
    AuthorSummary, Comment, ImagePayload, Location, NewPostRequest, Post, PostDraft, PostType,
    MAX_IMAGE_BYTES,
};
pub use profile::{ProfileUpdate, UserProfile};
pub use session::{AuthResponse, Session};
pub use sources::{first_available, DataSource, Fetched};
pub use volunteer::{
    ProfessionalArea, RegisterRequest, Registration, RegistrationStep, VolunteerProfile,
    YearsOfExperience,
};

// Category system
pub use category::{
    match_records, CategoriesConfig, CategoryDef, CategorySelection, CategoryStore, Categorized,
    EmptySelection, RecordFilter, Resource, SelectionPolicy, Toggle, TypeFilter,
    BUILTIN_CATEGORIES, MAX_POST_CATEGORIES,
};
