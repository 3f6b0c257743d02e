//! REST API access
//!
//! - `client`: typed endpoints (posts, comments, profile, auth, volunteers)
//! - `sidebar`: sidebar items and their fallback chain

mod client;
mod sidebar;

pub use client::ApiClient;
pub use sidebar::{
    load_sidebar, AdvertisementsSource, SidebarContent, SidebarContentSource, SidebarItem,
};
