//! Sidebar content: promotional and informational items next to the feed.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::Session;
use crate::sources::{first_available, DataSource, Fetched};

use super::client::ApiClient;

/// An advertisement or job listing shown in the sidebar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidebarItem {
    #[serde(default)]
    pub id: String,
    /// `advertisement` or `job` (absent on the plain advertisements endpoint)
    #[serde(default)]
    pub item_type: Option<String>,
    /// motivation, donation, sponsor, job
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl SidebarItem {
    pub fn is_job(&self) -> bool {
        self.item_type.as_deref() == Some("job") || self.kind == "job"
    }
}

/// `GET /api/sidebar-content` response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidebarContent {
    #[serde(default)]
    pub items: Vec<SidebarItem>,
    #[serde(default)]
    pub total_ads: usize,
    #[serde(default)]
    pub total_jobs: usize,
}

/// Primary source: ads interleaved with job listings
pub struct SidebarContentSource<'a> {
    pub client: &'a ApiClient,
    pub session: Option<&'a Session>,
}

impl DataSource<SidebarItem> for SidebarContentSource<'_> {
    fn name(&self) -> &str {
        "sidebar-content"
    }

    fn fetch(&self) -> Result<Vec<SidebarItem>> {
        self.client.sidebar_content(self.session)
    }
}

/// Fallback source: plain advertisements
pub struct AdvertisementsSource<'a> {
    pub client: &'a ApiClient,
}

impl DataSource<SidebarItem> for AdvertisementsSource<'_> {
    fn name(&self) -> &str {
        "advertisements"
    }

    fn fetch(&self) -> Result<Vec<SidebarItem>> {
        self.client.advertisements()
    }
}

/// Sidebar items from the first endpoint that answers
pub fn load_sidebar(client: &ApiClient, session: Option<&Session>) -> Fetched<SidebarItem> {
    let primary = SidebarContentSource { client, session };
    let fallback = AdvertisementsSource { client };
    first_available::<SidebarItem>(&[&primary, &fallback])
}
