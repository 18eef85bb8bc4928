//! Chronicling America title search response models

use serde::{Deserialize, Serialize};

/// One page of title search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleSearchResults {
    /// Total number of titles matching the search
    #[serde(rename = "totalItems", default)]
    pub total_items: u64,

    /// 1-based index of the first item on this page
    #[serde(rename = "startIndex", default)]
    pub start_index: u64,

    /// 1-based index of the last item on this page
    #[serde(rename = "endIndex", default)]
    pub end_index: u64,

    /// Page size used by the server
    #[serde(rename = "itemsPerPage", default)]
    pub items_per_page: u64,

    /// Titles on this page
    #[serde(default)]
    pub items: Vec<NewsTitle>,
}

/// A newspaper title record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsTitle {
    /// Library of Congress control number
    #[serde(default)]
    pub lccn: String,

    /// Newspaper title
    #[serde(default)]
    pub title: String,

    /// First year of publication, as reported by the API
    #[serde(default)]
    pub start_year: Option<String>,

    /// Last year of publication, as reported by the API
    #[serde(default)]
    pub end_year: Option<String>,

    /// Place of publication
    #[serde(default)]
    pub place_of_publication: Option<String>,

    /// Publication frequency (e.g. "Weekly")
    #[serde(default)]
    pub frequency: Option<String>,
}
