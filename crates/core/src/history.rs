//! Prompt history transformations
//!
//! Maps the history endpoint's response into display items. Pure functions:
//! the caller is responsible for fetching or reading the response.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Page size the history list requests.
pub const PAGE_SIZE: usize = 10;

/// Tool mode shown when the API omits one.
pub const DEFAULT_TOOL_MODE: &str = "Cursor";

/// Message used when a failed response carries none.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to load prompt history.";

/// Current version embedded in a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVersion {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub version_number: u32,
    pub refined_prompt: Option<String>,
    pub created_at: Option<String>,
}

/// History entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHistoryItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub raw_prompt: Option<String>,
    pub current_version: Option<ApiVersion>,
    pub tool_mode: Option<String>,
    pub version_count: Option<u32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryData {
    #[serde(default)]
    pub history: Vec<ApiHistoryItem>,
    pub pagination: Option<Pagination>,
}

/// Envelope of the history endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub message: Option<String>,
    pub data: Option<HistoryData>,
}

/// History entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub created_at: String,
    pub tool_mode: String,
    pub versions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refined_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPage {
    pub items: Vec<HistoryItem>,
    pub pagination: Pagination,
}

/// First value that is present and not empty.
fn first_non_empty<'a>(values: &[Option<&'a String>]) -> Option<&'a String> {
    values
        .iter()
        .flatten()
        .find(|value| !value.is_empty())
        .copied()
}

/// Map a single API entry to its display form.
pub fn transform_history_item(item: ApiHistoryItem) -> HistoryItem {
    let preview = first_non_empty(&[item.description.as_ref(), item.raw_prompt.as_ref()])
        .cloned()
        .unwrap_or_default();
    let created_at = first_non_empty(&[item.updated_at.as_ref(), item.created_at.as_ref()])
        .cloned()
        .unwrap_or_default();
    let tool_mode = first_non_empty(&[item.tool_mode.as_ref()])
        .cloned()
        .unwrap_or_else(|| DEFAULT_TOOL_MODE.to_string());
    let refined_prompt = item
        .current_version
        .and_then(|version| version.refined_prompt);

    HistoryItem {
        id: item.id,
        title: item.title,
        preview,
        created_at,
        tool_mode,
        versions: item.version_count.unwrap_or(1),
        refined_prompt,
        raw_prompt: item.raw_prompt,
    }
}

/// Pagination used when the response does not include any.
pub fn fallback_pagination(total: usize, page: usize) -> Pagination {
    Pagination {
        total,
        page,
        limit: PAGE_SIZE,
        total_pages: 1,
        has_next_page: false,
        has_prev_page: false,
    }
}

/// Map a history response for `requested_page` into display items.
///
/// A response without `data` is treated as a failure and reported with its
/// message.
pub fn transform_history(
    response: HistoryResponse,
    requested_page: usize,
) -> Result<HistoryPage, Error> {
    if requested_page == 0 {
        return Err(Error::InvalidPage(requested_page));
    }

    let Some(data) = response.data else {
        let message = response
            .message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        return Err(Error::Api(message));
    };

    let items: Vec<HistoryItem> = data
        .history
        .into_iter()
        .map(transform_history_item)
        .collect();

    let pagination = data
        .pagination
        .unwrap_or_else(|| fallback_pagination(items.len(), requested_page));

    Ok(HistoryPage { items, pagination })
}

/// Page to load when moving back, if there is one.
pub fn prev_page(pagination: &Pagination) -> Option<usize> {
    pagination
        .has_prev_page
        .then(|| pagination.page.saturating_sub(1).max(1))
}

/// Page to load when moving forward, if there is one.
pub fn next_page(pagination: &Pagination) -> Option<usize> {
    pagination
        .has_next_page
        .then(|| pagination.page.saturating_add(1))
}

/// Prompt loaded into the editor when an entry is opened.
///
/// Prefers the refined prompt and falls back to the raw one.
pub fn prompt_to_open(item: &HistoryItem) -> &str {
    first_non_empty(&[item.refined_prompt.as_ref(), item.raw_prompt.as_ref()])
        .map(String::as_str)
        .unwrap_or("")
}

/// Find an entry by id.
pub fn find_item<'a>(items: &'a [HistoryItem], id: &str) -> Result<&'a HistoryItem, Error> {
    items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| Error::ItemNotFound(id.to_string()))
}

/// Format an API date in `tz`.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (UTC midnight).
/// Returns an empty string for empty or unparseable input.
pub fn format_date<Tz>(value: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if value.is_empty() {
        return String::new();
    }

    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        });

    match parsed {
        Some(dt) => dt
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => String::new(),
    }
}
