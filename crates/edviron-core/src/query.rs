//! Transaction listing query: filters, sorting and pagination.
//!
//! The URL query string is the single source of truth for what the listing
//! shows. A [`TransactionQuery`] is parsed from it on every request and
//! serialised back into the backend request and into the links the page
//! renders (sort headers, pager, page size selector).

use chrono::NaiveDate;
use edviron_config::PaginationConfig;
use serde::{Deserialize, Serialize};

use super::types::{SortField, SortOrder};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;
/// Highest page number accepted from a URL
pub const MAX_PAGE: usize = 1_000_000;

/// Filter, sort and pagination state of the transaction listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub statuses: Vec<String>,
    pub school_ids: Vec<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub page: usize,
    pub limit: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub collect_id: Option<String>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            statuses: vec![],
            school_ids: vec![],
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            start_date: None,
            end_date: None,
            collect_id: None,
        }
    }
}

/// Values submitted by the filter form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub statuses: Vec<String>,
    pub school_ids: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub collect_id: Option<String>,
}

impl FilterForm {
    /// Read the filter fields out of a form-encoded body or query string
    pub fn from_query_string(raw: &str) -> Self {
        let mut form = FilterForm::default();
        for (key, value) in parse_pairs(raw) {
            match key.as_str() {
                "status" => push_unique(&mut form.statuses, value),
                "school_id" => push_unique(&mut form.school_ids, value),
                "startDate" => form.start_date = parse_date(&value),
                "endDate" => form.end_date = parse_date(&value),
                "collectId" => form.collect_id = Some(value),
                _ => {}
            }
        }
        form
    }
}

impl TransactionQuery {
    /// Default query with the configured page size
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            ..Self::default()
        }
    }

    /// Ordered key/value pairs sent to `GET /transactions`.
    ///
    /// Multi-select filters repeat their key once per value.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for status in &self.statuses {
            pairs.push(("status".to_string(), status.clone()));
        }
        for school_id in &self.school_ids {
            pairs.push(("school_id".to_string(), school_id.clone()));
        }
        pairs.push(("sortBy".to_string(), self.sort_by.as_str().to_string()));
        pairs.push(("sortOrder".to_string(), self.sort_order.as_str().to_string()));
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        if let Some(start) = self.start_date {
            pairs.push(("startDate".to_string(), start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate".to_string(), end.format("%Y-%m-%d").to_string()));
        }
        if let Some(ref collect_id) = self.collect_id {
            pairs.push(("collectId".to_string(), collect_id.clone()));
        }
        pairs
    }

    /// URL-encoded query string (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse a raw query string.
    ///
    /// Repeated keys are kept in order, empty values are ignored, unparsable
    /// numbers and enums fall back to defaults, and `page`/`limit` are
    /// clamped into `1..` and `1..=max_limit`.
    pub fn from_query_string(raw: &str, pagination: &PaginationConfig) -> Self {
        let mut query = TransactionQuery::with_limit(pagination.default_limit);

        for (key, value) in parse_pairs(raw) {
            match key.as_str() {
                "status" => push_unique(&mut query.statuses, value),
                "school_id" => push_unique(&mut query.school_ids, value),
                "sortBy" => {
                    if let Ok(field) = value.parse() {
                        query.sort_by = field;
                    }
                }
                "sortOrder" => {
                    if let Ok(order) = value.parse() {
                        query.sort_order = order;
                    }
                }
                "page" => {
                    if let Ok(page) = value.parse::<usize>() {
                        query.page = page;
                    }
                }
                "limit" => {
                    if let Ok(limit) = value.parse::<usize>() {
                        query.limit = limit;
                    }
                }
                "startDate" => query.start_date = parse_date(&value),
                "endDate" => query.end_date = parse_date(&value),
                "collectId" => query.collect_id = Some(value),
                _ => {}
            }
        }

        query.page = query.page.clamp(1, MAX_PAGE);
        query.limit = query.limit.clamp(1, pagination.max_limit.max(1));
        query
    }

    /// Click on a column header: the active ascending column flips to
    /// descending, any other click sorts that column ascending
    pub fn toggle_sort(&self, field: SortField) -> Self {
        let sort_order = if self.sort_by == field && self.sort_order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        Self {
            sort_by: field,
            sort_order,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            ..self.clone()
        }
    }

    /// Change the page size; the listing restarts at page 1
    pub fn with_page_size(&self, limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            page: 1,
            ..self.clone()
        }
    }

    /// Replace the filters and go back to page 1, keeping sort and page size
    pub fn apply_filters(&self, form: FilterForm) -> Self {
        Self {
            statuses: form.statuses,
            school_ids: form.school_ids,
            start_date: form.start_date,
            end_date: form.end_date,
            collect_id: form.collect_id,
            page: 1,
            ..self.clone()
        }
    }

    /// Serial number shown in the first column for the row at `index`
    pub fn serial_number(&self, index: usize) -> usize {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .saturating_add(index)
            .saturating_add(1)
    }

    /// Arrow for the header of `field`, empty when it is not the sort column
    pub fn sort_indicator(&self, field: SortField) -> &'static str {
        if self.sort_by == field {
            self.sort_order.indicator()
        } else {
            ""
        }
    }

    pub fn has_filters(&self) -> bool {
        !self.statuses.is_empty()
            || !self.school_ids.is_empty()
            || self.start_date.is_some()
            || self.end_date.is_some()
            || self.collect_id.is_some()
    }
}

/// Split a raw query string into decoded pairs, dropping empty values
fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    let raw = raw.trim_start_matches('?');
    let mut pairs = Vec::new();
    for part in raw.split('&') {
        let (key, value) = match part.split_once('=') {
            Some((k, v)) => (k, v),
            None => (part, ""),
        };
        let key = decode(key);
        let value = decode(value);
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        pairs.push((key, value.to_string()));
    }
    pairs
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    urlencoding::decode(&s)
        .map(|v| v.into_owned())
        .unwrap_or(s)
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
