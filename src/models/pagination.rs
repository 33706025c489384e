//! Shared pagination and sorting types used by every entity list.
//!
//! List endpoints accept a small, closed set of query parameters; sort
//! columns are resolved through per-entity whitelists before any SQL is
//! built, so no client-supplied string ever reaches a query verbatim.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{Error, FieldError, Result, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A fully resolved sort: a whitelisted column name plus direction.
#[derive(Debug, Clone, Copy)]
pub struct Sort {
    pub column: &'static str,
    pub order: SortOrder,
}

/// Validated page/limit pair.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    /// Applies defaults (page 1, limit 10) and rejects values below 1.
    pub fn resolve(page: Option<i64>, limit: Option<i64>) -> Result<Self> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(10);

        let mut errors = Vec::new();
        if page < 1 {
            errors.push(FieldError::new("page", "page must be at least 1"));
        }
        if limit < 1 {
            errors.push(FieldError::new("limit", "limit must be at least 1"));
        }
        if !errors.is_empty() {
            return Err(Error::Validation(ValidationErrors::Fields(errors)));
        }

        Ok(Self { page, limit })
    }

    pub fn offset(self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Pagination envelope returned with every list response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    pub fn new(params: PageParams, total_count: i64) -> Self {
        let total_pages = (total_count + params.limit - 1) / params.limit;
        Self {
            page: params.page,
            limit: params.limit,
            total_count,
            total_pages,
            has_next_page: params.page < total_pages,
            has_previous_page: params.page > 1,
        }
    }
}

/// A page of items plus its pagination envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, params: PageParams, total_count: i64) -> Self {
        Self {
            items,
            pagination: Pagination::new(params, total_count),
        }
    }
}
