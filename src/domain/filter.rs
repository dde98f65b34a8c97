//! User-editable listing query: filters, sort field and sort direction.
//!
//! [`FilterState`] holds the values the user typed or selected; the page cursor is
//! kept beside it by the list state so that a filter change can reset it.

use crate::domain::error::{JobBoardError, Result};
use crate::domain::job::JobType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    PostingDate,
    Title,
    Company,
}

impl SortBy {
    pub const ALL: [Self; 3] = [Self::PostingDate, Self::Title, Self::Company];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostingDate => "posting_date",
            Self::Title => "title",
            Self::Company => "company",
        }
    }

    /// Human label for sort pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PostingDate => "Posting Date",
            Self::Title => "Title",
            Self::Company => "Company",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = JobBoardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s.trim())
            .ok_or_else(|| {
                JobBoardError::Validation(format!(
                    "Unknown sort field '{s}', expected one of: posting_date, title, company"
                ))
            })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "Oldest First",
            Self::Desc => "Newest First",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = JobBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(JobBoardError::Validation(format!(
                "Unknown sort order '{other}', expected asc or desc"
            ))),
        }
    }
}

/// Names one editable field of [`FilterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    Title,
    Company,
    Location,
    JobType,
    SortBy,
    SortOrder,
}

impl FilterKey {
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Company,
        Self::Location,
        Self::JobType,
        Self::SortBy,
        Self::SortOrder,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Company => "company",
            Self::Location => "location",
            Self::JobType => "job_type",
            Self::SortBy => "sort_by",
            Self::SortOrder => "sort_order",
        }
    }
}

impl FromStr for FilterKey {
    type Err = JobBoardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| JobBoardError::Validation(format!("Unknown filter '{s}'")))
    }
}

/// Current listing query as edited by the user.
///
/// Empty text filters mean "no constraint" and are left out of the backend query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Returns the raw value of a field as it is sent to the backend.
    #[must_use]
    pub fn get(&self, key: FilterKey) -> &str {
        match key {
            FilterKey::Title => &self.title,
            FilterKey::Company => &self.company,
            FilterKey::Location => &self.location,
            FilterKey::JobType => &self.job_type,
            FilterKey::SortBy => self.sort_by.as_str(),
            FilterKey::SortOrder => self.sort_order.as_str(),
        }
    }

    /// Sets one field.
    ///
    /// Returns whether the value actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Validation`] for an unknown job type, sort field or
    /// sort order. Text filters accept any value.
    pub fn set(&mut self, key: FilterKey, value: &str) -> Result<bool> {
        let before = self.clone();
        match key {
            FilterKey::Title => self.title = value.to_string(),
            FilterKey::Company => self.company = value.to_string(),
            FilterKey::Location => self.location = value.to_string(),
            FilterKey::JobType => {
                self.job_type = if value.trim().is_empty() {
                    String::new()
                } else {
                    value.parse::<JobType>()?.as_str().to_string()
                };
            }
            FilterKey::SortBy => self.sort_by = value.parse()?,
            FilterKey::SortOrder => self.sort_order = value.parse()?,
        }
        Ok(*self != before)
    }

    /// Resets one field: text filters become empty, sort fields return to defaults.
    ///
    /// Returns whether the value actually changed.
    pub fn clear(&mut self, key: FilterKey) -> bool {
        let before = self.clone();
        match key {
            FilterKey::Title => self.title.clear(),
            FilterKey::Company => self.company.clear(),
            FilterKey::Location => self.location.clear(),
            FilterKey::JobType => self.job_type.clear(),
            FilterKey::SortBy => self.sort_by = SortBy::default(),
            FilterKey::SortOrder => self.sort_order = SortOrder::default(),
        }
        *self != before
    }

    /// Query parameters for one page, in backend order.
    ///
    /// Empty text filters are omitted; sort, page and page size are always present.
    #[must_use]
    pub fn query_pairs(&self, page: u32, per_page: u32) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = [
            FilterKey::Title,
            FilterKey::Company,
            FilterKey::Location,
            FilterKey::JobType,
        ]
        .into_iter()
        .filter(|key| !self.get(*key).trim().is_empty())
        .map(|key| (key.as_str(), self.get(key).to_string()))
        .collect();

        pairs.push(("sort_by", self.sort_by.as_str().to_string()));
        pairs.push(("sort_order", self.sort_order.as_str().to_string()));
        pairs.push(("page", page.to_string()));
        pairs.push(("per_page", per_page.to_string()));
        pairs
    }

    /// Percent-encoded query string for one page (without the leading `?`).
    #[must_use]
    pub fn query_string(&self, page: u32, per_page: u32) -> String {
        self.query_pairs(page, per_page)
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
