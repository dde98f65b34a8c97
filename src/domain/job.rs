//! Job posting domain model.
//!
//! This module defines [`JobRecord`], the shape of a job posting as exchanged with the
//! backend, the enumerated [`JobType`], and [`NewJob`], the payload used to create or
//! fully replace a posting. `NewJob::validate` carries the client-side field checks.

use crate::domain::error::{JobBoardError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Minimum description length when a description is given.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Minimum length of a single tag.
pub const MIN_TAG_LEN: usize = 2;

/// Kind of employment offered by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Internship")]
    Internship,
}

impl JobType {
    /// Every job type, in display order.
    pub const ALL: [Self; 4] = [Self::FullTime, Self::PartTime, Self::Contract, Self::Internship];

    /// Wire and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = JobBoardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|job_type| job_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                JobBoardError::Validation(format!(
                    "Unknown job type '{s}', expected one of: Full-time, Part-time, Contract, Internship"
                ))
            })
    }
}

/// A job posting as returned by the backend.
///
/// `id` is assigned by the server and never reused. A posting without skills
/// carries an empty `tags` vector; the field is never absent after decoding.
/// The backend names the field `tags`, older payloads call it `skills`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "skills", deserialize_with = "tags_or_empty")]
    pub tags: Vec<String>,
    #[serde(with = "timestamp")]
    pub posting_date: DateTime<Utc>,
    #[serde(default, with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn tags_or_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses RFC 3339 or a naive ISO-8601 timestamp (interpreted as UTC).
///
/// The backend emits naive `YYYY-MM-DDTHH:MM:SS[.ffffff]` values.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

mod timestamp {
    use super::{parse_timestamp, DateTime, Deserialize, Deserializer, Serializer, Utc};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}

mod optional_timestamp {
    use super::{parse_timestamp, DateTime, Deserialize, Deserializer, Serializer, Utc};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(&value.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
            None => Ok(None),
        }
    }
}

/// Payload for creating a posting or replacing one in full.
///
/// On the wire `tags` is a JSON-encoded array inside a string and
/// `posting_date` is an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: Option<JobType>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub posting_date: DateTime<Utc>,
}

impl Default for NewJob {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            job_type: None,
            description: None,
            url: None,
            tags: Vec::new(),
            posting_date: Utc::now(),
        }
    }
}

#[derive(Serialize)]
struct NewJobWire<'a> {
    title: &'a str,
    company: &'a str,
    location: &'a str,
    job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    tags: String,
    posting_date: String,
}

impl Serialize for NewJob {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let tags = serde_json::to_string(&self.tags).map_err(serde::ser::Error::custom)?;
        NewJobWire {
            title: &self.title,
            company: &self.company,
            location: &self.location,
            job_type: self.job_type,
            description: self.description.as_deref(),
            url: self.url.as_deref(),
            tags,
            posting_date: self.posting_date.to_rfc3339(),
        }
        .serialize(serializer)
    }
}

impl NewJob {
    /// Trims text fields and drops empty optional values.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.company = self.company.trim().to_string();
        self.location = self.location.trim().to_string();
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.url = self.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
        self.tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    /// Runs the client-side field checks.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Validation`] naming the first failing rule. Missing
    /// required fields are reported together.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.company.trim().is_empty() {
            missing.push("company");
        }
        if self.location.trim().is_empty() {
            missing.push("location");
        }
        if self.job_type.is_none() {
            missing.push("job_type");
        }
        if !missing.is_empty() {
            return Err(JobBoardError::Validation(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            )));
        }

        if let Some(description) = self.description.as_deref() {
            if description.chars().count() < MIN_DESCRIPTION_LEN {
                return Err(JobBoardError::Validation(format!(
                    "Description must be at least {MIN_DESCRIPTION_LEN} characters long"
                )));
            }
        }

        if let Some(url) = self.url.as_deref() {
            if !is_absolute_url(url) {
                return Err(JobBoardError::Validation(format!("Please enter a valid URL: {url}")));
            }
        }

        if let Some(tag) = self.tags.iter().find(|t| t.chars().count() < MIN_TAG_LEN) {
            return Err(JobBoardError::Validation(format!(
                "Each tag must be at least {MIN_TAG_LEN} characters long: '{tag}'"
            )));
        }

        Ok(())
    }
}

fn is_absolute_url(raw: &str) -> bool {
    reqwest::Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

impl From<&JobRecord> for NewJob {
    fn from(job: &JobRecord) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_type: Some(job.job_type),
            description: job.description.clone(),
            url: job.url.clone(),
            tags: job.tags.clone(),
            posting_date: job.posting_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_job() -> NewJob {
        NewJob {
            title: "Backend Engineer".into(),
            company: "Acme".into(),
            location: "Berlin".into(),
            job_type: Some(JobType::FullTime),
            description: Some("Build and run our services.".into()),
            url: Some("https://acme.example/jobs/1".into()),
            tags: vec!["rust".into(), "sql".into()],
            posting_date: Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn decodes_backend_record_with_naive_timestamp() {
        let json = r#"{
            "id": 7,
            "title": "Engineer",
            "company": "Acme",
            "location": "Remote",
            "posting_date": "2024-01-05T09:30:00.123456",
            "job_type": "Full-time",
            "tags": ["react", "node"],
            "description": null,
            "url": null,
            "created_at": "2024-01-05T09:30:00",
            "updated_at": "2024-01-06T10:00:00"
        }"#;
        let job: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, 7);
        assert_eq!(job.job_type, JobType::FullTime);
        assert_eq!(job.tags, vec!["react", "node"]);
        assert_eq!(job.posting_date.date_naive().to_string(), "2024-01-05");
        assert!(job.updated_at.is_some());
    }

    #[test]
    fn missing_or_null_tags_decode_as_empty() {
        let absent = r#"{"id":1,"title":"a","company":"b","location":"c","job_type":"Contract","posting_date":"2024-01-05T09:30:00Z"}"#;
        let job: JobRecord = serde_json::from_str(absent).unwrap();
        assert!(job.tags.is_empty());

        let null = r#"{"id":1,"title":"a","company":"b","location":"c","job_type":"Contract","posting_date":"2024-01-05T09:30:00Z","tags":null}"#;
        let job: JobRecord = serde_json::from_str(null).unwrap();
        assert!(job.tags.is_empty());
    }

    #[test]
    fn skills_alias_is_accepted() {
        let json = r#"{"id":1,"title":"a","company":"b","location":"c","job_type":"Internship","posting_date":"2024-01-05T09:30:00Z","skills":["go"]}"#;
        let job: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(job.tags, vec!["go"]);
    }

    #[test]
    fn unknown_job_type_is_rejected() {
        let json = r#"{"id":1,"title":"a","company":"b","location":"c","job_type":"Freelance","posting_date":"2024-01-05T09:30:00Z"}"#;
        assert!(serde_json::from_str::<JobRecord>(json).is_err());
        assert!("Freelance".parse::<JobType>().is_err());
        assert_eq!("part-time".parse::<JobType>().unwrap(), JobType::PartTime);
    }

    #[test]
    fn new_job_wire_format_encodes_tags_as_string() {
        let value = serde_json::to_value(valid_job()).unwrap();
        assert_eq!(value["tags"], serde_json::json!("[\"rust\",\"sql\"]"));
        assert_eq!(value["job_type"], serde_json::json!("Full-time"));
        assert_eq!(value["posting_date"], serde_json::json!("2024-01-05T09:30:00+00:00"));
    }

    #[test]
    fn validation_lists_all_missing_fields() {
        let job = NewJob {
            title: "  ".into(),
            company: String::new(),
            ..valid_job()
        };
        let err = job.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields: title, company");
    }

    #[test]
    fn validation_checks_advisory_lengths_and_url() {
        assert!(valid_job().validate().is_ok());

        let short = NewJob {
            description: Some("too short".into()),
            ..valid_job()
        };
        assert!(matches!(short.validate(), Err(JobBoardError::Validation(_))));

        let relative = NewJob {
            url: Some("/jobs/1".into()),
            ..valid_job()
        };
        assert!(relative.validate().is_err());

        let tiny_tag = NewJob {
            tags: vec!["c".into()],
            ..valid_job()
        };
        assert!(tiny_tag.validate().is_err());
    }

    #[test]
    fn normalized_trims_and_drops_empty_optionals() {
        let job = NewJob {
            title: "  Engineer ".into(),
            description: Some("   ".into()),
            url: Some(String::new()),
            tags: vec![" rust ".into(), "".into()],
            ..valid_job()
        }
        .normalized();
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.description, None);
        assert_eq!(job.url, None);
        assert_eq!(job.tags, vec!["rust"]);
    }
}
