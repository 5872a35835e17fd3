//! Types for content submissions and their review
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::{CourseId, Difficulty, ResourceLink};

pub type SubmissionId = u32;

// ----- Status -----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("Unknown submission status: {other}")),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Course,
    Lesson,
    Request,
}

// ----- Submission Models -----

/// Extra material carried by creator submissions; seed records have none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SubmissionPayload {
    #[serde(rename_all = "camelCase")]
    Course { duration: String, tags: Vec<String> },
    #[serde(rename_all = "camelCase")]
    Lesson {
        course_id: CourseId,
        duration: String,
        video_url: String,
        resources: Vec<ResourceLink>,
        notes: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SubmissionType,
    pub category: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub submitted_by: String,
    pub date: NaiveDate,
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<SubmissionPayload>,
}

/// A validated submission that has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDraft {
    pub title: String,
    pub description: String,
    pub kind: SubmissionType,
    pub category: String,
    pub difficulty: Option<Difficulty>,
    pub submitted_by: String,
    pub date: NaiveDate,
    pub payload: Option<SubmissionPayload>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationStats {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionFilters {
    pub status: Option<String>,
}

// ----- Creator Forms -----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseSubmissionRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub duration: String,
    /// Comma separated, e.g. `React, Hooks, Context API`.
    pub tags: String,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LessonSubmissionRequest {
    pub course_id: Option<CourseId>,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub video_url: String,
    /// One resource per line, `Label: url` or a bare url.
    pub resources: String,
    pub notes: String,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseRequestForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub submitted_by: Option<String>,
}
