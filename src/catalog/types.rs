//! Types for the course catalog
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type CourseId = u32;
pub type LessonId = u32;

// ----- Difficulty -----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("Unknown difficulty: {other}")),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ----- Course Models -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub total_lessons: u32,
    pub rating: f32,
    pub enrollments: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub thumbnail: String,
    pub instructor: String,
}

// ----- Lesson Models -----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub video_url: String,
    #[serde(default)]
    pub resources: Vec<ResourceLink>,
    #[serde(default)]
    pub notes: String,
}

// ----- Category Models -----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub courses_count: usize,
}

// ----- Query Filters -----

/// Raw catalog query as received from a client. Absent fields mean "no
/// restriction"; the literal `all` is accepted for category and difficulty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}
