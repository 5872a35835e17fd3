//! Seed data: the read-only catalog of categories, courses and lessons plus
//! the initial moderation queue, loaded once at startup.

use log::{debug, warn};
use rust_embed::Embed;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::error::CatalogError;
use super::filter::{filter_courses, CourseQuery};
use super::types::{Category, CategorySummary, Course, CourseId, Lesson};
use crate::moderation::Submission;

pub const SEED_FILE: &str = "catalog.json";

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedSeed;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl SeedDocument {
    /// Reads the seed from `path` when given, otherwise from the copy
    /// compiled into the binary.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => {
                debug!("Loading catalog seed from {}", path.display());
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    CatalogError::Seed(format!("failed to read {}: {e}", path.display()))
                })?;
                Self::from_json(&raw)
            }
            None => {
                let file = EmbeddedSeed::get(SEED_FILE)
                    .ok_or_else(|| CatalogError::Seed(format!("embedded {SEED_FILE} missing")))?;
                let raw = std::str::from_utf8(&file.data)
                    .map_err(|e| CatalogError::Seed(format!("embedded seed is not UTF-8: {e}")))?;
                Self::from_json(raw)
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw).map_err(|e| CatalogError::Seed(e.to_string()))
    }

    /// Splits the seed into the catalog and the initial review queue.
    /// Submission ids must be unique and leave room for new submissions.
    pub fn into_parts(self) -> Result<(Catalog, Vec<Submission>), CatalogError> {
        let mut submission_ids = HashSet::new();
        for submission in &self.submissions {
            if submission.id == u32::MAX {
                return Err(CatalogError::Seed(format!(
                    "submission id {} leaves no room for new submissions",
                    submission.id
                )));
            }
            if !submission_ids.insert(submission.id) {
                return Err(CatalogError::Seed(format!(
                    "duplicate submission id {}",
                    submission.id
                )));
            }
        }
        let catalog = Catalog::new(self.categories, self.courses, self.lessons)?;
        Ok((catalog, self.submissions))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    courses: Vec<Course>,
    lessons: HashMap<CourseId, Vec<Lesson>>,
}

impl Catalog {
    /// Builds the catalog, rejecting duplicate course or lesson ids. Lessons
    /// that point at an unknown course are dropped with a warning.
    pub fn new(
        categories: Vec<Category>,
        courses: Vec<Course>,
        lessons: Vec<Lesson>,
    ) -> Result<Self, CatalogError> {
        let mut course_ids = HashSet::new();
        for course in &courses {
            if !course_ids.insert(course.id) {
                return Err(CatalogError::Seed(format!("duplicate course id {}", course.id)));
            }
            if !categories.iter().any(|c| c.id == course.category) {
                warn!(
                    "Course {} references unknown category '{}'",
                    course.id, course.category
                );
            }
        }

        let mut lesson_ids = HashSet::new();
        let mut by_course: HashMap<CourseId, Vec<Lesson>> = HashMap::new();
        for lesson in lessons {
            if !lesson_ids.insert(lesson.id) {
                return Err(CatalogError::Seed(format!("duplicate lesson id {}", lesson.id)));
            }
            if !course_ids.contains(&lesson.course_id) {
                warn!(
                    "Dropping lesson {} for unknown course {}",
                    lesson.id, lesson.course_id
                );
                continue;
            }
            by_course.entry(lesson.course_id).or_default().push(lesson);
        }

        Ok(Self {
            categories,
            courses,
            lessons: by_course,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, course_id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    /// Lessons of a course in seed order; empty for unknown courses.
    pub fn lessons(&self, course_id: CourseId) -> &[Lesson] {
        self.lessons
            .get(&course_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn lesson_count(&self, course_id: CourseId) -> usize {
        self.lessons(course_id).len()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|category| CategorySummary {
                id: category.id.clone(),
                name: category.name.clone(),
                icon: category.icon.clone(),
                courses_count: self
                    .courses
                    .iter()
                    .filter(|c| c.category == category.id)
                    .count(),
            })
            .collect()
    }

    pub fn search(&self, query: &CourseQuery) -> Vec<&Course> {
        filter_courses(&self.courses, query)
    }
}
