//! Creator panel intake: turns the three creator forms into validated
//! submission drafts ready for the review queue.

use chrono::NaiveDate;

use super::error::ModerationError;
use super::types::{
    CourseRequestForm, CourseSubmissionRequest, LessonSubmissionRequest, SubmissionDraft,
    SubmissionPayload, SubmissionType,
};
use crate::catalog::{Catalog, Difficulty, ResourceLink};

pub struct CreatorIntake<'a> {
    catalog: &'a Catalog,
    default_submitter: &'a str,
    today: NaiveDate,
}

impl<'a> CreatorIntake<'a> {
    pub fn new(catalog: &'a Catalog, default_submitter: &'a str, today: NaiveDate) -> Self {
        Self {
            catalog,
            default_submitter,
            today,
        }
    }

    pub fn course(&self, req: CourseSubmissionRequest) -> Result<SubmissionDraft, ModerationError> {
        let title = required("title", &req.title)?;
        let description = required("description", &req.description)?;
        let duration = required("duration", &req.duration)?;
        let category = self.known_category(&req.category)?;
        let difficulty = required("difficulty", &req.difficulty)?
            .parse::<Difficulty>()
            .map_err(ModerationError::Validation)?;

        Ok(SubmissionDraft {
            title,
            description,
            kind: SubmissionType::Course,
            category,
            difficulty: Some(difficulty),
            submitted_by: self.submitter(req.submitted_by.as_deref()),
            date: self.today,
            payload: Some(SubmissionPayload::Course {
                duration,
                tags: parse_tags(&req.tags),
            }),
        })
    }

    /// Lessons inherit category and difficulty from the course they extend.
    pub fn lesson(&self, req: LessonSubmissionRequest) -> Result<SubmissionDraft, ModerationError> {
        let course_id = req
            .course_id
            .ok_or_else(|| ModerationError::Validation("courseId is required".to_string()))?;
        let course = self.catalog.course(course_id).ok_or_else(|| {
            ModerationError::Validation(format!("Course {course_id} does not exist"))
        })?;
        let title = required("title", &req.title)?;
        let description = required("description", &req.description)?;
        let duration = required("duration", &req.duration)?;
        let video_url = required("videoUrl", &req.video_url)?;
        if !is_web_url(&video_url) {
            return Err(ModerationError::Validation(
                "videoUrl must be an http(s) URL".to_string(),
            ));
        }

        Ok(SubmissionDraft {
            title,
            description,
            kind: SubmissionType::Lesson,
            category: course.category.clone(),
            difficulty: Some(course.difficulty),
            submitted_by: self.submitter(req.submitted_by.as_deref()),
            date: self.today,
            payload: Some(SubmissionPayload::Lesson {
                course_id,
                duration,
                video_url,
                resources: parse_resources(&req.resources),
                notes: req.notes.trim().to_string(),
            }),
        })
    }

    pub fn request(&self, req: CourseRequestForm) -> Result<SubmissionDraft, ModerationError> {
        let title = required("title", &req.title)?;
        let description = required("description", &req.description)?;
        let category = self.known_category(&req.category)?;

        Ok(SubmissionDraft {
            title,
            description,
            kind: SubmissionType::Request,
            category,
            difficulty: None,
            submitted_by: self.submitter(req.submitted_by.as_deref()),
            date: self.today,
            payload: None,
        })
    }

    fn known_category(&self, raw: &str) -> Result<String, ModerationError> {
        let category = required("category", raw)?;
        match self.catalog.category(&category) {
            Some(c) => Ok(c.id.clone()),
            None => Err(ModerationError::Validation(format!(
                "Unknown category: {category}"
            ))),
        }
    }

    fn submitter(&self, name: Option<&str>) -> String {
        name.map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(self.default_submitter)
            .to_string()
    }
}

fn required(field: &str, value: &str) -> Result<String, ModerationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModerationError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn is_web_url(value: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.to_ascii_lowercase().starts_with(scheme))
}

pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `Label: url` lines. A line without a label uses the url as its
/// title. Blank lines are skipped.
pub fn parse_resources(raw: &str) -> Vec<ResourceLink> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(": ") {
            Some((title, url)) if !title.trim().is_empty() && !url.trim().is_empty() => {
                ResourceLink {
                    title: title.trim().to_string(),
                    url: url.trim().to_string(),
                }
            }
            _ => ResourceLink {
                title: line.to_string(),
                url: line.to_string(),
            },
        })
        .collect()
}
