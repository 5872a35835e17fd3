use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

use super::error::ProgressError;
use super::storage::{completion_key, KeyValueStore};
use crate::catalog::{Catalog, CourseId, LessonId};

/// What to do when a stored completion set cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptDataPolicy {
    /// Log a warning and start from an empty set.
    #[default]
    Reset,
    /// Surface [`ProgressError::CorruptRecord`] until the course is reset.
    Error,
}

/// Lesson ids a user has marked complete in one course. Keeps insertion
/// order and never holds the same id twice; encoded as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LessonId>", into = "Vec<LessonId>")]
pub struct CompletionSet {
    lessons: Vec<LessonId>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, lesson_id: LessonId) -> bool {
        self.lessons.contains(&lesson_id)
    }

    /// Flips membership and returns whether the lesson is now complete.
    pub fn toggle(&mut self, lesson_id: LessonId) -> bool {
        if let Some(pos) = self.lessons.iter().position(|id| *id == lesson_id) {
            self.lessons.remove(pos);
            false
        } else {
            self.lessons.push(lesson_id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn as_slice(&self) -> &[LessonId] {
        &self.lessons
    }

    /// Keeps only the ids for which `keep` returns true, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(LessonId) -> bool) {
        self.lessons.retain(|id| keep(*id));
    }
}

impl From<Vec<LessonId>> for CompletionSet {
    fn from(ids: Vec<LessonId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(id) {
                set.lessons.push(id);
            }
        }
        set
    }
}

impl From<CompletionSet> for Vec<LessonId> {
    fn from(set: CompletionSet) -> Self {
        set.lessons
    }
}

/// Rounded percentage of `completed` over `total`, halves rounding up.
/// Zero when there is nothing to complete.
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed * 200 + total) / (total * 2)) as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub course_id: CourseId,
    pub completed_lessons: Vec<LessonId>,
    pub completed_count: usize,
    pub total_lessons: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    pub lesson_id: LessonId,
    pub completed: bool,
    pub progress: ProgressSummary,
}

pub struct ProgressTracker {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<Catalog>,
    on_corrupt: CorruptDataPolicy,
    writes: Mutex<()>,
}

impl ProgressTracker {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<Catalog>,
        on_corrupt: CorruptDataPolicy,
    ) -> Self {
        Self {
            store,
            catalog,
            on_corrupt,
            writes: Mutex::new(()),
        }
    }

    /// Rehydrates the completion set of a course; empty on first visit.
    pub fn load(&self, course_id: CourseId) -> Result<CompletionSet, ProgressError> {
        self.require_course(course_id)?;
        self.read(course_id)
    }

    pub fn summary(&self, course_id: CourseId) -> Result<ProgressSummary, ProgressError> {
        let set = self.load(course_id)?;
        Ok(self.summarize(course_id, set))
    }

    /// Marks the lesson complete if it was not, incomplete if it was, and
    /// writes the whole set back before returning.
    pub fn toggle(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
    ) -> Result<ToggleOutcome, ProgressError> {
        self.require_course(course_id)?;
        if !self
            .catalog
            .lessons(course_id)
            .iter()
            .any(|l| l.id == lesson_id)
        {
            return Err(ProgressError::LessonNotFound {
                course_id,
                lesson_id,
            });
        }

        let _guard = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        let mut set = self.read(course_id)?;
        let completed = set.toggle(lesson_id);
        self.write(course_id, &set)?;

        if completed {
            info!("Lesson {lesson_id} of course {course_id} marked complete");
        } else {
            info!("Lesson {lesson_id} of course {course_id} marked incomplete");
        }

        Ok(ToggleOutcome {
            lesson_id,
            completed,
            progress: self.summarize(course_id, set),
        })
    }

    /// Forgets every completion recorded for the course.
    pub fn reset(&self, course_id: CourseId) -> Result<(), ProgressError> {
        self.require_course(course_id)?;
        let _guard = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        self.store.remove(&completion_key(course_id))?;
        info!("Progress for course {course_id} reset");
        Ok(())
    }

    fn require_course(&self, course_id: CourseId) -> Result<(), ProgressError> {
        match self.catalog.course(course_id) {
            Some(_) => Ok(()),
            None => Err(ProgressError::CourseNotFound(course_id)),
        }
    }

    fn read(&self, course_id: CourseId) -> Result<CompletionSet, ProgressError> {
        let key = completion_key(course_id);
        let Some(raw) = self.store.get(&key)? else {
            debug!("No stored progress under {key}");
            return Ok(CompletionSet::new());
        };

        match serde_json::from_str::<CompletionSet>(&raw) {
            Ok(mut set) => {
                let lessons = self.catalog.lessons(course_id);
                let stored = set.len();
                set.retain(|id| lessons.iter().any(|l| l.id == id));
                if set.len() < stored {
                    warn!(
                        "Ignoring {} stored lesson ids under {key} that are not in course {course_id}",
                        stored - set.len()
                    );
                }
                Ok(set)
            }
            Err(e) => match self.on_corrupt {
                CorruptDataPolicy::Reset => {
                    warn!("Ignoring unreadable progress under {key}: {e}");
                    Ok(CompletionSet::new())
                }
                CorruptDataPolicy::Error => Err(ProgressError::CorruptRecord {
                    key,
                    reason: e.to_string(),
                }),
            },
        }
    }

    fn write(&self, course_id: CourseId, set: &CompletionSet) -> Result<(), ProgressError> {
        let raw = serde_json::to_string(set.as_slice())
            .map_err(|e| ProgressError::Internal(e.to_string()))?;
        self.store.set(&completion_key(course_id), &raw)?;
        Ok(())
    }

    fn summarize(&self, course_id: CourseId, set: CompletionSet) -> ProgressSummary {
        let total_lessons = self.catalog.lesson_count(course_id);
        let completed_count = set.len();
        ProgressSummary {
            course_id,
            completed_lessons: set.into(),
            completed_count,
            total_lessons,
            percentage: completion_percentage(completed_count, total_lessons),
        }
    }
}
