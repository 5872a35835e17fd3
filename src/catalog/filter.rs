//! Search and filter evaluation over the course list.
//!
//! A course is visible when all three predicates hold: the search text is a
//! case-insensitive substring of its title or description, its category is
//! the selected one (or the selection is `all`), and likewise for difficulty.
//! Source order is kept; there is no ranking or pagination.

use super::error::CatalogError;
use super::types::{Course, CourseFilters, Difficulty};

pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    search: String,
    category: Selection<String>,
    difficulty: Selection<Difficulty>,
}

impl CourseQuery {
    pub fn new(
        search: impl Into<String>,
        category: Selection<String>,
        difficulty: Selection<Difficulty>,
    ) -> Self {
        Self {
            search: search.into().to_lowercase(),
            category,
            difficulty,
        }
    }

    /// Lowercased search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &Selection<String> {
        &self.category
    }

    pub fn difficulty(&self) -> &Selection<Difficulty> {
        &self.difficulty
    }

    pub fn matches(&self, course: &Course) -> bool {
        self.matches_search(course)
            && self.category.admits(&course.category)
            && self.difficulty.admits(&course.difficulty)
    }

    fn matches_search(&self, course: &Course) -> bool {
        if self.search.is_empty() {
            return true;
        }
        course.title.to_lowercase().contains(&self.search)
            || course.description.to_lowercase().contains(&self.search)
    }
}

impl TryFrom<CourseFilters> for CourseQuery {
    type Error = CatalogError;

    fn try_from(filters: CourseFilters) -> Result<Self, Self::Error> {
        let category = match filters.category.as_deref().map(str::trim) {
            None | Some("") => Selection::All,
            Some(c) if c.eq_ignore_ascii_case(ALL) => Selection::All,
            Some(c) => Selection::Only(c.to_string()),
        };

        let difficulty = match filters.difficulty.as_deref().map(str::trim) {
            None | Some("") => Selection::All,
            Some(d) if d.eq_ignore_ascii_case(ALL) => Selection::All,
            Some(d) => Selection::Only(d.parse::<Difficulty>().map_err(CatalogError::Validation)?),
        };

        Ok(Self::new(filters.search.unwrap_or_default(), category, difficulty))
    }
}

pub fn filter_courses<'a>(courses: &'a [Course], query: &CourseQuery) -> Vec<&'a Course> {
    courses.iter().filter(|c| query.matches(c)).collect()
}
