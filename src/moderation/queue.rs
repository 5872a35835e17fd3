use log::info;

use super::error::ModerationError;
use super::types::{ModerationStats, Submission, SubmissionDraft, SubmissionId, SubmissionStatus};

/// In-memory review queue. Starts from the seed submissions and is lost on
/// restart.
#[derive(Debug, Clone, Default)]
pub struct ModerationQueue {
    submissions: Vec<Submission>,
    /// `None` once every id has been handed out.
    next_id: Option<SubmissionId>,
}

impl ModerationQueue {
    pub fn new(seed: Vec<Submission>) -> Self {
        let next_id = match seed.iter().map(|s| s.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self {
            submissions: seed,
            next_id,
        }
    }

    /// Submissions in queue order, optionally restricted to one status.
    pub fn list(&self, status: Option<SubmissionStatus>) -> Vec<&Submission> {
        self.submissions
            .iter()
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .collect()
    }

    pub fn get(&self, id: SubmissionId) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == id)
    }

    pub fn approve(&mut self, id: SubmissionId) -> Result<&Submission, ModerationError> {
        self.set_status(id, SubmissionStatus::Approved)
    }

    pub fn reject(&mut self, id: SubmissionId) -> Result<&Submission, ModerationError> {
        self.set_status(id, SubmissionStatus::Rejected)
    }

    /// Overwrites the status unconditionally; the last decision wins.
    fn set_status(
        &mut self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<&Submission, ModerationError> {
        let submission = self
            .submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ModerationError::NotFound(id))?;
        let previous = submission.status;
        submission.status = status;
        info!("Submission {id} '{}' {previous} -> {status}", submission.title);
        Ok(&*submission)
    }

    pub fn submit(&mut self, draft: SubmissionDraft) -> Result<&Submission, ModerationError> {
        let id = self.next_id.ok_or(ModerationError::QueueFull)?;
        self.next_id = id.checked_add(1);
        info!("New {:?} submission {id} '{}' from {}", draft.kind, draft.title, draft.submitted_by);
        self.submissions.push(Submission {
            id,
            title: draft.title,
            description: draft.description,
            kind: draft.kind,
            category: draft.category,
            difficulty: draft.difficulty,
            submitted_by: draft.submitted_by,
            date: draft.date,
            status: SubmissionStatus::Pending,
            payload: draft.payload,
        });
        Ok(&self.submissions[self.submissions.len() - 1])
    }

    pub fn stats(&self) -> ModerationStats {
        self.submissions
            .iter()
            .fold(ModerationStats::default(), |mut stats, s| {
                match s.status {
                    SubmissionStatus::Pending => stats.pending += 1,
                    SubmissionStatus::Approved => stats.approved += 1,
                    SubmissionStatus::Rejected => stats.rejected += 1,
                }
                stats
            })
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeedDocument;
    use crate::moderation::types::SubmissionType;
    use chrono::NaiveDate;

    fn seeded() -> ModerationQueue {
        let seed = SeedDocument::load(None).expect("embedded seed should load");
        ModerationQueue::new(seed.submissions)
    }

    fn draft(title: &str) -> SubmissionDraft {
        SubmissionDraft {
            title: title.to_string(),
            description: "d".to_string(),
            kind: SubmissionType::Request,
            category: "dsa".to_string(),
            difficulty: None,
            submitted_by: "Tester".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"),
            payload: None,
        }
    }

    #[test]
    fn test_seed_stats() {
        let queue = seeded();
        assert_eq!(
            queue.stats(),
            ModerationStats {
                pending: 2,
                approved: 1,
                rejected: 1
            }
        );
    }

    #[test]
    fn test_approve_then_reject_is_rejected() {
        let mut queue = seeded();
        queue.approve(1).expect("approve");
        let submission = queue.reject(1).expect("reject");
        assert_eq!(submission.status, SubmissionStatus::Rejected);
        assert_eq!(queue.get(1).map(|s| s.status), Some(SubmissionStatus::Rejected));
    }

    #[test]
    fn test_approve_is_idempotent() {
        let mut queue = seeded();
        queue.approve(2).expect("approve");
        let before = queue.clone();
        queue.approve(2).expect("approve again");
        assert_eq!(queue.list(None), before.list(None));
    }

    #[test]
    fn test_only_the_matching_record_changes() {
        let mut queue = seeded();
        queue.reject(2).expect("reject");
        assert_eq!(queue.get(1).map(|s| s.status), Some(SubmissionStatus::Pending));
        assert_eq!(queue.get(3).map(|s| s.status), Some(SubmissionStatus::Approved));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut queue = seeded();
        assert!(matches!(queue.approve(99), Err(ModerationError::NotFound(99))));
        assert!(matches!(queue.reject(99), Err(ModerationError::NotFound(99))));
    }

    #[test]
    fn test_list_by_status_keeps_order() {
        let mut queue = seeded();
        queue.submit(draft("first")).expect("submit");
        queue.submit(draft("second")).expect("submit");
        let pending: Vec<u32> = queue
            .list(Some(SubmissionStatus::Pending))
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(pending, vec![1, 2, 5, 6]);
    }

    #[test]
    fn test_submit_assigns_fresh_ids_as_pending() {
        let mut queue = seeded();
        let id = queue.submit(draft("new")).expect("submit").id;
        assert_eq!(id, 5);
        assert_eq!(queue.get(5).map(|s| s.status), Some(SubmissionStatus::Pending));
        assert_eq!(queue.len(), 5);

        let mut empty = ModerationQueue::new(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.submit(draft("only")).expect("submit").id, 1);
    }

    #[test]
    fn test_submit_stops_at_the_last_id() {
        let mut seed = seeded().list(None).into_iter().cloned().collect::<Vec<_>>();
        seed[0].id = SubmissionId::MAX - 1;
        let mut queue = ModerationQueue::new(seed);

        let last = queue.submit(draft("last")).expect("submit");
        assert_eq!(last.id, SubmissionId::MAX);
        assert!(matches!(
            queue.submit(draft("overflow")),
            Err(ModerationError::QueueFull)
        ));
        assert_eq!(queue.len(), 5);
    }
}
