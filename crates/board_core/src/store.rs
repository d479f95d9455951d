use std::collections::HashMap;

use crate::error::AlreadySubmitted;
use crate::schema::Submission;

/// Session-scoped registry of accepted submissions, keyed by notice id.
///
/// The policy mirrors a physical notice board: you sign up once. At most one
/// submission is accepted per notice per session; notices are independent of
/// each other. The registry lives only as long as the session — persistence
/// belongs to an external collaborator behind the same contract.
#[derive(Debug, Default)]
pub struct SubmissionStore {
    by_notice: HashMap<String, Submission>,
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a submission for its notice. Rejects if the notice already
    /// has one in this session; the store keeps the first.
    pub fn record_submission(&mut self, submission: Submission) -> Result<(), AlreadySubmitted> {
        if self.by_notice.contains_key(&submission.notice_id) {
            return Err(AlreadySubmitted {
                notice_id: submission.notice_id.clone(),
            });
        }
        self.by_notice
            .insert(submission.notice_id.clone(), submission);
        Ok(())
    }

    pub fn has_submitted(&self, notice_id: &str) -> bool {
        self.by_notice.contains_key(notice_id)
    }

    pub fn submission_for(&self, notice_id: &str) -> Option<&Submission> {
        self.by_notice.get(notice_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(notice_id: &str, name: &str) -> Submission {
        Submission {
            id: format!("s-test-{notice_id}"),
            notice_id: notice_id.to_string(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            answers: vec![],
        }
    }

    #[test]
    fn records_and_retrieves_a_submission() {
        let mut store = SubmissionStore::new();
        assert!(!store.has_submitted("n1"));
        store.record_submission(submission("n1", "Ana")).unwrap();
        assert!(store.has_submitted("n1"));
        assert_eq!(store.submission_for("n1").unwrap().name, "Ana");
    }

    #[test]
    fn second_submission_for_same_notice_is_rejected() {
        let mut store = SubmissionStore::new();
        store.record_submission(submission("n1", "Ana")).unwrap();
        let err = store.record_submission(submission("n1", "Ben")).unwrap_err();
        assert_eq!(err.notice_id, "n1");
        // The first submission wins.
        assert_eq!(store.submission_for("n1").unwrap().name, "Ana");
    }

    #[test]
    fn notices_are_independent() {
        let mut store = SubmissionStore::new();
        store.record_submission(submission("n1", "Ana")).unwrap();
        store.record_submission(submission("n2", "Ana")).unwrap();
        assert!(store.has_submitted("n1"));
        assert!(store.has_submitted("n2"));
        assert!(!store.has_submitted("n3"));
        assert!(store.submission_for("n3").is_none());
    }
}
