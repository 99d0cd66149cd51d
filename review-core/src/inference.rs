//! Status inference rules
//!
//! Each rule is a pure function from a [`RawProbeResult`] to an
//! [`Inference`]. Rules never look at previous results; retry accounting and
//! termination belong to the polling engine.

use crate::domain::evaluation::Evaluation;
use crate::domain::job::{JobState, PollSnapshot, RawProbeResult};
use crate::domain::question::ProbingQuestion;
use crate::score::normalize;

pub const PROGRESS_PENDING: u8 = 0;
pub const PROGRESS_PROCESSING: u8 = 50;
pub const PROGRESS_DONE: u8 = 100;

/// Signature shared by all inference rules
pub type InferenceRule<T> = fn(RawProbeResult<T>) -> Inference;

/// A state observed from a successful or not-found probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub state: JobState,
    pub progress: u8,
    pub message: String,
    pub aux_count: Option<usize>,
}

impl Observation {
    fn new(state: JobState, progress: u8, message: impl Into<String>) -> Self {
        Self {
            state,
            progress,
            message: message.into(),
            aux_count: None,
        }
    }
}

/// What a rule concluded from one probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inference {
    /// The remote state could be read
    Observed(Observation),
    /// Probe failed in a way worth retrying; counts against the budget
    Transient(String),
    /// The remote side reported the job as failed
    HardFailure(String),
}

impl PollSnapshot {
    /// Overwrite the snapshot with an observation and clear any error
    pub fn apply_observation(&mut self, observation: Observation) {
        self.state = observation.state;
        self.progress = observation.progress;
        self.message = observation.message;
        self.aux_count = observation.aux_count;
        self.error = None;
    }

    /// Record a transient probe failure without touching the state
    pub fn record_transient(&mut self, error: String) {
        self.error = Some(error);
    }

    /// Move to `Failed` with the remote-reported reason
    pub fn apply_hard_failure(&mut self, error: String) {
        self.state = JobState::Failed;
        self.message = error.clone();
        self.error = Some(error);
    }
}

fn infer_from_questions(raw: RawProbeResult<Vec<ProbingQuestion>>) -> Inference {
    match raw {
        RawProbeResult::NotFound => Inference::Observed(Observation::new(
            JobState::Pending,
            PROGRESS_PENDING,
            "Submission received, waiting for processing...",
        )),
        RawProbeResult::Ok(questions) if questions.is_empty() => Inference::Observed(
            Observation::new(JobState::Processing, PROGRESS_PROCESSING, "Generating questions..."),
        ),
        RawProbeResult::Ok(questions) => {
            let count = questions.len();
            Inference::Observed(Observation {
                aux_count: Some(count),
                ..Observation::new(
                    JobState::Completed,
                    PROGRESS_DONE,
                    format!("{count} questions generated successfully"),
                )
            })
        }
        RawProbeResult::TransportError(message) => Inference::Transient(message),
    }
}

/// Questions-generation rule: the question list being populated means done
pub fn questions_generation(raw: RawProbeResult<Vec<ProbingQuestion>>) -> Inference {
    infer_from_questions(raw)
}

/// Overall job rule
///
/// Reads the same signal as [`questions_generation`] today but is kept as its
/// own channel so the two can diverge when the API does.
pub fn job_status(raw: RawProbeResult<Vec<ProbingQuestion>>) -> Inference {
    infer_from_questions(raw)
}

/// Evaluation rule: completion marker or overall score means done
pub fn evaluation(raw: RawProbeResult<Evaluation>) -> Inference {
    match raw {
        RawProbeResult::NotFound => Inference::Observed(Observation::new(
            JobState::Pending,
            PROGRESS_PENDING,
            "Evaluation not available yet",
        )),
        RawProbeResult::Ok(eval) if eval.is_failed() => {
            let reason = eval
                .feedback_summary
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Evaluation failed".to_string());
            Inference::HardFailure(reason)
        }
        RawProbeResult::Ok(eval) if eval.is_complete() => {
            let message = match eval.overallscore {
                Some(raw) => format!("Evaluation completed: overall {:.1}/5", normalize(Some(raw))),
                None => "Evaluation completed".to_string(),
            };
            Inference::Observed(Observation::new(JobState::Completed, PROGRESS_DONE, message))
        }
        RawProbeResult::Ok(_) => Inference::Observed(Observation::new(
            JobState::Processing,
            PROGRESS_PROCESSING,
            "Evaluating submission...",
        )),
        RawProbeResult::TransportError(message) => Inference::Transient(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> ProbingQuestion {
        ProbingQuestion {
            id: None,
            question: text.to_string(),
            answer: None,
            difficulty: 1,
            created_on: None,
            updated_on: None,
        }
    }

    fn observed(inference: Inference) -> Observation {
        match inference {
            Inference::Observed(observation) => observation,
            other => panic!("expected observation, got {:?}", other),
        }
    }

    #[test]
    fn test_questions_not_found_is_pending() {
        let obs = observed(questions_generation(RawProbeResult::NotFound));
        assert_eq!(obs.state, JobState::Pending);
        assert_eq!(obs.progress, 0);
        assert!(obs.message.contains("waiting for processing"));
    }

    #[test]
    fn test_questions_empty_list_is_processing() {
        let obs = observed(questions_generation(RawProbeResult::Ok(vec![])));
        assert_eq!(obs.state, JobState::Processing);
        assert_eq!(obs.progress, 50);
        assert_eq!(obs.aux_count, None);
    }

    #[test]
    fn test_questions_non_empty_list_completes_with_count() {
        let raw = RawProbeResult::Ok(vec![question("a"), question("b"), question("c")]);
        let obs = observed(questions_generation(raw));
        assert_eq!(obs.state, JobState::Completed);
        assert_eq!(obs.progress, 100);
        assert_eq!(obs.aux_count, Some(3));
        assert!(obs.message.contains('3'));
    }

    #[test]
    fn test_transport_error_is_transient() {
        let inference = job_status(RawProbeResult::TransportError("HTTP 502".to_string()));
        assert_eq!(inference, Inference::Transient("HTTP 502".to_string()));
    }

    #[test]
    fn test_job_status_matches_questions_rule() {
        let raw = RawProbeResult::Ok(vec![question("a")]);
        assert_eq!(job_status(raw.clone()), questions_generation(raw));
    }

    #[test]
    fn test_evaluation_pending_and_processing() {
        let obs = observed(evaluation(RawProbeResult::NotFound));
        assert_eq!(obs.state, JobState::Pending);

        let partial = Evaluation {
            status: Some("Pending".to_string()),
            ..Default::default()
        };
        let obs = observed(evaluation(RawProbeResult::Ok(partial)));
        assert_eq!(obs.state, JobState::Processing);
    }

    #[test]
    fn test_evaluation_completed_by_score() {
        let eval = Evaluation {
            overallscore: Some(8.0),
            ..Default::default()
        };
        let obs = observed(evaluation(RawProbeResult::Ok(eval)));
        assert_eq!(obs.state, JobState::Completed);
        assert_eq!(obs.message, "Evaluation completed: overall 4.0/5");
    }

    #[test]
    fn test_evaluation_completed_by_marker() {
        let eval = Evaluation {
            status: Some("completed".to_string()),
            ..Default::default()
        };
        let obs = observed(evaluation(RawProbeResult::Ok(eval)));
        assert_eq!(obs.state, JobState::Completed);
        assert_eq!(obs.progress, 100);
    }

    #[test]
    fn test_evaluation_failed_marker_is_hard_failure() {
        let eval = Evaluation {
            status: Some("Failed".to_string()),
            ..Default::default()
        };
        assert_eq!(
            evaluation(RawProbeResult::Ok(eval)),
            Inference::HardFailure("Evaluation failed".to_string())
        );
    }

    #[test]
    fn test_snapshot_transient_keeps_state() {
        let mut snapshot = PollSnapshot::default();
        snapshot.apply_observation(Observation::new(JobState::Processing, 50, "working"));
        snapshot.record_transient("HTTP 500".to_string());
        assert_eq!(snapshot.state, JobState::Processing);
        assert_eq!(snapshot.message, "working");
        assert_eq!(snapshot.error.as_deref(), Some("HTTP 500"));

        snapshot.apply_observation(Observation::new(JobState::Processing, 50, "still working"));
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_snapshot_hard_failure_is_terminal() {
        let mut snapshot = PollSnapshot::default();
        snapshot.apply_hard_failure("scoring crashed".to_string());
        assert_eq!(snapshot.state, JobState::Failed);
        assert!(snapshot.is_terminal());
        assert_eq!(snapshot.error.as_deref(), Some("scoring crashed"));
    }
}
