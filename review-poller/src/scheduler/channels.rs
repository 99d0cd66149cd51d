//! Poller channels
//!
//! The three signals the application tracks for a submitted design review,
//! each a separate instance of the polling engine:
//!
//! - job status: has the backend finished processing the submission
//! - questions generation: has the question list been populated
//! - evaluation: has the scoring run produced a result
//!
//! Job status and questions generation currently read the same endpoint and
//! usually agree, but they run independently and may briefly disagree.
//! Consumers should read the channel that matches what they act on.

use std::sync::Arc;

use review_client::ReviewClient;
use review_core::domain::job::{JobId, PollSnapshot};
use review_core::inference;
use tracing::info;

use super::engine::{PollHandle, PollingEngine};
use super::policy::PollingPolicy;
use crate::repository::{EvaluationProbe, Probe, QuestionsProbe};

/// One tracked signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    JobStatus,
    QuestionsGeneration,
    Evaluation,
}

impl Channel {
    pub const ALL: [Channel; 3] = [
        Channel::JobStatus,
        Channel::QuestionsGeneration,
        Channel::Evaluation,
    ];

    /// Human-readable name; the timeout error reads "<label> timed out"
    pub fn label(&self) -> &'static str {
        match self {
            Channel::JobStatus => "Job status check",
            Channel::QuestionsGeneration => "Questions generation status check",
            Channel::Evaluation => "Evaluation polling",
        }
    }

    /// Short identifier for logs and CLI output
    pub fn key(&self) -> &'static str {
        match self {
            Channel::JobStatus => "job",
            Channel::QuestionsGeneration => "questions",
            Channel::Evaluation => "evaluation",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Engine polling the question list for overall job completion
pub fn job_status_engine(
    client: &ReviewClient,
    policy: PollingPolicy,
) -> PollingEngine<QuestionsProbe> {
    PollingEngine::new(
        Channel::JobStatus.label(),
        Arc::new(QuestionsProbe::new(client.clone())),
        inference::job_status,
        policy,
    )
}

/// Engine polling the question list for generated questions
pub fn questions_engine(
    client: &ReviewClient,
    policy: PollingPolicy,
) -> PollingEngine<QuestionsProbe> {
    PollingEngine::new(
        Channel::QuestionsGeneration.label(),
        Arc::new(QuestionsProbe::new(client.clone())),
        inference::questions_generation,
        policy,
    )
}

/// Engine polling evaluation results
pub fn evaluation_engine(
    client: &ReviewClient,
    policy: PollingPolicy,
) -> PollingEngine<EvaluationProbe> {
    PollingEngine::new(
        Channel::Evaluation.label(),
        Arc::new(EvaluationProbe::new(client.clone())),
        inference::evaluation,
        policy,
    )
}

/// All three pollers for one design review
///
/// Each channel has its own enabled flag; a disabled channel reports the
/// default `Pending` snapshot and issues no requests.
pub struct ReviewWatch {
    target: Option<JobId>,
    job_status: Slot<QuestionsProbe>,
    questions: Slot<QuestionsProbe>,
    evaluation: Slot<EvaluationProbe>,
}

/// An engine with its current run
struct Slot<P: Probe> {
    engine: PollingEngine<P>,
    enabled: bool,
    handle: PollHandle,
}

impl<P> Slot<P>
where
    P: Probe + 'static,
    P::Payload: 'static,
{
    fn new(engine: PollingEngine<P>, target: &Option<JobId>, enabled: bool) -> Self {
        let handle = engine.start(target.clone(), enabled);
        Self {
            engine,
            enabled,
            handle,
        }
    }

    fn restart(&mut self, target: &Option<JobId>) {
        self.handle.stop();
        self.handle = self.engine.start(target.clone(), self.enabled);
    }
}

impl ReviewWatch {
    /// Starts the enabled channels for `target`
    ///
    /// # Arguments
    /// * `client` - Shared API client
    /// * `target` - Design review to track; `None` keeps every channel idle
    /// * `policy` - Cadence and budget applied to every channel
    /// * `enabled` - Channels to run
    pub fn start(
        client: &ReviewClient,
        target: Option<JobId>,
        policy: PollingPolicy,
        enabled: &[Channel],
    ) -> Self {
        if let Some(id) = &target {
            info!(
                "Watching design review {} ({} channel(s))",
                id,
                enabled.len()
            );
        }

        let on = |channel| enabled.contains(&channel);
        Self {
            job_status: Slot::new(
                job_status_engine(client, policy),
                &target,
                on(Channel::JobStatus),
            ),
            questions: Slot::new(
                questions_engine(client, policy),
                &target,
                on(Channel::QuestionsGeneration),
            ),
            evaluation: Slot::new(
                evaluation_engine(client, policy),
                &target,
                on(Channel::Evaluation),
            ),
            target,
        }
    }

    pub fn target(&self) -> Option<&JobId> {
        self.target.as_ref()
    }

    /// Handle of one channel's current run
    pub fn handle(&self, channel: Channel) -> &PollHandle {
        match channel {
            Channel::JobStatus => &self.job_status.handle,
            Channel::QuestionsGeneration => &self.questions.handle,
            Channel::Evaluation => &self.evaluation.handle,
        }
    }

    /// Copy of one channel's current snapshot
    pub fn snapshot(&self, channel: Channel) -> PollSnapshot {
        self.handle(channel).snapshot()
    }

    /// Whether any channel is still polling
    pub fn is_running(&self) -> bool {
        Channel::ALL.iter().any(|c| self.handle(*c).is_running())
    }

    /// Stops every channel
    pub fn stop(&self) {
        for channel in Channel::ALL {
            self.handle(channel).stop();
        }
    }

    /// Enables or disables one channel, restarting it from `Pending`
    pub fn set_enabled(&mut self, channel: Channel, enabled: bool) {
        let target = self.target.clone();
        match channel {
            Channel::JobStatus => {
                self.job_status.enabled = enabled;
                self.job_status.restart(&target);
            }
            Channel::QuestionsGeneration => {
                self.questions.enabled = enabled;
                self.questions.restart(&target);
            }
            Channel::Evaluation => {
                self.evaluation.enabled = enabled;
                self.evaluation.restart(&target);
            }
        }
    }

    /// Manual retry: restarts every enabled channel from `Pending`
    pub fn retry(&mut self) {
        info!("Restarting pollers");
        let target = self.target.clone();
        self.job_status.restart(&target);
        self.questions.restart(&target);
        self.evaluation.restart(&target);
    }

    /// Points the watch at another design review
    ///
    /// A changed identifier restarts every channel with fresh state; the same
    /// identifier leaves running pollers alone.
    pub fn retarget(&mut self, target: Option<JobId>) {
        if self.target == target {
            return;
        }
        self.target = target;
        self.retry();
    }

    /// Waits until every channel has ended and returns the final snapshots
    pub async fn wait_all(&self) -> [(Channel, PollSnapshot); 3] {
        let (job, questions, evaluation) = tokio::join!(
            self.job_status.handle.wait_terminal(),
            self.questions.handle.wait_terminal(),
            self.evaluation.handle.wait_terminal(),
        );
        [
            (Channel::JobStatus, job),
            (Channel::QuestionsGeneration, questions),
            (Channel::Evaluation, evaluation),
        ]
    }
}
