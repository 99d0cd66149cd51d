//! Polling engine
//!
//! Runs one probe at a time for one target: probe, infer, publish, wait,
//! repeat. The next probe is scheduled `interval` after the previous one
//! finished, so probes never overlap however slow the remote side is.
//!
//! A run ends when:
//! - the inferred state is terminal (`Completed` or `Failed`)
//! - `max_attempts` non-terminal attempts have been made; the snapshot then
//!   carries `"<name> timed out"` in `error` and keeps its last state
//! - the caller stops the handle (or drops it)
//!
//! After a stop no probe is started and the result of a probe that was
//! already in flight is thrown away.

use std::sync::{Arc, Mutex, PoisonError};

use review_core::domain::job::{JobId, PollSnapshot};
use review_core::inference::{Inference, InferenceRule};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use super::policy::PollingPolicy;
use crate::repository::Probe;

/// A probe, an inference rule and a policy wired together
///
/// The engine itself holds no run state; every [`PollingEngine::start`]
/// begins a fresh, independent run.
pub struct PollingEngine<P: Probe> {
    name: String,
    probe: Arc<P>,
    rule: InferenceRule<P::Payload>,
    policy: PollingPolicy,
}

impl<P> PollingEngine<P>
where
    P: Probe + 'static,
    P::Payload: 'static,
{
    /// Creates a new engine
    ///
    /// # Arguments
    /// * `name` - Channel name, used in logs and in the timeout message
    /// * `probe` - The remote query to run on every tick
    /// * `rule` - Pure mapping from raw probe result to job state
    /// * `policy` - Interval and attempt budget
    pub fn new(
        name: impl Into<String>,
        probe: Arc<P>,
        rule: InferenceRule<P::Payload>,
        policy: PollingPolicy,
    ) -> Self {
        Self {
            name: name.into(),
            probe,
            rule,
            policy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> PollingPolicy {
        self.policy
    }

    /// Starts polling `target`
    ///
    /// When `enabled` is false or the target is absent or blank, nothing is
    /// spawned and the handle reports the default `Pending` snapshot forever.
    /// Otherwise the first probe runs immediately on a new tokio task, so this
    /// must be called from within a runtime.
    pub fn start(&self, target: Option<JobId>, enabled: bool) -> PollHandle {
        let run_id = Uuid::new_v4();
        let (snapshot_tx, snapshot_rx) = watch::channel(PollSnapshot::default());

        let target = match target {
            Some(target) if enabled && !target.is_blank() => target,
            _ => {
                debug!("{} poller idle: disabled or no target", self.name);
                return PollHandle::idle(run_id, self.name.clone(), snapshot_rx);
            }
        };

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let shared = Arc::new(Shared {
            publisher: Mutex::new(Some(snapshot_tx)),
            cancel: cancel_tx,
        });

        let span = info_span!(
            "poller",
            channel = %self.name,
            target = %target,
            run_id = %run_id
        );
        let run = Run {
            name: self.name.clone(),
            probe: Arc::clone(&self.probe),
            rule: self.rule,
            policy: self.policy,
            target,
            shared: Arc::clone(&shared),
            cancelled: cancel_rx,
        };
        let task = tokio::spawn(run.execute().instrument(span));

        PollHandle {
            run_id,
            name: self.name.clone(),
            snapshot: snapshot_rx,
            shared: Some(shared),
            task: Some(task),
        }
    }
}

/// Control surface and read-only view of one running poller
///
/// Dropping the handle stops the poller.
pub struct PollHandle {
    run_id: Uuid,
    name: String,
    snapshot: watch::Receiver<PollSnapshot>,
    shared: Option<Arc<Shared>>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    fn idle(run_id: Uuid, name: String, snapshot: watch::Receiver<PollSnapshot>) -> Self {
        Self {
            run_id,
            name,
            snapshot,
            shared: None,
            task: None,
        }
    }

    /// Identifier of this run, also attached to its tracing span
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> PollSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified on every published snapshot
    ///
    /// `changed()` fails once the run has ended.
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.snapshot.clone()
    }

    /// Whether the run can still publish snapshots
    pub fn is_running(&self) -> bool {
        self.shared.as_ref().is_some_and(|shared| shared.is_open())
    }

    /// Stops the poller
    ///
    /// Idempotent and safe after the run ended on its own. No probe starts
    /// after this returns and an in-flight result is never published.
    pub fn stop(&self) {
        if let Some(shared) = &self.shared {
            if shared.close() {
                info!(channel = %self.name, run_id = %self.run_id, "Poller stopped");
            }
            shared.cancel.send_replace(true);
        }
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Waits until the run has ended and returns the final snapshot
    ///
    /// Returns immediately for idle or already finished handles.
    pub async fn wait_terminal(&self) -> PollSnapshot {
        let mut rx = self.snapshot.clone();
        while rx.changed().await.is_ok() {}
        let snapshot = rx.borrow().clone();
        snapshot
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State shared between a handle and its task
struct Shared {
    /// `None` once the run is over; publishing is impossible afterwards
    publisher: Mutex<Option<watch::Sender<PollSnapshot>>>,
    cancel: watch::Sender<bool>,
}

impl Shared {
    /// Publishes a snapshot unless the run has been closed
    fn publish(&self, snapshot: PollSnapshot) -> bool {
        let guard = self
            .publisher
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(tx) => {
                tx.send_replace(snapshot);
                true
            }
            None => false,
        }
    }

    /// Closes the snapshot channel; returns whether it was still open
    fn close(&self) -> bool {
        self.publisher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    fn is_open(&self) -> bool {
        self.publisher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Finished,
}

/// Snapshot plus retry accounting for one run
struct RunState {
    snapshot: PollSnapshot,
    retry_count: u32,
    max_attempts: u32,
}

impl RunState {
    fn new(max_attempts: u32) -> Self {
        Self {
            snapshot: PollSnapshot::default(),
            retry_count: 0,
            max_attempts,
        }
    }

    /// Folds one inference into the snapshot
    fn apply(&mut self, name: &str, inference: Inference) -> Step {
        let previous = self.snapshot.state;

        match inference {
            Inference::Observed(observation) => self.snapshot.apply_observation(observation),
            Inference::Transient(error) => {
                warn!(
                    "{} probe failed (attempt {}/{}): {}",
                    name,
                    self.retry_count + 1,
                    self.max_attempts,
                    error
                );
                self.snapshot.record_transient(error);
            }
            Inference::HardFailure(error) => {
                warn!("{} reported failure: {}", name, error);
                self.snapshot.apply_hard_failure(error);
            }
        }

        if self.snapshot.state != previous {
            info!("{}: {} -> {}", name, previous, self.snapshot.state);
        }

        if self.snapshot.is_terminal() {
            return Step::Finished;
        }

        self.retry_count += 1;
        if self.retry_count >= self.max_attempts {
            warn!("{} gave up after {} attempt(s)", name, self.retry_count);
            self.snapshot.error = Some(format!("{} timed out", name));
            return Step::Finished;
        }

        Step::Continue
    }
}

/// Everything a spawned run owns
struct Run<P: Probe> {
    name: String,
    probe: Arc<P>,
    rule: InferenceRule<P::Payload>,
    policy: PollingPolicy,
    target: JobId,
    shared: Arc<Shared>,
    cancelled: watch::Receiver<bool>,
}

impl<P: Probe> Run<P> {
    async fn execute(self) {
        let Run {
            name,
            probe,
            rule,
            policy,
            target,
            shared,
            mut cancelled,
        } = self;

        debug!(
            "Polling {} (interval: {:?}, max attempts: {})",
            target, policy.interval, policy.max_attempts
        );

        let mut state = RunState::new(policy.max_attempts);

        loop {
            let raw = tokio::select! {
                biased;
                _ = cancelled.changed() => return,
                raw = probe.probe(&target) => raw,
            };

            let step = state.apply(&name, rule(raw));

            if !shared.publish(state.snapshot.clone()) {
                debug!("{} stopped while a probe was in flight; result discarded", name);
                return;
            }

            if step == Step::Finished {
                shared.close();
                debug!("{} finished in state {}", name, state.snapshot.state);
                return;
            }

            tokio::select! {
                biased;
                _ = cancelled.changed() => return,
                _ = tokio::time::sleep(policy.interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use review_core::domain::evaluation::Evaluation;
    use review_core::domain::job::{JobState, RawProbeResult};
    use review_core::domain::question::ProbingQuestion;
    use review_core::inference;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    /// Probe replaying a script, then repeating a fallback forever
    struct ScriptedProbe<T> {
        script: Mutex<VecDeque<RawProbeResult<T>>>,
        fallback: RawProbeResult<T>,
        latency: Duration,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        started: Mutex<Vec<Instant>>,
    }

    impl<T: Clone> ScriptedProbe<T> {
        fn new(script: Vec<RawProbeResult<T>>, fallback: RawProbeResult<T>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback,
                latency: Duration::ZERO,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                started: Mutex::new(Vec::new()),
            }
        }

        fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<T: Clone + Send + Sync + 'static> Probe for ScriptedProbe<T> {
        type Payload = T;

        async fn probe(&self, _target: &JobId) -> RawProbeResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.lock().unwrap().push(Instant::now());
            let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(|| self.fallback.clone())
        }
    }

    type QuestionsScript = ScriptedProbe<Vec<ProbingQuestion>>;

    fn questions(n: usize) -> Vec<ProbingQuestion> {
        (0..n)
            .map(|i| ProbingQuestion {
                id: Some(i as u64),
                question: format!("question {}", i),
                answer: None,
                difficulty: 2,
                created_on: None,
                updated_on: None,
            })
            .collect()
    }

    fn policy(max_attempts: u32) -> PollingPolicy {
        PollingPolicy::new(Duration::from_secs(5), max_attempts)
    }

    fn questions_engine(
        probe: &Arc<QuestionsScript>,
        max_attempts: u32,
    ) -> PollingEngine<QuestionsScript> {
        PollingEngine::new(
            "questions",
            Arc::clone(probe),
            inference::questions_generation,
            policy(max_attempts),
        )
    }

    async fn collect(mut rx: watch::Receiver<PollSnapshot>) -> Vec<PollSnapshot> {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            seen.push(rx.borrow_and_update().clone());
        }
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_forever_times_out_without_state_change() {
        let probe = Arc::new(ScriptedProbe::new(vec![], RawProbeResult::NotFound));
        let handle = questions_engine(&probe, 4).start(Some(JobId::from(7)), true);

        let last = handle.wait_terminal().await;

        assert_eq!(probe.calls(), 4);
        assert_eq!(last.state, JobState::Pending);
        assert_eq!(last.error.as_deref(), Some("questions timed out"));
        assert!(!handle.is_running());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(probe.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_keeps_processing_state() {
        let probe = Arc::new(ScriptedProbe::new(vec![], RawProbeResult::Ok(vec![])));
        let handle = questions_engine(&probe, 3).start(Some(JobId::from(7)), true);

        let last = handle.wait_terminal().await;
        assert_eq!(last.state, JobState::Processing);
        assert_eq!(last.progress, 50);
        assert!(last.error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_probe_with_questions_completes_immediately() {
        let probe = Arc::new(ScriptedProbe::new(vec![], RawProbeResult::Ok(questions(4))));
        let handle = questions_engine(&probe, 60).start(Some(JobId::from(7)), true);

        let last = handle.wait_terminal().await;
        assert_eq!(last.state, JobState::Completed);
        assert_eq!(last.aux_count, Some(4));
        assert_eq!(last.progress, 100);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_twice_then_questions() {
        let probe = Arc::new(ScriptedProbe::new(
            vec![
                RawProbeResult::NotFound,
                RawProbeResult::NotFound,
                RawProbeResult::Ok(questions(3)),
            ],
            RawProbeResult::NotFound,
        ));
        let handle = questions_engine(&probe, 3).start(Some(JobId::from(1)), true);

        let seen = collect(handle.subscribe()).await;
        let states: Vec<JobState> = seen.iter().map(|s| s.state).collect();

        assert_eq!(
            states,
            vec![JobState::Pending, JobState::Pending, JobState::Completed]
        );
        assert_eq!(seen[2].aux_count, Some(3));
        assert!(seen[2].error.is_none());
        assert_eq!(probe.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_keeps_state_and_recovers() {
        let probe = Arc::new(ScriptedProbe::new(
            vec![
                RawProbeResult::Ok(vec![]),
                RawProbeResult::TransportError("HTTP 502: Bad Gateway".to_string()),
                RawProbeResult::Ok(questions(2)),
            ],
            RawProbeResult::NotFound,
        ));
        let handle = questions_engine(&probe, 10).start(Some(JobId::from(1)), true);

        let seen = collect(handle.subscribe()).await;

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1].state, JobState::Processing);
        assert_eq!(seen[1].message, "Generating questions...");
        assert_eq!(seen[1].error.as_deref(), Some("HTTP 502: Bad Gateway"));
        assert_eq!(seen[2].state, JobState::Completed);
        assert!(seen[2].error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_errors_exhaust_budget() {
        let probe = Arc::new(ScriptedProbe::new(
            vec![],
            RawProbeResult::TransportError("connection refused".to_string()),
        ));
        let handle = questions_engine(&probe, 3).start(Some(JobId::from(1)), true);

        let last = handle.wait_terminal().await;
        assert_eq!(probe.calls(), 3);
        assert_eq!(last.state, JobState::Pending);
        assert_eq!(last.error.as_deref(), Some("questions timed out"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_first_tick_issues_no_probe() {
        let probe = Arc::new(ScriptedProbe::new(vec![], RawProbeResult::NotFound));
        let handle = questions_engine(&probe, 60).start(Some(JobId::from(1)), true);

        handle.stop();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(probe.calls(), 0);
        assert!(!handle.is_running());
        assert_eq!(handle.snapshot(), PollSnapshot::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_after_first_probe_issues_no_more() {
        let probe = Arc::new(ScriptedProbe::new(vec![], RawProbeResult::NotFound));
        let handle = questions_engine(&probe, 60).start(Some(JobId::from(1)), true);

        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();
        handle.stop();
        handle.stop();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(probe.calls(), 1);
        assert_eq!(handle.wait_terminal().await.state, JobState::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_result_is_discarded_after_stop() {
        let probe = Arc::new(
            ScriptedProbe::new(vec![], RawProbeResult::Ok(questions(5)))
                .with_latency(Duration::from_secs(10)),
        );
        let handle = questions_engine(&probe, 60).start(Some(JobId::from(1)), true);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(probe.calls(), 1);
        handle.stop();

        tokio::time::sleep(Duration::from_secs(30)).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.state, JobState::Pending);
        assert_eq!(snapshot.aux_count, None);
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_probes_never_overlap() {
        let probe = Arc::new(
            ScriptedProbe::new(vec![], RawProbeResult::NotFound)
                .with_latency(Duration::from_secs(8)),
        );
        let handle = questions_engine(&probe, 3).start(Some(JobId::from(1)), true);

        handle.wait_terminal().await;

        assert_eq!(probe.max_in_flight.load(Ordering::SeqCst), 1);
        let started = probe.started.lock().unwrap().clone();
        assert_eq!(started.len(), 3);
        for pair in started.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(13));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_or_missing_target_does_nothing() {
        let probe = Arc::new(ScriptedProbe::new(vec![], RawProbeResult::Ok(questions(1))));
        let engine = questions_engine(&probe, 60);

        let disabled = engine.start(Some(JobId::from(1)), false);
        let missing = engine.start(None, true);
        let blank = engine.start(Some(JobId::new("")), true);

        for handle in [&disabled, &missing, &blank] {
            assert!(!handle.is_running());
            assert_eq!(handle.wait_terminal().await, PollSnapshot::default());
        }

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(probe.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pollers_on_same_target_are_independent() {
        let done = Arc::new(ScriptedProbe::new(vec![], RawProbeResult::Ok(questions(2))));
        let waiting = Arc::new(ScriptedProbe::new(vec![], RawProbeResult::NotFound));
        let target = JobId::from(99);

        let a = questions_engine(&done, 5).start(Some(target.clone()), true);
        let b = questions_engine(&waiting, 5).start(Some(target), true);

        let (a_last, b_last) = tokio::join!(a.wait_terminal(), b.wait_terminal());

        assert_eq!(a_last.state, JobState::Completed);
        assert!(a_last.error.is_none());
        assert_eq!(b_last.state, JobState::Pending);
        assert!(b_last.error.is_some());
        assert_ne!(a.run_id(), b.run_id());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hard_failure_is_terminal() {
        let probe = Arc::new(ScriptedProbe::new(
            vec![],
            RawProbeResult::Ok(Evaluation {
                status: Some("failed".to_string()),
                ..Default::default()
            }),
        ));
        let engine = PollingEngine::new(
            "evaluation",
            Arc::clone(&probe),
            inference::evaluation,
            policy(60),
        );

        let last = engine.start(Some(JobId::from(3)), true).wait_terminal().await;
        assert_eq!(last.state, JobState::Failed);
        assert_eq!(last.error.as_deref(), Some("Evaluation failed"));
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_polling() {
        let probe = Arc::new(ScriptedProbe::new(vec![], RawProbeResult::NotFound));
        let handle = questions_engine(&probe, 60).start(Some(JobId::from(1)), true);

        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();
        drop(handle);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(probe.calls(), 1);
    }

    #[test]
    fn test_run_state_counts_only_non_terminal_attempts() {
        let mut state = RunState::new(2);
        let step = state.apply("jobs", inference::job_status(RawProbeResult::NotFound));
        assert_eq!(step, Step::Continue);
        assert_eq!(state.retry_count, 1);

        let step = state.apply("jobs", inference::job_status(RawProbeResult::Ok(questions(1))));
        assert_eq!(step, Step::Finished);
        assert_eq!(state.retry_count, 1);
        assert!(state.snapshot.error.is_none());
    }
}
