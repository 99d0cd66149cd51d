//! Watch command
//!
//! Follows the pollers of one design review and prints every snapshot change
//! until all channels have ended or the user interrupts.

use anyhow::Result;
use clap::Args;
use colored::*;
use review_core::domain::job::{JobId, JobState, PollSnapshot};
use review_poller::{Channel, PollHandle, ReviewWatch};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::Config;

/// Arguments of the watch command
#[derive(Args)]
pub struct WatchArgs {
    /// Design review ID
    pub id: u64,

    /// Skip the job status channel
    #[arg(long)]
    pub no_job: bool,

    /// Skip the questions generation channel
    #[arg(long)]
    pub no_questions: bool,

    /// Skip the evaluation channel
    #[arg(long)]
    pub no_evaluation: bool,

    /// Print snapshots as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl WatchArgs {
    /// Channels left enabled by the flags
    pub fn channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|channel| match channel {
                Channel::JobStatus => !self.no_job,
                Channel::QuestionsGeneration => !self.no_questions,
                Channel::Evaluation => !self.no_evaluation,
            })
            .collect()
    }
}

/// Handle the watch command
pub async fn handle_watch(args: WatchArgs, config: &Config) -> Result<()> {
    let channels = args.channels();
    if channels.is_empty() {
        anyhow::bail!("every channel is disabled; nothing to watch");
    }

    let client = config.client();
    let watch = ReviewWatch::start(
        &client,
        Some(JobId::from(args.id)),
        config.policy(),
        &channels,
    );

    if !args.json {
        println!(
            "{}",
            format!("Watching design review {} (Ctrl-C to stop)", args.id).bold()
        );
        println!();
    }

    let handles: Vec<&PollHandle> = channels.iter().map(|c| watch.handle(*c)).collect();
    let interrupted = follow(&channels, &handles, args.json).await?;
    if interrupted {
        info!("Interrupted, stopping pollers");
        watch.stop();
    }

    let finals: Vec<(Channel, PollSnapshot)> = channels
        .iter()
        .map(|channel| (*channel, watch.snapshot(*channel)))
        .collect();

    if !args.json {
        println!();
        println!("{}", "Summary:".bold());
        for (channel, snapshot) in &finals {
            print_snapshot(*channel, snapshot);
        }
    }

    if let Some((channel, snapshot)) = finals
        .iter()
        .find(|(_, snapshot)| snapshot.state == JobState::Failed)
    {
        anyhow::bail!(
            "{} failed: {}",
            channel,
            snapshot.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}

/// Prints snapshots as they arrive
///
/// Returns `true` when the user interrupted before every channel ended.
pub(crate) async fn follow(
    channels: &[Channel],
    handles: &[&PollHandle],
    json: bool,
) -> Result<bool> {
    let (tx, mut events) = mpsc::channel::<(Channel, PollSnapshot)>(16);

    for (channel, handle) in channels.iter().zip(handles) {
        let channel = *channel;
        let mut rx = handle.subscribe();
        let tx = tx.clone();

        let initial = rx.borrow_and_update().clone();
        emit(channel, &initial, json)?;
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                if tx.send((channel, snapshot)).await.is_err() {
                    break;
                }
            }
            debug!(%channel, "Channel ended");
        });
    }
    drop(tx);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some((channel, snapshot)) => emit(channel, &snapshot, json)?,
                None => return Ok(false),
            },
            _ = tokio::signal::ctrl_c() => return Ok(true),
        }
    }
}

fn emit(channel: Channel, snapshot: &PollSnapshot, json: bool) -> Result<()> {
    if json {
        let line = serde_json::json!({
            "channel": channel.key(),
            "snapshot": snapshot,
        });
        println!("{}", serde_json::to_string(&line)?);
    } else {
        print_snapshot(channel, snapshot);
    }
    Ok(())
}

/// Print one channel's snapshot on a single line
pub(crate) fn print_snapshot(channel: Channel, snapshot: &PollSnapshot) {
    let mut line = format!(
        "  {:<11} {:<10} {:>3}%  {}",
        channel.key().bold(),
        colorize_state(snapshot.state),
        snapshot.progress,
        snapshot.message
    );
    if let Some(count) = snapshot.aux_count {
        line.push_str(&format!(" [{}]", count).dimmed().to_string());
    }
    if let Some(error) = &snapshot.error {
        line.push_str(&format!("  {}", error.red()));
    }
    println!("{}", line);
}

/// Colorize job state for display
pub(crate) fn colorize_state(state: JobState) -> ColoredString {
    let state_str = state.as_str();
    match state {
        JobState::Pending => state_str.yellow(),
        JobState::Processing => state_str.cyan(),
        JobState::Completed => state_str.green(),
        JobState::Failed => state_str.red(),
    }
}
