//! Evaluation command handlers
//!
//! Triggers scoring of a design review and prints the resulting scorecard.
//! Raw scores may come back on a 0-10 scale; everything printed here is
//! normalized to 0-5.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use review_client::ReviewClient;
use review_core::domain::job::{JobId, JobState};
use review_core::score::{CANONICAL_MAX, Scorecard};
use review_poller::Channel;
use review_poller::scheduler::channels::evaluation_engine;

use super::watch::{follow, print_snapshot};
use crate::config::Config;

/// Evaluation subcommands
#[derive(Subcommand)]
pub enum EvaluateCommands {
    /// Ask the backend to evaluate a design review
    Trigger {
        /// Design review ID
        id: u64,

        /// Poll until the evaluation is available and print it
        #[arg(short, long)]
        wait: bool,
    },
    /// Show the evaluation of a design review
    Show {
        /// Design review ID
        id: u64,
    },
}

/// Handle evaluation commands
pub async fn handle_evaluate_command(command: EvaluateCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        EvaluateCommands::Trigger { id, wait } => {
            client
                .trigger_evaluation(id)
                .await
                .with_context(|| format!("failed to trigger evaluation of review {}", id))?;
            println!("{} Evaluation requested for review {}", "✓".green(), id);
            if wait {
                wait_for_evaluation(&client, config, id).await?;
            }
            Ok(())
        }
        EvaluateCommands::Show { id } => show_evaluation(&client, id).await,
    }
}

async fn wait_for_evaluation(client: &ReviewClient, config: &Config, id: u64) -> Result<()> {
    let engine = evaluation_engine(client, config.policy());
    let handle = engine.start(Some(JobId::from(id)), true);

    println!();
    if follow(&[Channel::Evaluation], &[&handle], false).await? {
        handle.stop();
        println!("{}", "Stopped waiting.".yellow());
        return Ok(());
    }

    let last = handle.snapshot();
    match last.state {
        JobState::Completed => {
            println!();
            show_evaluation(client, id).await
        }
        JobState::Failed => anyhow::bail!(
            "evaluation failed: {}",
            last.error.as_deref().unwrap_or("unknown error")
        ),
        _ => {
            print_snapshot(Channel::Evaluation, &last);
            anyhow::bail!(
                "{}",
                last.error
                    .unwrap_or_else(|| "evaluation did not complete".to_string())
            )
        }
    }
}

async fn show_evaluation(client: &ReviewClient, id: u64) -> Result<()> {
    let evaluation = match client.get_evaluation(id).await {
        Ok(evaluation) => evaluation,
        Err(e) if e.is_not_found() => {
            println!("{}", "Evaluation not available yet.".yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if !evaluation.is_complete() {
        println!(
            "{} ({})",
            "Evaluation in progress.".yellow(),
            evaluation.status.as_deref().unwrap_or("pending")
        );
        return Ok(());
    }

    print_scorecard(id, &Scorecard::from_evaluation(&evaluation));
    Ok(())
}

fn print_scorecard(id: u64, card: &Scorecard) {
    println!("{}", format!("Evaluation of design review {}", id).bold());
    match card.overall {
        Some(overall) => println!(
            "  Overall:          {}",
            format!("{:.1}/{}", overall, CANONICAL_MAX).green().bold()
        ),
        None => println!("  Overall:          {}", "-".dimmed()),
    }
    println!();
    for (label, score) in card.breakdown() {
        println!("  {:<16}  {:.1}  {}", label, score, score_bar(score));
    }
    if let Some(feedback) = &card.feedback {
        println!();
        println!("  {}", "Feedback".bold());
        println!("    {}", feedback);
    }
}

/// Five-cell bar for a normalized score
fn score_bar(score: f64) -> String {
    let filled = score.round().clamp(0.0, CANONICAL_MAX) as usize;
    format!(
        "{}{}",
        "■".repeat(filled),
        "□".repeat(CANONICAL_MAX as usize - filled)
    )
}
