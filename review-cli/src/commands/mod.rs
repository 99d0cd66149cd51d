//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod candidate;
mod evaluate;
mod questions;
mod review;
mod watch;

pub use candidate::CandidateCommands;
pub use evaluate::EvaluateCommands;
pub use questions::QuestionsCommands;
pub use review::ReviewCommands;
pub use watch::WatchArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Candidate management
    Candidate {
        #[command(subcommand)]
        command: CandidateCommands,
    },
    /// Design review management
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },
    /// Probing questions for a design review
    Questions {
        #[command(subcommand)]
        command: QuestionsCommands,
    },
    /// Evaluation of a design review
    Evaluate {
        #[command(subcommand)]
        command: EvaluateCommands,
    },
    /// Follow job status, question generation and evaluation of a design review
    Watch(WatchArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Candidate { command } => {
            candidate::handle_candidate_command(command, config).await
        }
        Commands::Review { command } => review::handle_review_command(command, config).await,
        Commands::Questions { command } => {
            questions::handle_questions_command(command, config).await
        }
        Commands::Evaluate { command } => {
            evaluate::handle_evaluate_command(command, config).await
        }
        Commands::Watch(args) => watch::handle_watch(args, config).await,
    }
}
