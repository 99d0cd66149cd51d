//! Candidate command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use review_client::ReviewClient;
use review_core::domain::candidate::Candidate;
use review_core::dto::candidate::CreateCandidate;

use crate::config::Config;

/// Candidate subcommands
#[derive(Subcommand)]
pub enum CandidateCommands {
    /// List all candidates
    List,
    /// Get candidate details
    Get {
        /// Candidate ID
        id: u64,
    },
    /// Register a candidate
    Create {
        /// Full name
        #[arg(long)]
        name: String,

        /// Current role, e.g. "Senior Engineer"
        #[arg(long)]
        designation: String,
    },
    /// Delete a candidate
    Delete {
        /// Candidate ID
        id: u64,
    },
}

/// Handle candidate commands
pub async fn handle_candidate_command(command: CandidateCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        CandidateCommands::List => list_candidates(&client).await,
        CandidateCommands::Get { id } => get_candidate(&client, id).await,
        CandidateCommands::Create { name, designation } => {
            create_candidate(&client, name, designation).await
        }
        CandidateCommands::Delete { id } => {
            client.delete_candidate(id).await?;
            println!("{} Deleted candidate {}", "✓".green(), id);
            Ok(())
        }
    }
}

async fn list_candidates(client: &ReviewClient) -> Result<()> {
    let candidates = client.list_candidates().await?;

    if candidates.is_empty() {
        println!("{}", "No candidates found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} candidate(s):", candidates.len()).bold()
        );
        println!();
        for candidate in candidates {
            print_candidate(&candidate);
        }
    }

    Ok(())
}

async fn get_candidate(client: &ReviewClient, id: u64) -> Result<()> {
    let candidate = client.get_candidate(id).await?;
    print_candidate(&candidate);

    if !candidate.design_reviews.is_empty() {
        println!("    Reviews:");
        for review in &candidate.design_reviews {
            let status = review
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "      {} #{} {}",
                "•".cyan(),
                review.id.map(|id| id.to_string()).unwrap_or_default(),
                status.dimmed()
            );
        }
        println!();
    }

    Ok(())
}

async fn create_candidate(client: &ReviewClient, name: String, designation: String) -> Result<()> {
    let candidate = client
        .create_candidate(CreateCandidate { name, designation })
        .await?;

    println!(
        "{} Created candidate {}",
        "✓".green(),
        candidate
            .id
            .map(|id| id.to_string())
            .unwrap_or_default()
            .bold()
    );

    Ok(())
}

fn print_candidate(candidate: &Candidate) {
    println!(
        "  {} Candidate {} {}",
        "▸".cyan(),
        candidate
            .id
            .map(|id| id.to_string())
            .unwrap_or_default()
            .bold(),
        candidate.name
    );
    println!("    Designation:  {}", candidate.designation);
    if let Some(created) = candidate.created_on {
        println!(
            "    Created:      {}",
            created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    println!("    Reviews:      {}", candidate.design_reviews.len());
    println!();
}
