//! Design review command handlers
//!
//! Listing, inspecting and submitting design reviews. Submitting a review
//! starts question generation on the backend; follow it with `review watch`.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use review_client::ReviewClient;
use review_core::domain::review::{DesignReview, DesignReviewStatus, ReviewTotals};
use review_core::dto::review::DesignReviewForm;

use crate::config::Config;

/// Design review subcommands
#[derive(Subcommand)]
pub enum ReviewCommands {
    /// List all design reviews
    List,
    /// Get design review details
    Get {
        /// Design review ID
        id: u64,
    },
    /// Submit a design review for a candidate
    Create {
        /// Candidate ID
        #[arg(long)]
        candidate: u64,

        #[arg(long)]
        problem: String,

        #[arg(long)]
        architecture: String,

        #[arg(long)]
        tradeoffs: String,

        #[arg(long)]
        scalability: String,

        #[arg(long)]
        security: String,

        #[arg(long)]
        maintainability: String,
    },
    /// Delete a design review
    Delete {
        /// Design review ID
        id: u64,
    },
}

/// Handle design review commands
pub async fn handle_review_command(command: ReviewCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        ReviewCommands::List => list_reviews(&client).await,
        ReviewCommands::Get { id } => {
            let review = client.get_design_review(id).await?;
            print_review_details(&review);
            Ok(())
        }
        ReviewCommands::Create {
            candidate,
            problem,
            architecture,
            tradeoffs,
            scalability,
            security,
            maintainability,
        } => {
            let form = DesignReviewForm {
                problem_description: problem,
                proposed_architecture: architecture,
                design_tradeoffs: tradeoffs,
                scalability,
                security_measures: security,
                maintainability,
                candidate,
                status: None,
                overall_score: None,
            };
            let review = client
                .create_design_review(form)
                .await
                .with_context(|| format!("failed to submit review for candidate {}", candidate))?;
            let id = review.id.map(|id| id.to_string()).unwrap_or_default();
            println!("{} Submitted design review {}", "✓".green(), id.bold());
            println!(
                "  Follow progress with: {}",
                format!("review watch {}", id).cyan()
            );
            Ok(())
        }
        ReviewCommands::Delete { id } => {
            client.delete_design_review(id).await?;
            println!("{} Deleted design review {}", "✓".green(), id);
            Ok(())
        }
    }
}

async fn list_reviews(client: &ReviewClient) -> Result<()> {
    let reviews = client.list_design_reviews().await?;

    if reviews.is_empty() {
        println!("{}", "No design reviews found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} design review(s):", reviews.len()).bold()
    );
    println!();
    for review in &reviews {
        println!(
            "  {} Review {} (candidate {})",
            "▸".cyan(),
            review
                .id
                .map(|id| id.to_string())
                .unwrap_or_default()
                .bold(),
            review.candidate
        );
        println!("    Status:       {}", colorize_review_status(review.status));
        if let Some(score) = review.score_out_of_five() {
            println!("    Score:        {:.1}/5", score);
        }
        println!();
    }

    print_totals(&ReviewTotals::from_reviews(&reviews));

    Ok(())
}

fn print_review_details(review: &DesignReview) {
    println!(
        "{}",
        format!(
            "Design review {}",
            review.id.map(|id| id.to_string()).unwrap_or_default()
        )
        .bold()
    );
    println!("  Candidate:     {}", review.candidate);
    println!("  Status:        {}", colorize_review_status(review.status));
    if let Some(submitted) = review.submission_date {
        println!(
            "  Submitted:     {}",
            submitted.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    if let Some(score) = review.score_out_of_five() {
        println!("  Score:         {:.1}/5", score);
    }
    println!();

    for (label, text) in [
        ("Problem", &review.problem_description),
        ("Architecture", &review.proposed_architecture),
        ("Trade-offs", &review.design_tradeoffs),
        ("Scalability", &review.scalability),
        ("Security", &review.security_measures),
        ("Maintainability", &review.maintainability),
    ] {
        println!("  {}", label.bold());
        println!("    {}", text);
    }

    if !review.documents.is_empty() {
        println!();
        println!("  {}", "Documents".bold());
        for document in &review.documents {
            println!(
                "    {} {} ({} bytes)",
                "•".cyan(),
                document.url.as_deref().unwrap_or("-"),
                document.size
            );
        }
    }

    println!();
    println!(
        "  Questions:     {} ({} answered)",
        review.probing_questions.len(),
        review
            .probing_questions
            .iter()
            .filter(|q| q.is_answered())
            .count()
    );
}

fn print_totals(totals: &ReviewTotals) {
    println!(
        "{}  {}  {}  {}",
        format!("Total: {}", totals.total).bold(),
        format!("Completed: {}", totals.completed).green(),
        format!("Pending: {}", totals.pending).yellow(),
        format!("Average score: {:.1}/5", totals.average_score).cyan()
    );
}

/// Colorize review status for display
fn colorize_review_status(status: Option<DesignReviewStatus>) -> ColoredString {
    let Some(status) = status else {
        return "-".dimmed();
    };
    let status_str = status.as_str();
    match status {
        DesignReviewStatus::Pending | DesignReviewStatus::Incomplete => status_str.yellow(),
        DesignReviewStatus::QuestionsGenerated | DesignReviewStatus::InProgress => {
            status_str.cyan()
        }
        DesignReviewStatus::Completed
        | DesignReviewStatus::Reviewed
        | DesignReviewStatus::Finalized => status_str.green(),
        DesignReviewStatus::Unknown => status_str.dimmed(),
    }
}
