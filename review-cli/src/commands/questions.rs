//! Probing question command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use review_client::ReviewClient;
use review_core::domain::question::ProbingQuestion;

use crate::config::Config;

/// Question subcommands
#[derive(Subcommand)]
pub enum QuestionsCommands {
    /// List the questions generated for a design review
    List {
        /// Design review ID
        review_id: u64,
    },
    /// Answer a single question
    Answer {
        /// Question ID
        question_id: u64,

        /// Answer text
        answer: String,
    },
}

/// Handle question commands
pub async fn handle_questions_command(command: QuestionsCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        QuestionsCommands::List { review_id } => list_questions(&client, review_id).await,
        QuestionsCommands::Answer {
            question_id,
            answer,
        } => {
            client.answer_question(question_id, answer).await?;
            println!("{} Answered question {}", "✓".green(), question_id);
            Ok(())
        }
    }
}

async fn list_questions(client: &ReviewClient, review_id: u64) -> Result<()> {
    let questions = match client.get_questions(review_id).await {
        Ok(questions) => questions,
        Err(e) if e.is_not_found() => {
            println!("{}", "Questions have not been generated yet.".yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if questions.is_empty() {
        println!("{}", "No questions generated yet.".yellow());
        return Ok(());
    }

    println!("{}", format!("{} question(s):", questions.len()).bold());
    println!();
    for question in &questions {
        print_question(question);
    }

    Ok(())
}

fn print_question(question: &ProbingQuestion) {
    println!(
        "  {} Q{} {}",
        "▸".cyan(),
        question
            .id
            .map(|id| id.to_string())
            .unwrap_or_default()
            .bold(),
        format!("(difficulty {})", question.difficulty).dimmed()
    );
    println!("    {}", question.question);
    match question.answer.as_deref() {
        Some(answer) if question.is_answered() => println!("    {} {}", "→".green(), answer),
        _ => println!("    {}", "unanswered".yellow()),
    }
    println!();
}
