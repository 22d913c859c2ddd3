//! Display functions for command results

use super::formatters::{create_progress_bar, feedback_tiles, golf_label};
use crate::commands::{BenchmarkResult, WordReport, WordStatus};
use crate::game::MAX_GUESSES;
use crate::session::GameResult;
use colored::Colorize;

/// Print the board and summary of one game
pub fn print_game_result(result: &GameResult, show_reasoning: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "{} {} | {} {} | {} {}",
        "Model:".bright_cyan(),
        result.metadata.model,
        "Style:".bright_cyan(),
        result.metadata.template,
        "Date:".bright_cyan(),
        result.metadata.date
    );
    println!("{}", "─".repeat(60).cyan());

    if let Some(state) = &result.game_state {
        for (i, feedback) in state.guess_results().iter().enumerate() {
            println!("\nTurn {}: {} {}", i + 1, feedback_tiles(feedback), feedback.to_emoji());
            if show_reasoning
                && let Some(Some(reasoning)) = state.guess_reasoning().get(i)
            {
                println!("  {} {}", "Reasoning:".bright_black(), reasoning.italic());
            }
        }
    }

    if !result.metadata.invalid_word_attempts.is_empty() {
        println!(
            "\n{} {} ({} total)",
            "Rejected words:".yellow(),
            result.metadata.invalid_word_attempts.join(", "),
            result.metadata.total_invalid_attempts
        );
    }

    println!();
    if let Some(error) = &result.error {
        println!("{}", format!("💥 Game failed: {error}").red().bold());
    } else if result.won() {
        println!(
            "{}",
            format!("✅ Solved in {}/{MAX_GUESSES} guesses!", result.guesses_made())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Not solved in {MAX_GUESSES} guesses").red().bold()
        );
    }

    if let Some(target) = result.game_state.as_ref().and_then(|s| s.revealed_target()) {
        println!("   Target word:  {}", target.bright_yellow().bold());
    }
    if let Some(score) = result.golf_score {
        println!("   Golf score:   {}", golf_label(score).bright_yellow());
    }
    println!("   Duration:     {:.2}s", result.metadata.duration_seconds);
    if let Some(usage) = &result.metadata.usage_stats {
        println!(
            "   Model calls:  {} ({} tokens, {:.0}ms avg)",
            usage.total_requests, usage.total_tokens, usage.avg_latency_ms
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.total_games);
    println!(
        "   Won / lost:       {} / {}",
        format!("{}", result.won).green(),
        format!("{}", result.lost).yellow()
    );
    if result.failed > 0 {
        println!("   Failed:           {}", format!("{}", result.failed).red());
    }
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!("   Average golf:     {:+.2}", result.average_golf_score);
    println!("   Rejected words:   {}", result.invalid_attempts);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for guess_count in 1..=MAX_GUESSES {
        let count = result.distribution.get(&guess_count).copied().unwrap_or(0);
        let pct = if result.total_games > 0 {
            count as f64 / result.total_games as f64 * 100.0
        } else {
            0.0
        };
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {guess_count}: {} {count:4} ({pct:5.1}%)", bar.green());
    }

    if !result.failures.is_empty() {
        println!("\n⚠️  {}", "Failures:".red().bold());
        for (target, error) in &result.failures {
            println!("   {}: {error}", target.to_uppercase());
        }
    }
}

/// Print one line per word
pub fn print_word_reports(reports: &[WordReport]) {
    for report in reports {
        let status = match &report.status {
            WordStatus::Added => "added".green().to_string(),
            WordStatus::AlreadyPresent => "already present".bright_black().to_string(),
            WordStatus::Valid => "valid".green().to_string(),
            WordStatus::Unknown => "not in word list".yellow().to_string(),
            WordStatus::Rejected(reason) => reason.red().to_string(),
        };
        println!("  {} {status}", format!("{:<8}", report.word).bold());
    }
}
