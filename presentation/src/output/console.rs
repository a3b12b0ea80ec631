//! Console output formatter for solve results

use colored::Colorize;
use solver_domain::{Difficulty, MathSolution, SolveResult};

/// Formats solve results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the result for a terminal
    pub fn format(result: &SolveResult) -> String {
        match result {
            SolveResult::Success { solution, .. } => Self::format_solution(solution),
            SolveResult::Failure { kind, error, .. } => format!(
                "{} {}\n{} {}\n",
                "Error:".red().bold(),
                error,
                "Kind:".dimmed(),
                kind.as_str().dimmed()
            ),
        }
    }

    /// Format as JSON
    pub fn format_json(result: &SolveResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_solution(solution: &MathSolution) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("JEE Math Solution"));
        output.push('\n');

        // Question
        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            solution.question()
        ));

        // Badges
        let mut badges = Vec::new();
        if let Some(level) = solution.difficulty_level() {
            let label = match solution.difficulty() {
                Some(Difficulty::Easy) => level.green(),
                Some(Difficulty::Medium) => level.yellow(),
                Some(Difficulty::Hard) => level.red(),
                None => level.normal(),
            };
            badges.push(format!("{} {}", "Difficulty:".dimmed(), label));
        }
        if let Some(topic) = solution.topic() {
            badges.push(format!("{} {}", "Topic:".dimmed(), topic.magenta()));
        }
        if !badges.is_empty() {
            output.push_str(&badges.join("   "));
            output.push('\n');
        }

        // Steps
        output.push_str(&Self::section_header("Solution Steps"));
        for (i, step) in solution.solution_steps().iter().enumerate() {
            output.push_str(&format!("{} {}\n", format!("{:>2}.", i + 1).yellow().bold(), step));
        }

        // Final answer
        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&format!("{}\n", solution.final_answer().green().bold()));

        output.push_str(&Self::footer());
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solver_domain::{SolveErrorKind, validate};

    fn solved() -> SolveResult {
        let raw = r#"{"question":"Solve x^2 = 4","solution_steps":["Take roots","x = 2 or x = -2"],"final_answer":"x = ±2","difficulty_level":"Easy","topic":"Algebra"}"#;
        SolveResult::success(validate(raw).unwrap(), raw)
    }

    #[test]
    fn test_format_lists_numbered_steps() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&solved());
        assert!(output.contains("Question: Solve x^2 = 4"));
        assert!(output.contains(" 1. Take roots"));
        assert!(output.contains(" 2. x = 2 or x = -2"));
        assert!(output.contains("x = ±2"));
        assert!(output.contains("Difficulty: Easy"));
        assert!(output.contains("Topic: Algebra"));
    }

    #[test]
    fn test_format_failure() {
        colored::control::set_override(false);
        let result = SolveResult::failure(SolveErrorKind::Timeout, "An error occurred: Timeout after 60 seconds");
        let output = ConsoleFormatter::format(&result);
        assert!(output.contains("Error: An error occurred: Timeout after 60 seconds"));
        assert!(output.contains("timeout"));
    }

    #[test]
    fn test_format_json() {
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&solved())).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["solution"]["topic"], "Algebra");
    }
}
