//! Solution entities

use serde::Serialize;
use std::fmt;

/// A validated step-by-step solution to one math question (Entity)
///
/// Only the schema validator ([`crate::parsing::schema::validate`]) can build
/// one, so every instance callers see has passed validation. Fields are
/// read-only; values are kept exactly as the model emitted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MathSolution {
    question: String,
    solution_steps: Vec<String>,
    final_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<String>,
}

impl MathSolution {
    pub(crate) fn new(
        question: String,
        solution_steps: Vec<String>,
        final_answer: String,
        difficulty_level: Option<String>,
        topic: Option<String>,
    ) -> Self {
        Self {
            question,
            solution_steps,
            final_answer,
            difficulty_level,
            topic,
        }
    }

    /// The question as restated by the model
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Ordered solution steps (never empty)
    pub fn solution_steps(&self) -> &[String] {
        &self.solution_steps
    }

    pub fn final_answer(&self) -> &str {
        &self.final_answer
    }

    pub fn difficulty_level(&self) -> Option<&str> {
        self.difficulty_level.as_deref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Classify the advisory difficulty label, if it is one of the known values
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty_level().and_then(Difficulty::from_label)
    }
}

/// Conventional difficulty labels (JEE Mains scale)
///
/// The model is asked for one of these, but the schema does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Classify a label case-insensitively; unknown labels yield `None`
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Topic vocabulary offered to the model in the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Algebra,
    Calculus,
    CoordinateGeometry,
    Statistics,
    Trigonometry,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Algebra,
        Topic::Calculus,
        Topic::CoordinateGeometry,
        Topic::Statistics,
        Topic::Trigonometry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Algebra => "Algebra",
            Topic::Calculus => "Calculus",
            Topic::CoordinateGeometry => "Coordinate Geometry",
            Topic::Statistics => "Statistics",
            Topic::Trigonometry => "Trigonometry",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(difficulty: Option<&str>, topic: Option<&str>) -> MathSolution {
        MathSolution::new(
            "2+2".to_string(),
            vec!["add".to_string()],
            "4".to_string(),
            difficulty.map(String::from),
            topic.map(String::from),
        )
    }

    #[test]
    fn test_difficulty_classification() {
        assert_eq!(sample(Some("hard"), None).difficulty(), Some(Difficulty::Hard));
        assert_eq!(sample(Some("Very Hard"), None).difficulty(), None);
        assert_eq!(sample(None, None).difficulty(), None);
    }

    #[test]
    fn test_topic_labels() {
        assert_eq!(Topic::CoordinateGeometry.to_string(), "Coordinate Geometry");
        // Labels outside the prompt vocabulary are kept verbatim
        assert_eq!(sample(None, Some("Probability")).topic(), Some("Probability"));
    }

    #[test]
    fn test_serialize_skips_missing_optionals() {
        let json = serde_json::to_value(sample(None, Some("Algebra"))).unwrap();
        assert_eq!(json["question"], "2+2");
        assert_eq!(json["topic"], "Algebra");
        assert!(json.get("difficulty_level").is_none());
    }
}
