//! Prompt templates for solving and transcribing questions

use crate::solution::Topic;

/// Templates for the two model calls the solver makes
pub struct PromptTemplate;

impl PromptTemplate {
    /// Persona instruction that opens every solve prompt
    pub fn persona() -> &'static str {
        r#"Behave like you are a top level JEE Mains mathematics tutor. Solve the following math problem step by step.
Think deeply and work through the problem in chronological order."#
    }

    /// Full solve prompt for one question. The JSON example is always last.
    pub fn solve_prompt(question: &str) -> String {
        let topics = Topic::ALL
            .iter()
            .map(Topic::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"{persona}

### Question:
{question}

### Explaining the solution:
- Show all mathematical working clearly
- Use proper mathematical notation
- Explain the reasoning behind each step
- Highlight any important formulas or theorems used

### Output rules:
1. Return ONLY one valid JSON object - no markdown fences, code or text before or after it
2. No trailing commas
3. All strings must be properly escaped; write every backslash as \\ (for example \\frac{{1}}{{2}})
4. Use exactly these fields:
   - "question": the question restated clearly
   - "solution_steps": an array of strings, one entry per step, each with a short explanation
   - "final_answer": the final numerical answer or expression
   - "difficulty_level": one of "Easy", "Medium", "Hard" by JEE Mains standards
   - "topic": one of {topics}

### Example of the required JSON structure:
{{
  "question": "Find the derivative of f(x) = x^3 + 2x^2 - 5x + 1",
  "solution_steps": [
    "Step 1: Apply the sum rule. The derivative of a sum of terms is the sum of their derivatives.",
    "Step 2: Apply the power rule to each term: d/dx x^3 = 3x^2, d/dx 2x^2 = 4x, d/dx -5x = -5, d/dx 1 = 0.",
    "Step 3: Combine the results to get the derivative."
  ],
  "final_answer": "f'(x) = 3x^2 + 4x - 5",
  "difficulty_level": "Easy",
  "topic": "Calculus"
}}"#,
            persona = Self::persona(),
            question = question,
            topics = topics,
        )
    }

    /// Instruction sent with an uploaded image to extract the question text
    pub fn transcription_prompt() -> &'static str {
        "What is the math question in this image? Please provide only the extracted text of the question, without any additional explanations or formatting."
    }
}

/// Build the solve prompt for `question`
///
/// Pure function of its input. The caller enforces the minimum question length.
pub fn build_prompt(question: &str) -> String {
    PromptTemplate::solve_prompt(question)
}
