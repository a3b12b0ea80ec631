//! Repairs for common JSON malformations in model output.
//!
//! Models frequently emit LaTeX with bare backslashes (`\sqrt{2}`), raw line
//! breaks inside string values, and the odd trailing comma. [`repair_json`]
//! fixes all three in one pass that tracks string-literal state.
//!
//! # LaTeX commands vs. JSON escapes
//!
//! `\frac`, `\theta`, `\nabla`, `\right` and `\beta` start with a letter that
//! also forms a JSON escape, so they parse without error but decode to a
//! control character. A `\b` or `\f` followed by more letters is always
//! treated as a command. For `\n`, `\r` and `\t` the whole letter run must
//! name a known command (`LATEX_COMMANDS`), so an intentional newline before
//! a word (`\nThen`) is kept. An unlisted command in that family still decodes
//! as a control character.

use serde::{Deserialize, Serialize};
use std::fmt;

/// LaTeX commands whose name starts with `n`, `r` or `t`
const LATEX_COMMANDS: &[&str] = &[
    "nabla", "ne", "neg", "neq", "newline", "nexists", "ngeq", "ni", "nleq", "nmid", "nolimits",
    "not", "notin", "nsubseteq", "nu", "rangle", "rbrace", "rbrack", "rceil", "rfloor", "rho",
    "right", "rightarrow", "rightleftharpoons", "rm", "root", "rVert", "rvert", "tan", "tanh",
    "tau", "tbinom", "text", "textbf", "textit", "textrm", "tfrac", "therefore", "theta", "tilde",
    "times", "to", "top", "triangle", "triangleq",
];

/// When the repair pass runs on a candidate JSON text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairPolicy {
    /// Repair every candidate, even one that already parses
    Always,
    /// Repair when the candidate does not parse or holds a bare backslash
    /// (LaTeX commands included)
    #[default]
    OnParseFailure,
    /// Never modify the candidate
    Never,
}

impl RepairPolicy {
    /// Apply this policy to a candidate JSON text
    pub fn apply(&self, candidate: &str) -> String {
        match self {
            RepairPolicy::Always => repair_json(candidate),
            RepairPolicy::OnParseFailure => {
                if parses(candidate) && !has_bare_backslash(candidate) {
                    candidate.to_string()
                } else {
                    repair_json(candidate)
                }
            }
            RepairPolicy::Never => candidate.to_string(),
        }
    }
}

impl fmt::Display for RepairPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairPolicy::Always => write!(f, "always"),
            RepairPolicy::OnParseFailure => write!(f, "on_parse_failure"),
            RepairPolicy::Never => write!(f, "never"),
        }
    }
}

impl std::str::FromStr for RepairPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "always" => Ok(RepairPolicy::Always),
            "on_parse_failure" | "on_failure" => Ok(RepairPolicy::OnParseFailure),
            "never" | "off" => Ok(RepairPolicy::Never),
            _ => Err(format!("Invalid RepairPolicy: {}", s)),
        }
    }
}

/// Full repair pass: bare backslashes are doubled, raw control characters
/// inside strings are escaped, and trailing commas before `}` or `]` are
/// dropped.
pub fn repair_json(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\\' {
            let len = escape_len(&chars[i..]);
            if len > 0 {
                out.extend(&chars[i..i + len]);
                i += len;
            } else {
                out.push_str("\\\\");
                i += 1;
            }
            continue;
        }

        if in_string {
            match c {
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
        } else {
            match c {
                '"' => {
                    in_string = true;
                    out.push(c);
                }
                ',' if closes_after_whitespace(&chars[i + 1..]) => {}
                c => out.push(c),
            }
        }
        i += 1;
    }

    out
}

/// Length of the JSON escape to keep at the start of `chars`, or 0 when the
/// backslash must be doubled.
fn escape_len(chars: &[char]) -> usize {
    match chars.get(1).copied() {
        Some('"' | '\\' | '/') => 2,
        Some(c @ ('b' | 'f' | 'n' | 'r' | 't')) if !is_latex_command(c, &chars[2..]) => 2,
        Some('u') if chars.len() >= 6 && chars[2..6].iter().all(char::is_ascii_hexdigit) => 6,
        _ => 0,
    }
}

fn is_latex_command(first: char, rest: &[char]) -> bool {
    let tail: String = rest.iter().take_while(|c| c.is_ascii_alphabetic()).collect();
    match first {
        'b' | 'f' => !tail.is_empty(),
        _ => LATEX_COMMANDS.contains(&format!("{}{}", first, tail).as_str()),
    }
}

fn has_bare_backslash(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' {
            match escape_len(&chars[i..]) {
                0 => return true,
                len => i += len,
            }
        } else {
            i += 1;
        }
    }
    false
}

fn parses(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

fn closes_after_whitespace(rest: &[char]) -> bool {
    rest.iter()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| *c == '}' || *c == ']')
}
