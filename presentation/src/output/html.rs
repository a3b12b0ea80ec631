//! HTML pages for the web front end
//!
//! Pages are assembled from string templates. Every piece of user or model
//! text goes through [`escape_html`], except the raw reply, which is rendered
//! as Markdown by [`render_markdown`] with embedded HTML escaped.

use pulldown_cmark::{Event, Options, Parser, html};
use solver_domain::{Difficulty, MathSolution};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
h1 { color: #1d4ed8; }
textarea { width: 100%; min-height: 8rem; font-size: 1rem; padding: .5rem; }
button { background: #1d4ed8; color: #fff; border: 0; padding: .6rem 1.4rem; border-radius: 4px; font-size: 1rem; }
.flash-error { background: #fee2e2; border: 1px solid #f87171; padding: .75rem 1rem; border-radius: 4px; }
.badge { display: inline-block; padding: .15rem .6rem; border-radius: 999px; background: #e0e7ff; margin-right: .5rem; }
.badge-easy { background: #dcfce7; } .badge-medium { background: #fef9c3; } .badge-hard { background: #fee2e2; }
.answer { font-size: 1.2rem; font-weight: 600; background: #ecfdf5; padding: .75rem 1rem; border-radius: 4px; }
.raw-response { border-left: 3px solid #e5e7eb; padding-left: 1rem; }
pre { background: #f3f4f6; padding: 1rem; overflow-x: auto; white-space: pre-wrap; }
.meta { color: #6b7280; font-size: .9rem; }
"#;

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render model text as Markdown (tables, footnotes, strikethrough)
///
/// Raw HTML in the input is shown as text, never passed through.
pub fn render_markdown(text: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(markup) | Event::InlineHtml(markup) => Event::Text(markup),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

/// Question form, optionally with a one-time error message
///
/// `question` refills the textarea so the user does not retype it.
pub fn index_page(flash_error: Option<&str>, question: &str) -> String {
    let flash = flash_error
        .map(|message| {
            format!(
                r#"<div class="flash-error" role="alert">{}</div>"#,
                escape_html(message)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<h1>JEE Math Solver</h1>
<p>Type a JEE Mains math question or upload a picture of it (PNG, JPG or JPEG).</p>
{flash}
<form action="/solve" method="post" enctype="multipart/form-data">
<p><label for="question">Question</label></p>
<textarea id="question" name="question" placeholder="e.g. Find the derivative of f(x) = x^3 + 2x^2 - 5x + 1">{question}</textarea>
<p><label for="image_file">Or upload an image</label>
<input type="file" id="image_file" name="image_file" accept=".png,.jpg,.jpeg"></p>
<p><button type="submit">Solve</button></p>
</form>"#,
        flash = flash,
        question = escape_html(question),
    );

    layout("JEE Math Solver", &body)
}

/// Rendered solution with badges, numbered steps and the raw reply
pub fn solution_page(solution: &MathSolution, raw_response: &str, timestamp: &str) -> String {
    let mut badges = String::new();
    if let Some(level) = solution.difficulty_level() {
        let class = match solution.difficulty() {
            Some(Difficulty::Easy) => "badge badge-easy",
            Some(Difficulty::Medium) => "badge badge-medium",
            Some(Difficulty::Hard) => "badge badge-hard",
            None => "badge",
        };
        badges.push_str(&format!(
            r#"<span class="{}">{}</span>"#,
            class,
            escape_html(level)
        ));
    }
    if let Some(topic) = solution.topic() {
        badges.push_str(&format!(r#"<span class="badge">{}</span>"#, escape_html(topic)));
    }

    let steps = solution
        .solution_steps()
        .iter()
        .map(|step| format!("<li>{}</li>", escape_html(step)))
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<h1>Solution</h1>
<p class="meta">Solved at {timestamp}</p>
<h2>Question</h2>
<p>{question}</p>
<p>{badges}</p>
<h2>Step-by-step solution</h2>
<ol>
{steps}
</ol>
<h2>Final answer</h2>
<div class="answer">{answer}</div>
<details>
<summary>Raw AI response</summary>
<div class="raw-response">
{raw}
</div>
</details>
<p><a href="/">Solve another question</a></p>"#,
        timestamp = escape_html(timestamp),
        question = escape_html(solution.question()),
        badges = badges,
        steps = steps,
        answer = escape_html(solution.final_answer()),
        raw = render_markdown(raw_response),
    );

    layout("Solution - JEE Math Solver", &body)
}

/// Generic error page (404 and 500)
pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"<h1>Something went wrong</h1>
<p class="flash-error">{}</p>
<p><a href="/">Back to the solver</a></p>"#,
        escape_html(message)
    );
    layout("Error - JEE Math Solver", &body)
}
