//! Terminal rendering of the three session steps.

use colored::{ColoredString, Colorize};
use pulldown_cmark::{Event, Parser, Tag};

use crate::client::session::{Session, SessionState};
use crate::client::AnalysisApi;
use crate::models::{MatchResult, ResumeData, Verdict};

/// Skills shown on the step 2 card before collapsing into "+N more".
const SKILL_PREVIEW: usize = 8;

pub fn render<A: AnalysisApi>(session: &Session<A>) -> String {
    let mut out = step_header(session.step());

    match session.state() {
        SessionState::Idle => {
            out.push_str("Drop your resume here: a .pdf, .txt or .md file.\n");
        }
        SessionState::Parsed { resume, .. } => out.push_str(&render_parsed(resume)),
        SessionState::Matched { resume, result, .. } => {
            out.push_str(&render_matched(resume, result))
        }
    }

    if let Some(error) = session.error() {
        out.push('\n');
        out.push_str(&format!("{}\n", error.headline().red().bold()));
        out.push_str(&format!("  {}\n", error.source.to_string().dimmed()));
    }
    out
}

fn step_header(step: u8) -> String {
    let title = match step {
        1 => "Upload your resume",
        2 => "Add a job description",
        _ => "Match analysis",
    };
    format!("{}\n\n", format!("Step {step} of 3 · {title}").bold())
}

/// Step 2: candidate card plus the prompt for a job description.
pub fn render_parsed(resume: &ResumeData) -> String {
    let mut out = String::new();
    let name = if resume.name.trim().is_empty() {
        "Candidate"
    } else {
        resume.name.as_str()
    };
    out.push_str(&format!("{}\n", name.bold()));
    push_contact(&mut out, resume);

    if !resume.skills.is_empty() {
        let shown: Vec<&str> = resume
            .skills
            .iter()
            .take(SKILL_PREVIEW)
            .map(String::as_str)
            .collect();
        out.push_str(&format!("Skills: {}", shown.join(", ")));
        if resume.skills.len() > SKILL_PREVIEW {
            out.push_str(&format!(" +{} more", resume.skills.len() - SKILL_PREVIEW));
        }
        out.push('\n');
    }

    if let Some(latest) = resume.latest_experience() {
        out.push_str(&format!("Latest: {} at {}\n", latest.role, latest.company));
    }

    out.push_str("\nPaste the job description you're interested in, and we'll tell you how well you fit.\n");
    out
}

/// Step 3: profile, score and the full breakdown.
pub fn render_matched(resume: &ResumeData, result: &MatchResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", resume.name.bold()));
    push_contact(&mut out, resume);
    if let Some(education) = resume.education.first() {
        out.push_str(&format!(
            "Education: {}, {} {}\n",
            education.degree, education.institution, education.year
        ));
    }

    out.push_str(&format!(
        "\nMatch score: {} {}\n",
        score_colored(result, &format!("{}%", result.percent())).bold(),
        score_colored(result, result.verdict().label())
    ));

    push_list(
        &mut out,
        &format!("Matching skills ({})", result.matching_skills.len()),
        &result.matching_skills,
    );
    push_list(
        &mut out,
        &format!("Missing skills ({})", result.missing_skills.len()),
        &result.missing_skills,
    );
    push_list(&mut out, "Strengths", &result.strengths);
    push_list(&mut out, "Areas to improve", &result.weaknesses);

    out.push_str(&format!("\n{}\n", "How to improve your resume".bold()));
    out.push_str(&render_markdown(&result.improvement_suggestions));
    out.push('\n');

    if !result.overall_feedback.trim().is_empty() {
        out.push_str(&format!("\n{}\n", "Overall feedback".bold()));
        out.push_str(&format!("{}\n", result.overall_feedback.trim()));
    }
    out
}

fn push_contact(out: &mut String, resume: &ResumeData) {
    let contact: Vec<&str> = [resume.email.as_str(), resume.phone.as_str()]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if !contact.is_empty() {
        out.push_str(&format!("{}\n", contact.join(" · ")));
    }
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    out.push_str(&format!("\n{}\n", title.bold()));
    if items.is_empty() {
        out.push_str(&format!("  {}\n", "none".dimmed()));
    }
    for item in items {
        out.push_str(&format!("  • {item}\n"));
    }
}

fn score_colored(result: &MatchResult, text: &str) -> ColoredString {
    match result.verdict() {
        Verdict::Strong => text.green(),
        Verdict::Moderate => text.yellow(),
        Verdict::Weak => text.red(),
    }
}

/// Renders markdown to plain terminal text: bullets for list items, bold for
/// headings and strong emphasis, indented code blocks.
pub fn render_markdown(markdown: &str) -> String {
    let mut out = String::new();
    // One entry per open list; `Some(n)` is the next number of an ordered list.
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut in_code_block = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::List(start)) => {
                ensure_newline(&mut out);
                lists.push(start);
            }
            Event::End(Tag::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                ensure_newline(&mut out);
                let indent = "  ".repeat(lists.len().saturating_sub(1));
                let marker = match lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}.");
                        *n += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                out.push_str(&format!("{indent}{marker} "));
            }
            Event::End(Tag::Item) => ensure_newline(&mut out),
            Event::Start(Tag::Heading(..)) | Event::Start(Tag::Strong) => bold += 1,
            Event::End(Tag::Heading(..)) => {
                bold = bold.saturating_sub(1);
                out.push_str("\n\n");
            }
            Event::End(Tag::Strong) => bold = bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => italic += 1,
            Event::End(Tag::Emphasis) => italic = italic.saturating_sub(1),
            Event::End(Tag::Paragraph) => {
                ensure_newline(&mut out);
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::CodeBlock(_)) => {
                ensure_newline(&mut out);
                in_code_block = true;
            }
            Event::End(Tag::CodeBlock(_)) => {
                in_code_block = false;
                out.push('\n');
            }
            Event::Text(text) if in_code_block => {
                for line in text.lines() {
                    out.push_str(&format!("    {line}\n"));
                }
            }
            Event::Text(text) => {
                let styled = if bold > 0 {
                    text.bold()
                } else if italic > 0 {
                    text.italic()
                } else {
                    text.normal()
                };
                out.push_str(&styled.to_string());
            }
            Event::Code(code) => out.push_str(&code.cyan().to_string()),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Rule => out.push_str("────────\n"),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

fn ensure_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
