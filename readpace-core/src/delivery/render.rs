//! HTML rendering of a daily reading

use super::DailyReading;
use crate::text::PARAGRAPH_SEPARATOR;
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static RE_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());

const STYLE: &str = "body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; }
        .header { background-color: #f8f9fa; padding: 20px; border-radius: 5px; margin-bottom: 20px; }
        .title { color: #2c3e50; font-size: 24px; font-weight: bold; margin-bottom: 10px; }
        .stats { color: #6c757d; margin-bottom: 5px; }
        .content { background-color: #ffffff; padding: 20px; border: 1px solid #dee2e6; border-radius: 5px; margin: 20px 0; }
        .footer { text-align: center; color: #6c757d; font-size: 12px; margin-top: 30px; padding-top: 20px; border-top: 1px solid #dee2e6; }";

/// Subject line for a reading day
pub fn render_subject(book_title: &str, day: u32) -> String {
    format!("Daily Reading: {} - Day {}", book_title, day)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Render unit content as HTML paragraphs.
///
/// `## ` paragraphs become upper-case `<h2>` headings; inside paragraphs,
/// line breaks fold to spaces and `**strong**` / `*emphasis*` markers become
/// tags.
pub fn format_content(content: &str) -> String {
    content
        .split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|paragraph| match paragraph.strip_prefix("## ") {
            Some(heading) => format!(
                r#"<h2 style="color: #2c3e50; margin-top: 20px; margin-bottom: 15px; font-size: 18px; font-weight: bold;">{}</h2>"#,
                escape(&heading.trim().to_uppercase())
            ),
            None => {
                let text = escape(&paragraph.replace('\n', " "));
                let text = RE_STRONG.replace_all(&text, "<strong>$1</strong>");
                let text = RE_EMPHASIS.replace_all(&text, "<em>$1</em>");
                format!(
                    r#"<p style="margin-bottom: 15px; line-height: 1.6;">{}</p>"#,
                    text
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full HTML body for a reading day
pub fn render_html(reading: &DailyReading<'_>, sent_at: DateTime<Local>) -> String {
    let title = escape(reading.book_title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <style>
        {style}
    </style>
</head>
<body>
    <div class="header">
        <div class="title">Daily Reading: {title}</div>
        <div class="stats">Day {day}</div>
        <div class="stats">Progress: {position}/{total} ({pct:.1}%)</div>
        <div class="stats">Reading time: {minutes:.1} minutes</div>
        <div class="stats">Words: {words}</div>
    </div>

    <div class="content">
        {content}
    </div>

    <div class="footer">
        <p>Happy reading!</p>
        <p>Sent by readpace<br>
        {sent}</p>
    </div>
</body>
</html>"#,
        style = STYLE,
        title = title,
        day = reading.day,
        position = reading.position,
        total = reading.total_units,
        pct = reading.percentage(),
        minutes = reading.unit.estimated_minutes(),
        words = reading.unit.word_count(),
        content = format_content(reading.unit.content()),
        sent = sent_at.format("%Y-%m-%d %H:%M:%S"),
    )
}
