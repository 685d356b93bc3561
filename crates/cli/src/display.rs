//! Console rendering of processed articles.

use colored::Colorize;
use newsgenie_core::models::Article;
use std::io::{self, Write};

const TITLE_WIDTH: usize = 60;

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

pub fn render_articles<W: Write>(
    out: &mut W,
    articles: &[Article],
    full_content: bool,
) -> io::Result<()> {
    if articles.is_empty() {
        writeln!(out, "{}", "No articles found".yellow())?;
        return Ok(());
    }

    render_table(out, articles)?;

    writeln!(out, "\n{}", "Article Details:".bold())?;
    for (i, article) in articles.iter().enumerate() {
        let n = i + 1;
        writeln!(out, "\n{}", format!("{}. {}", n, article.title).cyan().bold())?;
        writeln!(out, "   {} {}", "Source:".yellow(), article.source)?;
        if let Some(author) = &article.author {
            writeln!(out, "   {} {}", "Author:".yellow(), author)?;
        }
        if let Some(description) = &article.description {
            writeln!(out, "   {} {}", "Description:".yellow(), description)?;
        }
        writeln!(out, "   {} {}", "Published:".yellow(), article.published_at)?;
        writeln!(out, "   {} {}", "URL:".yellow(), article.url)?;
        if let Some(image) = &article.url_to_image {
            writeln!(out, "   {} {}", "Image:".yellow(), image)?;
        }

        if full_content {
            if let Some(content) = article.content.as_deref().filter(|c| !c.is_empty()) {
                writeln!(out, "   {} {}", "Content:".yellow(), content)?;
            }
        } else if let Some(preview) = article.content_preview() {
            writeln!(out, "   {} {}", "Content Preview:".yellow(), preview.text)?;
            if preview.truncated {
                writeln!(
                    out,
                    "   {}",
                    "(Full content available with --full-content flag)".dimmed()
                )?;
            }
        }
        writeln!(out, "   ---")?;
    }
    Ok(())
}

fn render_table<W: Write>(out: &mut W, articles: &[Article]) -> io::Result<()> {
    let rows: Vec<[String; 4]> = articles
        .iter()
        .enumerate()
        .map(|(i, a)| {
            [
                (i + 1).to_string(),
                clip(&a.title, TITLE_WIDTH),
                a.source.clone(),
                a.published_at.clone(),
            ]
        })
        .collect();

    let headers = ["#", "Title", "Source", "Published"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    writeln!(out, "{}", "News Articles Summary".bold())?;
    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad(h, *w))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", header_line.bold())?;
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    writeln!(out, "{}", "─".repeat(rule_len))?;

    for row in &rows {
        writeln!(
            out,
            "{}  {}  {}  {}",
            pad(&row[0], widths[0]).cyan(),
            pad(&row[1], widths[1]).green(),
            pad(&row[2], widths[2]).yellow(),
            pad(&row[3], widths[3]).magenta()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_marks_cut_titles() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefghijkl", 5), "abcd…");
        assert_eq!(clip("أخبار اليوم", 6).chars().count(), 6);
    }

    #[test]
    fn detail_heading_keeps_colour_across_title() {
        colored::control::set_override(true);
        let article = Article {
            title: "قمة".into(),
            source: "BBC".into(),
            source_id: None,
            author: None,
            description: None,
            url: "https://example.com".into(),
            url_to_image: None,
            published_at: String::new(),
            content: None,
        };
        let mut buf = Vec::new();
        render_articles(&mut buf, &[article], false).unwrap();
        colored::control::unset_override();

        let out = String::from_utf8(buf).unwrap();
        let heading = out
            .lines()
            .find(|l| l.contains("1. قمة"))
            .expect("detail heading");
        assert!(heading.starts_with("\x1b["));
        assert!(heading.contains("36"));
        assert_eq!(heading.matches("\x1b[0m").count(), 1);
        assert!(heading.ends_with("1. قمة\x1b[0m"));
    }
}
