// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Share text and intent URLs for a looked-up book.

use std::fmt;
use std::str::FromStr;

use bookscan_core::{BookInfo, Locale};
use reqwest::Url;
use serde::{Deserialize, Serialize};

const X_INTENT_URL: &str = "https://twitter.com/intent/tweet";
const SLACK_SHARE_URL: &str = "https://slack.com/intl/ja-jp/shared";

/// Where share output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    /// Plain text (clipboard or stdout).
    Text,
    /// X (Twitter) web intent.
    X,
    Slack,
}

impl ShareTarget {
    /// Render `text` for this target: the text itself or an intent URL.
    pub fn render(&self, text: &str) -> String {
        match self {
            Self::Text => text.to_string(),
            Self::X => x_intent_url(text),
            Self::Slack => slack_share_url(text),
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::X => "x",
            Self::Slack => "slack",
        })
    }
}

impl FromStr for ShareTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "x" | "twitter" => Ok(Self::X),
            "slack" => Ok(Self::Slack),
            other => Err(format!("unknown share target '{other}' (expected text, x or slack)")),
        }
    }
}

/// Multi-line share text for `book`.
///
/// Title, authors and ISBN are always present; publisher and publication date
/// only when the record has them.
pub fn share_text(book: &BookInfo, locale: Locale) -> String {
    let (publisher_label, date_label) = match locale {
        Locale::Ja => ("出版社", "発行年"),
        Locale::En => ("Publisher", "Published"),
    };

    let mut lines = vec![
        format!("📚 {}", book.title),
        format!("👤 {}", book.authors.join(", ")),
        format!("🔖 ISBN: {}", book.isbn),
    ];
    if let Some(publisher) = book.publisher.as_deref().filter(|p| !p.is_empty()) {
        lines.push(format!("📖 {publisher_label}: {publisher}"));
    }
    if let Some(date) = book.published_date.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("📅 {date_label}: {date}"));
    }
    lines.join("\n")
}

fn with_text(base: &str, text: &str) -> String {
    match Url::parse_with_params(base, &[("text", text)]) {
        Ok(url) => url.into(),
        // Both bases are constants that parse.
        Err(_) => base.to_string(),
    }
}

/// X (Twitter) web intent URL pre-filled with `text`.
pub fn x_intent_url(text: &str) -> String {
    with_text(X_INTENT_URL, text)
}

/// Slack share URL pre-filled with `text`.
pub fn slack_share_url(text: &str) -> String {
    with_text(SLACK_SHARE_URL, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookscan_core::Isbn;

    fn book() -> BookInfo {
        BookInfo {
            isbn: Isbn::from_normalized("9784123456789").unwrap(),
            title: "サンプル書籍".into(),
            authors: vec!["著者A".into(), "著者B".into()],
            description: None,
            image_url: None,
            published_date: Some("2023-01-01".into()),
            publisher: Some("出版社名".into()),
            page_count: None,
        }
    }

    #[test]
    fn japanese_share_text() {
        assert_eq!(
            share_text(&book(), Locale::Ja),
            "📚 サンプル書籍\n👤 著者A, 著者B\n🔖 ISBN: 9784123456789\n📖 出版社: 出版社名\n📅 発行年: 2023-01-01"
        );
    }

    #[test]
    fn optional_lines_are_omitted() {
        let mut book = book();
        book.publisher = None;
        book.published_date = None;
        let text = share_text(&book, Locale::En);
        assert_eq!(text.lines().count(), 3);
        assert!(!text.contains("Publisher"));
    }

    #[test]
    fn english_labels() {
        let text = share_text(&book(), Locale::En);
        assert!(text.contains("📖 Publisher: 出版社名"));
        assert!(text.contains("📅 Published: 2023-01-01"));
    }

    #[test]
    fn intent_urls_encode_text() {
        let url = x_intent_url("📚 本\nISBN: 978");
        assert!(url.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(!url.contains('\n'));
        let parsed = Url::parse(&url).unwrap();
        let (_, text) = parsed.query_pairs().next().unwrap();
        assert_eq!(text, "📚 本\nISBN: 978");

        assert!(slack_share_url("a&b").starts_with("https://slack.com/intl/ja-jp/shared?text=a%26b"));
    }

    #[test]
    fn share_target_parses_and_renders() {
        assert_eq!("X".parse::<ShareTarget>().unwrap(), ShareTarget::X);
        assert!("mastodon".parse::<ShareTarget>().is_err());
        assert_eq!(ShareTarget::Text.render("hi"), "hi");
        assert!(ShareTarget::Slack.render("hi").ends_with("text=hi"));
    }
}
