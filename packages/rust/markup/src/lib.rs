//! Markup detection and plain-text promotion for the webhook pipeline.
//!
//! The remote service may answer with already-structured HTML or with bare
//! text. The editor this pipeline feeds expects markup, so plain-text
//! responses are promoted deterministically: paragraphs from blank-line
//! separated blocks, `<br>` for line breaks within a paragraph. Text that
//! already carries a start tag passes through unchanged, which makes
//! promotion idempotent.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Case-insensitive HTML start-tag pattern: `<`, a letter, anything, `>`.
static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[a-z].*>").expect("valid regex"));

/// Runs of two-or-more newlines separate paragraph candidates.
static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("valid regex"));

/// Check whether `text` contains HTML markup.
pub fn contains_html(text: &str) -> bool {
    HTML_TAG_RE.is_match(text)
}

/// Promote plain text to paragraph markup; pass existing markup through.
///
/// Paragraph candidates come from splitting on runs of two-or-more newlines;
/// each is trimmed, empty candidates are dropped, single newlines inside a
/// surviving candidate become `<br>`, and each candidate is wrapped in
/// `<p>…</p>` with no separator between paragraphs.
pub fn promote(text: &str) -> String {
    if contains_html(text) {
        debug!("input already contains markup, passing through");
        return text.to_string();
    }

    let html: String = PARAGRAPH_BREAK_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", p.replace('\n', "<br>")))
        .collect();

    debug!(input_len = text.len(), output_len = html.len(), "promoted plain text");
    html
}

// ---------------------------------------------------------------------------
// Plain-text recovery
// ---------------------------------------------------------------------------

static BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));

static BLOCK_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(?:p|div|h[1-6]|li|blockquote|pre)>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static EXCESS_BLANK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Recover plain text from markup, the inverse of [`promote`].
///
/// `<br>` becomes a newline, block-element boundaries become blank lines,
/// all remaining tags are stripped, and the handful of entities the editor
/// emits are decoded.
pub fn to_plain_text(markup: &str) -> String {
    let text = BR_RE.replace_all(markup, "\n");
    let text = BLOCK_END_RE.replace_all(&text, "\n\n");
    let text = TAG_RE.replace_all(&text, "");

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    EXCESS_BLANK_RE
        .replace_all(text.trim(), "\n\n")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_html_start_tags() {
        assert!(contains_html("<p>hello</p>"));
        assert!(contains_html("before <DIV class=\"x\"> after"));
        assert!(contains_html("multi\n<span\n>line"));
        assert!(!contains_html("plain text only"));
        assert!(!contains_html("math: 3 < 4 and 5 > 2"));
    }

    #[test]
    fn promotes_single_paragraph() {
        assert_eq!(promote("Hello world"), "<p>Hello world</p>");
    }

    #[test]
    fn promotes_blank_line_separated_paragraphs() {
        let input = "First paragraph.\n\nSecond paragraph.\n\n\nThird.";
        assert_eq!(
            promote(input),
            "<p>First paragraph.</p><p>Second paragraph.</p><p>Third.</p>"
        );
    }

    #[test]
    fn single_newlines_become_line_breaks() {
        let input = "line one\nline two\n\nnext paragraph";
        assert_eq!(
            promote(input),
            "<p>line one<br>line two</p><p>next paragraph</p>"
        );
    }

    #[test]
    fn trims_and_drops_empty_candidates() {
        let input = "  padded  \n\n   \n\nlast";
        assert_eq!(promote(input), "<p>padded</p><p>last</p>");
    }

    #[test]
    fn existing_markup_passes_through_unchanged() {
        let input = "<p>Already marked up</p>";
        assert_eq!(promote(input), input);

        let mixed = "<h1>Title</h1>\n\n<p>Body</p>";
        assert_eq!(promote(mixed), mixed);
    }

    #[test]
    fn promotion_is_idempotent() {
        let once = promote("para one\n\npara two");
        let twice = promote(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn plain_text_recovery_inverts_promotion() {
        let markup = promote("first\nsecond\n\nthird");
        assert_eq!(to_plain_text(&markup), "first\nsecond\n\nthird");
    }

    #[test]
    fn plain_text_strips_unknown_tags_and_entities() {
        let markup = "<p><strong>Bold</strong> &amp; <em>italic</em></p>";
        assert_eq!(to_plain_text(markup), "Bold & italic");
    }
}
