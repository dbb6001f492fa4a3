//! Inline markup translation for assistant replies.
//!
//! Replies support a deliberately tiny dialect: `**bold**`, `*italic*`,
//! and line breaks (both real newlines and literal `\n` sequences).
//! Input is parsed into spans before any styling is applied, so text
//! inside one span is never re-scanned for markers. User and error
//! messages are rendered verbatim and never pass through here.

/// A parsed piece of an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Literal text.
    Text(String),
    /// `**bold**` text.
    Bold(String),
    /// `*italic*` text.
    Italic(String),
    /// A line break.
    LineBreak,
}

/// ANSI escape code for bold text.
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for italic text.
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Parses markup into spans.
///
/// Unterminated markers are kept as literal text. Bold is matched before
/// italic, so `**` is never consumed as two italic markers.
pub fn parse(content: &str) -> Vec<Span> {
    let chars: Vec<char> = content.chars().collect();
    let mut spans = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    let flush = |literal: &mut String, spans: &mut Vec<Span>| {
        if !literal.is_empty() {
            spans.push(Span::Text(std::mem::take(literal)));
        }
    };

    while i < chars.len() {
        // Literal backslash-n sequences break lines too.
        if chars[i] == '\\' && i + 1 < chars.len() && chars[i + 1] == 'n' {
            flush(&mut literal, &mut spans);
            spans.push(Span::LineBreak);
            i += 2;
            continue;
        }
        if chars[i] == '\n' {
            flush(&mut literal, &mut spans);
            spans.push(Span::LineBreak);
            i += 1;
            continue;
        }
        if chars[i] == '*' {
            if i + 1 < chars.len() && chars[i + 1] == '*' {
                if let Some(close) = find_double_star(&chars, i + 2) {
                    flush(&mut literal, &mut spans);
                    spans.push(Span::Bold(chars[i + 2..close].iter().collect()));
                    i = close + 2;
                    continue;
                }
            } else if let Some(close) = find_single_star(&chars, i + 1) {
                flush(&mut literal, &mut spans);
                spans.push(Span::Italic(chars[i + 1..close].iter().collect()));
                i = close + 1;
                continue;
            }
        }
        literal.push(chars[i]);
        i += 1;
    }
    flush(&mut literal, &mut spans);
    spans
}

/// Finds the next `**` at or after `from`, requiring non-empty contents.
fn find_double_star(chars: &[char], from: usize) -> Option<usize> {
    let mut i = from;
    while i + 1 < chars.len() {
        if chars[i] == '*' && chars[i + 1] == '*' {
            if i > from {
                return Some(i);
            }
            return None;
        }
        i += 1;
    }
    None
}

/// Finds the next `*` at or after `from`, requiring non-empty, star-free
/// contents.
fn find_single_star(chars: &[char], from: usize) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '*' {
            if i > from {
                return Some(i);
            }
            return None;
        }
        i += 1;
    }
    None
}

/// Renders spans to a terminal string.
///
/// With color, bold and italic become ANSI styles; without, markers are
/// dropped and the plain text remains.
pub fn render_ansi(spans: &[Span], use_color: bool) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(text),
            Span::Bold(text) => {
                if use_color {
                    out.push_str(ANSI_BOLD);
                    out.push_str(text);
                    out.push_str(ANSI_RESET);
                } else {
                    out.push_str(text);
                }
            }
            Span::Italic(text) => {
                if use_color {
                    out.push_str(ANSI_ITALIC);
                    out.push_str(text);
                    out.push_str(ANSI_RESET);
                } else {
                    out.push_str(text);
                }
            }
            Span::LineBreak => out.push('\n'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(parse("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn bold_parsed() {
        assert_eq!(
            parse("a **strong** word"),
            vec![
                text("a "),
                Span::Bold("strong".to_string()),
                text(" word"),
            ]
        );
    }

    #[test]
    fn italic_parsed() {
        assert_eq!(
            parse("an *emphasized* word"),
            vec![
                text("an "),
                Span::Italic("emphasized".to_string()),
                text(" word"),
            ]
        );
    }

    #[test]
    fn bold_wins_over_italic() {
        assert_eq!(parse("**x**"), vec![Span::Bold("x".to_string())]);
    }

    #[test]
    fn line_breaks_both_forms() {
        assert_eq!(
            parse("one\ntwo\\nthree"),
            vec![
                text("one"),
                Span::LineBreak,
                text("two"),
                Span::LineBreak,
                text("three"),
            ]
        );
    }

    #[test]
    fn unterminated_markers_stay_literal() {
        assert_eq!(parse("2 * 3 = 6"), vec![text("2 * 3 = 6")]);
        assert_eq!(parse("**half open"), vec![text("**half open")]);
    }

    #[test]
    fn span_contents_not_rescanned() {
        // Markers inside a parsed span are inert text, no double styling.
        let spans = parse("**a*b**");
        assert_eq!(spans, vec![Span::Bold("a*b".to_string())]);
    }

    #[test]
    fn render_with_color() {
        let spans = parse("**hi**");
        let out = render_ansi(&spans, true);
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("hi"));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn render_without_color_drops_markers() {
        let spans = parse("**hi** *there*\\nfriend");
        assert_eq!(render_ansi(&spans, false), "hi there\nfriend");
    }
}
