//! Declarative, whitespace-tolerant text matchers.
//!
//! A [`Grammar`] is an ordered list of literal anchors separated by
//! whitespace or content gaps. It compiles into a single [`Regex`] that runs
//! over the whole file, so a match may span any number of lines.
//!
//! ```ignore
//! let matcher = Grammar::new()
//!     .literal("{%")
//!     .optional("-")
//!     .space()
//!     .keyword("endfor")
//!     .space()
//!     .literal("%}")
//!     .compile("endfor-tag")?;
//! ```

use crate::error::GrammarError;
use regex::Regex;
use std::ops::Range;

/// Minimum length (in chars) of the literal a grammar must contain.
pub const MIN_ANCHOR_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Exact text.
    Literal(String),
    /// Exact identifier that must not be glued to a neighbouring word.
    Keyword(String),
    /// Exact text that may be absent, such as a `-` trim marker.
    Optional(String),
    /// Zero or more whitespace characters.
    Space,
    /// One or more whitespace characters.
    Space1,
    /// Whitespace that contains at least one line break.
    LineBreak,
    /// Anything, across lines, as short as possible.
    Gap,
    /// Like [`Token::Gap`] but crossing at most this many line breaks.
    GapLines(usize),
}

impl Token {
    fn to_regex(&self) -> String {
        match self {
            Token::Literal(s) => regex::escape(s),
            Token::Keyword(s) => format!(r"\b{}\b", regex::escape(s)),
            Token::Optional(s) => format!("(?:{})?", regex::escape(s)),
            Token::Space => r"\s*".to_string(),
            Token::Space1 => r"\s+".to_string(),
            Token::LineBreak => r"\s*\n\s*".to_string(),
            Token::Gap => "((?s:.*?))".to_string(),
            Token::GapLines(max) => format!(r"((?:[^\n]*\n){{0,{max}}}?[^\n]*?)"),
        }
    }

    fn anchor(&self) -> Option<&str> {
        match self {
            Token::Literal(s) | Token::Keyword(s) if s.chars().count() >= MIN_ANCHOR_LEN => {
                Some(s.as_str())
            }
            _ => None,
        }
    }

    fn is_gap(&self) -> bool {
        matches!(self, Token::Gap | Token::GapLines(_))
    }
}

/// Builder for a tolerant multi-line matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    tokens: Vec<Token>,
}

impl Grammar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn literal(self, text: impl Into<String>) -> Self {
        self.push(Token::Literal(text.into()))
    }

    #[must_use]
    pub fn keyword(self, word: impl Into<String>) -> Self {
        self.push(Token::Keyword(word.into()))
    }

    #[must_use]
    pub fn optional(self, text: impl Into<String>) -> Self {
        self.push(Token::Optional(text.into()))
    }

    #[must_use]
    pub fn space(self) -> Self {
        self.push(Token::Space)
    }

    #[must_use]
    pub fn space1(self) -> Self {
        self.push(Token::Space1)
    }

    #[must_use]
    pub fn line_break(self) -> Self {
        self.push(Token::LineBreak)
    }

    #[must_use]
    pub fn gap(self) -> Self {
        self.push(Token::Gap)
    }

    #[must_use]
    pub fn gap_lines(self, max: usize) -> Self {
        self.push(Token::GapLines(max))
    }

    #[must_use]
    pub fn push(mut self, token: Token) -> Self {
        self.tokens.push(token);
        self
    }

    /// Compile into a [`Matcher`]. `rule` only names the grammar in errors.
    pub fn compile(&self, rule: &str) -> Result<Matcher, GrammarError> {
        let Some(lead_idx) = self.tokens.iter().position(|t| t.anchor().is_some()) else {
            return Err(GrammarError::NoAnchor {
                rule: rule.to_string(),
                min: MIN_ANCHOR_LEN,
            });
        };
        let lead = self.tokens[lead_idx].anchor().unwrap_or_default().to_string();

        let mut pattern = String::new();
        let mut guards = Vec::new();
        let mut group = 0usize;
        let mut last_anchor: Option<&str> = None;
        for (idx, token) in self.tokens.iter().enumerate() {
            if token.is_gap() {
                group += 1;
                let mut anchors = Vec::new();
                if idx > lead_idx {
                    anchors.push(lead.clone());
                }
                if let Some(prev) = last_anchor.filter(|a| *a != lead) {
                    anchors.push(prev.to_string());
                }
                if !anchors.is_empty() {
                    guards.push(GapGuard { group, anchors });
                }
            } else if let Some(anchor) = token.anchor() {
                last_anchor = Some(anchor);
            }
            pattern.push_str(&token.to_regex());
        }

        let regex = Regex::new(&pattern).map_err(|source| GrammarError::Regex {
            rule: rule.to_string(),
            source,
        })?;
        tracing::trace!(rule, %pattern, "compiled grammar");
        Ok(Matcher {
            regex,
            lead,
            guards,
        })
    }
}

/// Anchors a gap's capture group must not contain.
#[derive(Debug, Clone)]
struct GapGuard {
    group: usize,
    anchors: Vec<String>,
}

/// A compiled [`Grammar`].
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    lead: String,
    guards: Vec<GapGuard>,
}

impl Matcher {
    /// The first literal long enough to anchor the grammar.
    pub fn lead(&self) -> &str {
        &self.lead
    }

    /// Byte ranges of all non-overlapping matches, left to right.
    ///
    /// A gap may not contain the lead anchor nor a second copy of the anchor
    /// right before it. Such a candidate belongs to two different blocks, so it
    /// is dropped and the search resumes one char after its start.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        let mut pos = 0usize;
        while pos <= text.len() {
            let Some(caps) = self.regex.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let crossed = self.guards.iter().any(|guard| {
                caps.get(guard.group).is_some_and(|gap| {
                    guard
                        .anchors
                        .iter()
                        .any(|a| gap.as_str().contains(a.as_str()))
                })
            });
            if crossed {
                let step = text[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                tracing::trace!(at = whole.start(), "gap crosses an anchor");
                pos = whole.start() + step;
            } else {
                found.push(whole.range());
                // Matches are never empty: every grammar holds an anchor.
                pos = whole.end();
            }
        }
        found
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(word: &str) -> Grammar {
        Grammar::new()
            .literal("{%")
            .optional("-")
            .space()
            .keyword(word)
            .space()
            .literal("%}")
    }

    #[test]
    fn grammar_without_anchor_is_rejected() {
        let err = Grammar::new()
            .literal("{%")
            .space()
            .literal("%}")
            .compile("short")
            .unwrap_err();
        assert!(matches!(err, GrammarError::NoAnchor { .. }));
        assert!(err.to_string().contains("short"));
    }

    #[test]
    fn literals_are_escaped() {
        let m = Grammar::new()
            .literal("getComment(table).*")
            .compile("escaped")
            .unwrap();
        assert!(m.is_match("x.getComment(table).*;"));
        assert!(!m.is_match("getCommentXtableX.."));
    }

    #[test]
    fn optional_trim_marker_and_spacing_are_tolerated() {
        let m = tag("endfor").compile("endfor").unwrap();
        assert!(m.is_match("{%- endfor %}"));
        assert!(m.is_match("{% endfor %}"));
        assert!(m.is_match("{%endfor%}"));
        assert!(m.is_match("{%-   endfor   %}"));
        assert!(!m.is_match("{%- endfors %}"));
        assert!(!m.is_match("{%- end for %}"));
    }

    #[test]
    fn keyword_requires_word_boundary() {
        let m = Grammar::new()
            .keyword("commentLines")
            .compile("kw")
            .unwrap();
        assert!(m.is_match("for line in commentLines %}"));
        assert!(!m.is_match("for line in commentLinesX %}"));
        assert!(!m.is_match("for line in xcommentLines %}"));
    }

    #[test]
    fn line_break_requires_newline() {
        let m = Grammar::new()
            .literal("first()")
            .line_break()
            .literal("second()")
            .compile("lines")
            .unwrap();
        assert!(m.is_match("first()\n    second()"));
        assert!(m.is_match("first()  \r\n\tsecond()"));
        assert!(!m.is_match("first() second()"));
    }

    #[test]
    fn gap_is_non_greedy_and_spans_lines() {
        let m = Grammar::new()
            .literal("begin!")
            .gap()
            .literal("end!")
            .compile("gap")
            .unwrap();
        let text = "begin!\na\nb\nend! middle begin! x end!";
        let ranges = m.find_all(text);
        assert_eq!(ranges.len(), 2);
        assert_eq!(&text[ranges[0].clone()], "begin!\na\nb\nend!");
        assert_eq!(&text[ranges[1].clone()], "begin! x end!");
    }

    #[test]
    fn gap_does_not_swallow_another_lead_anchor() {
        let m = Grammar::new()
            .literal("// marker")
            .gap()
            .literal("tail();")
            .compile("guard")
            .unwrap();
        let text = "// marker\norphan();\n\n// marker\nbody();\ntail();\n";
        let ranges = m.find_all(text);
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "// marker\nbody();\ntail();");
    }

    #[test]
    fn gap_does_not_swallow_the_anchor_before_it() {
        let m = Grammar::new()
            .literal("// marker")
            .line_break()
            .literal("open(block)")
            .gap()
            .literal("tail();")
            .compile("guard")
            .unwrap();
        let text = "// marker\nopen(block)\nother();\nopen(block)\ntail();\n";
        assert!(m.find_all(text).is_empty());
    }

    #[test]
    fn rejected_candidate_does_not_hide_a_match_before_the_lead() {
        let m = Grammar::new()
            .literal("x")
            .space()
            .literal("begin!")
            .gap()
            .literal("end!")
            .compile("prefix")
            .unwrap();
        let text = "x begin! a x begin! b end!";
        let ranges = m.find_all(text);
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "x begin! b end!");
    }

    #[test]
    fn bounded_gap_stops_at_line_limit() {
        let m = Grammar::new()
            .literal("start!")
            .gap_lines(2)
            .literal("stop!")
            .compile("bounded")
            .unwrap();
        assert!(m.is_match("start!\n1\n2 stop!"));
        assert!(!m.is_match("start!\n1\n2\n3\nstop!"));
    }

    #[test]
    fn lead_is_first_long_literal() {
        let m = tag("commentLines").compile("lead").unwrap();
        assert_eq!(m.lead(), "commentLines");
    }
}
