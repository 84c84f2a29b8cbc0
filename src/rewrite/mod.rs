//! Rule-driven text rewriting.
//!
//! A [`RuleSet`] is an ordered list of [`PatternRule`]s. Applying it is a
//! pure text-to-text transform: matched regions are replaced with the rule's
//! literal replacement and every other byte is copied through untouched.

pub mod driver;
pub mod grammar;
pub mod rules;

use crate::error::{GrammarError, RewriteError};
use grammar::{Grammar, Matcher};
use std::ops::Range;

/// A matcher paired with the literal text that replaces each match.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: String,
    matcher: Matcher,
    replacement: String,
}

impl PatternRule {
    pub fn new(
        name: impl Into<String>,
        grammar: &Grammar,
        replacement: impl Into<String>,
    ) -> Result<Self, GrammarError> {
        let name = name.into();
        let matcher = grammar.compile(&name)?;
        Ok(Self {
            name,
            matcher,
            replacement: replacement.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

/// Result of applying a [`RuleSet`] to one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// `(rule name, matches rewritten)` for every rule that matched.
    pub hits: Vec<(String, usize)>,
    pub changed: bool,
}

impl Rewrite {
    pub fn total_hits(&self) -> usize {
        self.hits.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    /// Rejects rule sets where a replacement would itself be matched again,
    /// which would break idempotency.
    pub fn new(rules: Vec<PatternRule>) -> Result<Self, GrammarError> {
        for rule in &rules {
            if let Some(by) = rules
                .iter()
                .find(|other| other.matcher.is_match(&rule.replacement))
            {
                return Err(GrammarError::Reapplies {
                    rule: rule.name.clone(),
                    by: by.name.clone(),
                });
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Apply every rule in order, each against the output of the previous one.
    pub fn apply(&self, text: &str) -> Result<Rewrite, RewriteError> {
        let mut current = text.to_string();
        let mut hits = Vec::new();

        for rule in &self.rules {
            let ranges = rule.matcher.find_all(&current);
            if ranges.is_empty() {
                continue;
            }
            tracing::debug!(rule = %rule.name, matches = ranges.len(), "rule matched");
            current = splice(&current, &ranges, &rule.replacement);
            hits.push((rule.name.clone(), ranges.len()));
        }

        let changed = current != text;
        if changed {
            if let Some(rule) = self.rules.iter().find(|r| r.matcher.is_match(&current)) {
                return Err(RewriteError::Pattern {
                    rule: rule.name.clone(),
                });
            }
        }

        Ok(Rewrite {
            text: current,
            hits,
            changed,
        })
    }
}

fn splice(text: &str, ranges: &[Range<usize>], replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0usize;
    for range in ranges {
        out.push_str(&text[last..range.start]);
        out.push_str(replacement);
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}
