//! Stock rule sets for the comment simplification jobs.

use super::grammar::Grammar;
use super::{PatternRule, RuleSet};
use crate::error::GrammarError;

/// Marker comment that opens the legacy comment-lines block in generators.
pub const GENERATOR_COMMENT_MARKER: &str = "// 准备注释行";

pub const GENERATOR_COMMENT_REPLACEMENT: &str =
    r#"resultContext.putContext(tag, "Comment", SqlSchemaUtils.getComment(table))"#;

pub const TEMPLATE_COMMENT_REPLACEMENT: &str = " * {{ Comment }}";

/// Upper bound on the lines between the `commentLines` declaration and the
/// `with(context)` block.
const GENERATOR_BLOCK_MAX_LINES: usize = 24;

/// Collapses the split/trim/filter `commentLines` block of an aggregate
/// generator into a single `putContext(tag, "Comment", ...)` call.
pub fn generator_comment_rules() -> Result<RuleSet, GrammarError> {
    let grammar = Grammar::new()
        .literal(GENERATOR_COMMENT_MARKER)
        .line_break()
        .keyword("val")
        .space1()
        .keyword("commentLines")
        .space()
        .literal("=")
        .space()
        .literal("SqlSchemaUtils.getComment(table)")
        .gap_lines(GENERATOR_BLOCK_MAX_LINES)
        .literal("with(context)")
        .space()
        .literal("{")
        .line_break()
        .literal("resultContext.putContext(tag,")
        .space()
        .literal(r#""commentLines","#)
        .space()
        .literal("commentLines)")
        .line_break()
        .literal("}");

    RuleSet::new(vec![PatternRule::new(
        "generator-comment-lines",
        &grammar,
        GENERATOR_COMMENT_REPLACEMENT,
    )?])
}

/// Replaces the `for line in commentLines` loop of templates with a single
/// ` * {{ Comment }}` line. The first rule accepts `{%-` and `{%` tags, the
/// second only the plain spacing.
pub fn template_comment_rules() -> Result<RuleSet, GrammarError> {
    RuleSet::new(vec![
        PatternRule::new(
            "template-comment-loop-trimmed",
            &comment_loop(true),
            TEMPLATE_COMMENT_REPLACEMENT,
        )?,
        PatternRule::new(
            "template-comment-loop-plain",
            &comment_loop(false),
            TEMPLATE_COMMENT_REPLACEMENT,
        )?,
    ])
}

fn comment_loop(trim: bool) -> Grammar {
    let open = |g: Grammar| {
        let g = g.literal("{%");
        if trim { g.optional("-") } else { g }
    };
    let close = |g: Grammar| {
        let g = g.space();
        let g = if trim { g.optional("-") } else { g };
        g.literal("%}")
    };

    let g = open(Grammar::new())
        .space()
        .keyword("for")
        .space1()
        .keyword("line")
        .space1()
        .keyword("in")
        .space1()
        .keyword("commentLines");
    let g = close(g)
        .line_break()
        .literal("*")
        .space()
        .literal("{{")
        .space()
        .keyword("line")
        .space()
        .literal("}}")
        .line_break();
    let g = open(g).space().keyword("endfor");
    close(g)
}
