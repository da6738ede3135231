use serde::Serialize;

use crate::encode::encode;
use crate::style::StyleSet;

use super::{ResolvedChar, Rule, Step};

/// Diagnostic result for one input string.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub text: String,
    pub steps: usize,
    pub chars: Vec<ExplainedChar>,
    /// Encoded output, as `Resolver::annotate` would return it.
    pub annotated: String,
}

/// A resolved character with the rule that decided it.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedChar {
    pub ch: char,
    pub style: StyleSet,
    pub rule: Rule,
    /// Index of the step that produced this character.
    pub step: usize,
    /// Emitted by an earlier character's step rather than resolved on its own.
    pub consumed: bool,
    /// The step blocked context fusion for the following step.
    pub suppress_fusion: bool,
}

impl Explanation {
    pub fn resolved(&self) -> Vec<ResolvedChar> {
        self.chars
            .iter()
            .map(|c| ResolvedChar {
                ch: c.ch,
                style: c.style,
            })
            .collect()
    }
}

pub(super) fn build(text: &str, steps: Vec<Step>) -> Explanation {
    let step_count = steps.len();
    let mut chars = Vec::new();
    for (index, step) in steps.into_iter().enumerate() {
        for (offset, rc) in step.resolved.into_iter().enumerate() {
            chars.push(ExplainedChar {
                ch: rc.ch,
                style: rc.style,
                rule: step.rule,
                step: index,
                consumed: offset > 0,
                suppress_fusion: step.suppress_fusion,
            });
        }
    }
    let mut explanation = Explanation {
        text: text.to_string(),
        steps: step_count,
        chars,
        annotated: String::new(),
    };
    explanation.annotated = encode(&explanation.resolved());
    explanation
}

/// Format an Explanation as human-readable text.
pub fn format_text(explanation: &Explanation) -> String {
    use unicode_width::UnicodeWidthChar;
    let mut out = String::new();

    out.push_str(&format!(
        "=== \"{}\" ({} chars, {} steps) ===\n",
        explanation.text,
        explanation.chars.len(),
        explanation.steps,
    ));

    for c in &explanation.chars {
        let pad_width: usize = 4;
        let display_width = UnicodeWidthChar::width(c.ch).unwrap_or(0);
        let label = if c.ch.is_control() {
            c.ch.escape_default().to_string()
        } else {
            format!("{}{}", c.ch, " ".repeat(pad_width.saturating_sub(display_width)))
        };
        let mut notes = Vec::new();
        if c.consumed {
            notes.push("consumed");
        }
        if c.suppress_fusion && !c.consumed {
            notes.push("blocks next");
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!("  ({})", notes.join(", "))
        };
        out.push_str(&format!(
            "  step {:<3} {} {}  {}{}\n",
            c.step, label, c.style, c.rule, notes,
        ));
    }

    out.push_str(&format!("\n  annotated: {}\n", explanation.annotated));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::testutil::sample_resolver;

    #[test]
    fn explain_reports_rules() {
        let resolver = sample_resolver();
        let e = resolver.explain("銀行業");

        assert_eq!(e.text, "銀行業");
        assert_eq!(e.chars.len(), 3);
        assert_eq!(e.chars[0].rule, Rule::Unlisted);
        assert_eq!(e.chars[1].rule, Rule::PrecedingPattern);
        assert_eq!(e.chars[1].style, StyleSet::SS01);
        assert!(!e.chars[1].consumed);
    }

    #[test]
    fn explain_marks_consumed_chars() {
        let resolver = sample_resolver();
        let e = resolver.explain("不要");

        assert_eq!(e.steps, 1);
        assert_eq!(e.chars[0].rule, Rule::Sandhi);
        assert!(e.chars[1].consumed);
        assert_eq!(e.chars[1].step, 0);
    }

    #[test]
    fn explain_matches_resolve() {
        let resolver = sample_resolver();
        for text in ["一會兒", "行行重行行", "很多長城", "abc", ""] {
            let e = resolver.explain(text);
            assert_eq!(e.resolved(), resolver.resolve(text), "{text}");
            assert_eq!(e.annotated, resolver.annotate(text), "{text}");
        }
    }

    #[test]
    fn explain_serializes_text_forms() {
        let resolver = sample_resolver();
        let json = serde_json::to_value(resolver.explain("不要")).unwrap();
        assert_eq!(json["chars"][0]["style"], "ss01");
        assert_eq!(json["chars"][0]["rule"], "sandhi");
        assert_eq!(json["chars"][1]["ch"], "要");
    }

    #[test]
    fn format_text_lists_every_char() {
        let resolver = sample_resolver();
        let text = format_text(&resolver.explain("行行出狀元"));
        assert!(text.contains("5 chars, 2 steps"), "{text}");
        assert!(text.contains("special_pair"));
        assert!(text.contains("consumed"));
        assert!(text.contains("annotated:"));
    }

    #[test]
    fn format_text_pads_by_display_width() {
        let resolver = sample_resolver();
        let text = format_text(&resolver.explain("a行"));
        assert!(text.contains("step 0   a    0000"), "{text}");
        assert!(text.contains("step 1   行   0000"), "{text}");
    }
}
