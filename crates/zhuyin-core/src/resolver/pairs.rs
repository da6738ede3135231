use super::tables::{special_pair, PairContext, PairRefinement};
use super::{Cursor, ResolvedChar, Rule, Step};

fn applies(refinement: &PairRefinement, cursor: &Cursor<'_>) -> bool {
    match refinement.context {
        PairContext::Following(text) => cursor.matches_at(2, text),
        PairContext::Preceding(set) => cursor.prev().is_some_and(|p| set.contains(&p)),
    }
}

/// Resolve a reduplicated pair at the cursor, if the table lists it.
///
/// Both characters get the same style. A matching refinement may also
/// consume the characters after the pair.
pub(super) fn resolve(cursor: &Cursor<'_>) -> Option<Step> {
    let ch = cursor.current();
    let next = cursor.next()?;
    let rule = special_pair(ch, next)?;

    let (style, trailing) = match rule.refinements.iter().find(|r| applies(r, cursor)) {
        Some(r) => (r.style, r.trailing),
        None => (rule.base, &[][..]),
    };

    let mut resolved = vec![ResolvedChar { ch, style }, ResolvedChar { ch: next, style }];
    for (offset, &style) in trailing.iter().enumerate() {
        // Following refinements only match when these characters exist.
        if let Some(ch) = cursor.peek(2 + offset) {
            resolved.push(ResolvedChar { ch, style });
        }
    }
    Some(Step {
        resolved,
        suppress_fusion: true,
        rule: Rule::SpecialPair,
    })
}
