use crate::resolver::testutil::sample_resolver;
use crate::resolver::{Rule, Step};

fn walk(text: &str) -> Vec<Step> {
    let chars: Vec<char> = text.chars().collect();
    sample_resolver().walk(&chars)
}

fn summary(steps: &[Step]) -> Vec<(Rule, usize, bool)> {
    steps
        .iter()
        .map(|s| (s.rule, s.consumed(), s.suppress_fusion))
        .collect()
}

#[test]
fn empty_input() {
    assert!(walk("").is_empty());
    assert!(sample_resolver().resolve("").is_empty());
    assert_eq!(sample_resolver().annotate(""), "");
}

#[test]
fn non_hanzi_blocks_fusion() {
    assert_eq!(
        summary(&walk("a。")),
        vec![(Rule::NonHanzi, 1, true), (Rule::NonHanzi, 1, true)]
    );
}

#[test]
fn idiom_suppression() {
    assert_eq!(summary(&walk("一部")), vec![(Rule::SandhiIdiom, 2, false)]);
    assert_eq!(summary(&walk("一會兒")), vec![(Rule::SandhiIdiom, 3, false)]);
    assert_eq!(summary(&walk("不得不")), vec![(Rule::SandhiIdiom, 3, true)]);
    assert_eq!(summary(&walk("不一定")), vec![(Rule::SandhiIdiom, 3, true)]);
}

#[test]
fn sandhi_steps() {
    assert_eq!(summary(&walk("不要")), vec![(Rule::Sandhi, 2, true)]);
    assert_eq!(
        summary(&walk("我一個")),
        vec![
            (Rule::Unlisted, 1, false),
            (Rule::Sandhi, 1, false),
            (Rule::Unlisted, 1, false),
        ]
    );
}

#[test]
fn pair_steps() {
    assert_eq!(summary(&walk("行行出狀")), vec![(Rule::SpecialPair, 4, true)]);
    assert_eq!(summary(&walk("重重的")), vec![(Rule::SpecialPair, 3, true)]);
    assert_eq!(summary(&walk("明晃晃")).last(), Some(&(Rule::SpecialPair, 2, true)));
}

#[test]
fn matcher_steps() {
    assert_eq!(summary(&walk("行")), vec![(Rule::Standalone, 1, true)]);
    assert_eq!(
        summary(&walk("銀行")),
        vec![(Rule::Unlisted, 1, false), (Rule::PrecedingPattern, 1, true)]
    );
    assert_eq!(
        summary(&walk("重行")),
        vec![(Rule::FollowingPattern, 1, false), (Rule::FallbackSlot, 1, false)]
    );
    assert_eq!(summary(&walk("長城")), vec![(Rule::FollowingPattern, 2, true)]);
    assert_eq!(
        summary(&walk("很多")),
        vec![(Rule::Unlisted, 1, false), (Rule::Unlisted, 1, true)]
    );
}

#[test]
fn consumed_counts_cover_input() {
    for text in ["行行重行行", "我一不是", "很多長城好奇", "abc一", "著作權"] {
        let steps = walk(text);
        let total: usize = steps.iter().map(Step::consumed).sum();
        assert_eq!(total, text.chars().count(), "{text}");
        assert!(steps.iter().all(|s| s.consumed() >= 1 && s.consumed() <= 4));
    }
}
