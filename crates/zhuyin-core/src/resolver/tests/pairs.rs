use crate::resolver::testutil::{expect, sample_resolver, styles};

#[test]
fn base_styles() {
    let r = sample_resolver();
    assert_eq!(styles(&r, "重重"), expect("ss01 ss01"));
    assert_eq!(styles(&r, "行行"), expect("0000 0000"));
    assert_eq!(styles(&r, "呱呱叫"), expect("0000 0000 0000"));
}

#[test]
fn zhong_zhong_de() {
    let r = sample_resolver();
    assert_eq!(styles(&r, "重重的"), expect("0000 0000 0000"));
}

#[test]
fn hang_hang_refinements() {
    let r = sample_resolver();
    assert_eq!(styles(&r, "行行出狀元"), expect("ss01 ss01 0000 0000 0000"));
    assert_eq!(styles(&r, "行行重行行"), expect("0000 0000 ss01 0000 0000"));
    assert_eq!(styles(&r, "行行如也"), expect("ss03 ss03 0000 0000"));
}

#[test]
fn gua_gua_refinements() {
    let r = sample_resolver();
    assert_eq!(styles(&r, "呱呱墜地"), expect("ss01 ss01 0000 0000"));
    assert_eq!(styles(&r, "呱呱墮地"), expect("ss01 ss01 0000 0000"));
    assert_eq!(styles(&r, "呱呱而泣"), expect("ss01 ss01 0000 0000"));
}

#[test]
fn huang_huang_depends_on_predecessor() {
    let r = sample_resolver();
    assert_eq!(styles(&r, "明晃晃"), expect("0000 ss01 ss01"));
    assert_eq!(styles(&r, "油晃晃"), expect("0000 ss01 ss01"));
    assert_eq!(styles(&r, "晃晃"), expect("0000 0000"));
    assert_eq!(styles(&r, "搖晃晃"), expect("0000 0000 0000"));
}

#[test]
fn pair_requires_dictionary_entry() {
    let r = sample_resolver();
    // 從從 is in the pair table but 從 has no entry in the fixture.
    assert_eq!(styles(&r, "從從"), expect("0000 0000"));
}

#[test]
fn pair_takes_priority_over_patterns() {
    let r = sample_resolver();
    // Without the pair, 行業 would select the 業 pattern.
    assert_eq!(styles(&r, "行行業"), expect("0000 0000 0000"));
}
