//! Hand-curated literal tables consumed by the resolver.
//!
//! Sandhi character sets follow the Ministry of Education dictionary notes
//! on 一/不 and the toneoz-font-zhuyin rules.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::style::StyleSet;

const D: StyleSet = StyleSet::Default;
const SS01: StyleSet = StyleSet::SS01;
const SS02: StyleSet = StyleSet::SS02;
const SS03: StyleSet = StyleSet::SS03;

// ---------------------------------------------------------------------------
// 一 / 不
// ---------------------------------------------------------------------------

/// Ordinal and numeral words: 一 after these keeps its citation tone (第一, 十一).
pub(crate) const YI_ORDINAL_PREDECESSORS: &[char] = &[
    '第', '説', '说', '唯', '惟', '统', '統', '独', '獨', '劃', '划', '萬', '專', '某', '十', '九',
    '八', '七', '六', '五', '四', '三', '二', '一', '〇', '零',
];

/// Measure, time and numeral words: 一 before these keeps its citation tone.
pub(crate) const YI_CITATION_SUCCESSORS: &[char] = &[
    '是', '日', '月', '的', '或', '物', '片', '系', '十', '九', '八', '七', '六', '五', '四', '三',
    '二', '一', '〇', '零', '百', '千', '萬', '元', '則', '節', '台', '同', '名', '回', '堂', '層',
    '幅', '幢', '年', '息', '成', '排', '提', '搏', '擊', '擲', '旁', '時', '枚', '格', '條', '樓',
    '流', '環', '篇', '級', '群', '言', '連', '門', '間', '天', '經', '方', '對', '次', '家', '鳴',
    '命', '份', '件', '尊', '聲', '歲', '副', '本', '批',
];

/// Verbs reduplicated around 一 (看一看, 一聽就懂).
pub(crate) const YI_REDUPLICATION_TRIGGERS: &[char] =
    &['看', '聽', '寫', '用', '說', '動', '搖', '問'];

/// Fixed outcome of 一 before an exact following character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SandhiException {
    pub next: char,
    pub style: StyleSet,
    pub consume_next: bool,
    pub suppress_fusion: bool,
}

const fn keep(next: char, style: StyleSet) -> SandhiException {
    SandhiException {
        next,
        style,
        consume_next: false,
        suppress_fusion: false,
    }
}

pub(crate) const YI_EXCEPTIONS: &[SandhiException] = &[
    keep('個', D),
    keep('个', D),
    keep('會', D),
    keep('切', D),
    SandhiException {
        next: '不',
        style: D,
        consume_next: true,
        suppress_fusion: true,
    },
];

pub(crate) const BU_EXCEPTIONS: &[SandhiException] = &[
    keep('禁', D),
    keep('菲', D),
    keep('勝', D),
    keep('著', D),
    keep('了', D),
    keep('好', D),
    keep('假', D),
    keep('當', SS01),
];

pub(crate) fn find_exception(table: &[SandhiException], next: char) -> Option<SandhiException> {
    table.iter().find(|e| e.next == next).copied()
}

/// Multi-character idioms starting with 一 or 不, resolved literally before
/// the general sandhi rules. Longer idioms come first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SandhiIdiom {
    pub text: &'static str,
    pub styles: &'static [StyleSet],
    pub suppress_fusion: bool,
}

pub(crate) const SANDHI_IDIOMS: &[SandhiIdiom] = &[
    SandhiIdiom {
        text: "一部分",
        styles: &[D, D, SS01],
        suppress_fusion: false,
    },
    SandhiIdiom {
        text: "一部",
        styles: &[D, D],
        suppress_fusion: false,
    },
    SandhiIdiom {
        text: "一會兒",
        styles: &[D, SS02, SS01],
        suppress_fusion: false,
    },
    SandhiIdiom {
        text: "一會",
        styles: &[D, SS02],
        suppress_fusion: false,
    },
    SandhiIdiom {
        text: "不得不",
        styles: &[D, D, D],
        suppress_fusion: true,
    },
    SandhiIdiom {
        text: "不一定",
        styles: &[D, SS01, D],
        suppress_fusion: true,
    },
];

// ---------------------------------------------------------------------------
// Collocations
// ---------------------------------------------------------------------------

/// Common 多 collocations. The character after one of these is not matched
/// against preceding-context patterns.
pub(crate) const DUO_COLLOCATIONS: &[&str] = &[
    "許多", "很多", "大多", "眾多", "太多", "極多", "何多", "沒多", "甚多", "更多", "幾多",
];

pub(crate) fn is_duo_collocation(prev: char, ch: char) -> bool {
    DUO_COLLOCATIONS.iter().any(|word| {
        let mut chars = word.chars();
        chars.next() == Some(prev) && chars.next() == Some(ch)
    })
}

/// Three-character phrases ending in 地 where 地 is the adverbial particle (de5).
const DE_PHRASES: &[&str] = &[
    "一十地", "大方地", "大聲地", "小心地", "小聲地", "不休地", "不安地", "不倦地", "不停地",
    "不堪地", "不絕地", "不諱地", "不斷地", "亢奮地", "仔細地", "叨叨地", "可憐地", "巧妙地",
    "平整地", "正當地", "正經地", "生氣地", "生動地", "示弱地", "交替地", "吁吁地", "合適地",
    "吐吐地", "如實地", "安靜地", "忙碌地", "成功地", "有味地", "有效地", "自主地", "自由地",
    "自在地", "自信地", "自然地", "下氣地", "低聲地", "克難地", "冷漠地", "吾吾地", "均勻地",
    "完整地", "忘我地", "快速地", "快樂地", "抖擻地", "決然地", "牢固地", "狂暴地", "狂熱地",
    "甫定地", "迅速地", "屈膝地", "周到地", "呱呱地", "和藹地", "坦率地", "委婉地", "怯步地",
    "所能地", "易舉地", "虎嚥地", "采烈地", "勇敢地", "思索地", "急速地", "筍般地", "耐心地",
    "重複地", "飛快地", "容易地", "恣意地", "悄悄地", "特別地", "特定地", "真實地", "秘密地",
    "虔誠地", "究柢地", "高興地", "乾脆地", "停蹄地", "偷偷地", "堅定地", "堅強地", "堅毅地",
    "專注地", "康康地", "強烈地", "得意地", "悠悠地", "悠揚地", "悠閒地", "情願地", "授權地",
    "敏感地", "敏銳地", "淡寫地", "深刻地", "深深地", "清楚地", "甜甜地", "細心地", "許可地",
    "尊敬地", "悲傷地", "惺忪地", "愉快地", "無私地", "無償地", "猶豫地", "痛苦地", "絮絮地",
    "間斷地", "意外地", "意料地", "準確地", "溫柔地", "煞氣地", "痴痴地", "經意地", "詳細地",
    "誠意地", "誠懇地", "嘆氣地", "慢慢地", "慣性地", "漂亮地", "漸漸地", "瘋狂地", "盡力地",
    "盡瘁地", "緊緊地", "輕盈地", "輕微地", "輕輕地", "輕聲地", "遠遠地", "嘩啦地", "熟慮地",
    "熟練地", "熱心地", "熱情地", "範圍地", "緩慢地", "緩緩地", "踏實地", "整齊地", "激動地",
    "興奮地", "諱言地", "錯誤地", "隨意地", "靜靜地", "靦腆地", "默默地", "優雅地", "翼翼地",
    "闊步地", "禮貌地", "簡單地", "謹慎地", "穩固地", "穩穩地", "嚴厲地", "歡快地", "驕傲地",
    "驚恐地", "靈活地", "究底地", "大大地",
];

pub(crate) fn is_de_phrase(phrase: &str) -> bool {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| DE_PHRASES.iter().copied().collect())
        .contains(phrase)
}

/// The compound that selects the second reading of 著.
pub(crate) const ZHU_COMPOUND: &str = "著作權";

// ---------------------------------------------------------------------------
// Reduplicated pairs
// ---------------------------------------------------------------------------

/// Context that refines a special pair.
#[derive(Debug, Clone, Copy)]
pub(crate) enum PairContext {
    /// Literal text immediately after the pair.
    Following(&'static str),
    /// Any of these characters immediately before the pair.
    Preceding(&'static [char]),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PairRefinement {
    pub context: PairContext,
    /// Style for both characters of the pair.
    pub style: StyleSet,
    /// Styles for the characters after the pair, which are consumed too.
    pub trailing: &'static [StyleSet],
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PairRule {
    pub pair: [char; 2],
    pub base: StyleSet,
    pub refinements: &'static [PairRefinement],
}

const fn pair(a: char, b: char, base: StyleSet) -> PairRule {
    PairRule {
        pair: [a, b],
        base,
        refinements: &[],
    }
}

pub(crate) const SPECIAL_PAIRS: &[PairRule] = &[
    pair('一', '一', D),
    pair('仆', '仆', SS01),
    pair('便', '便', SS01),
    pair('剌', '剌', SS01),
    pair('厭', '厭', SS01),
    pair('呀', '呀', SS01),
    PairRule {
        pair: ['呱', '呱'],
        base: D,
        refinements: &[
            PairRefinement {
                context: PairContext::Following("墜地"),
                style: SS01,
                trailing: &[D, D],
            },
            PairRefinement {
                context: PairContext::Following("墮地"),
                style: SS01,
                trailing: &[D, D],
            },
            PairRefinement {
                context: PairContext::Following("而泣"),
                style: SS01,
                trailing: &[D, D],
            },
        ],
    },
    pair('咯', '咯', SS01),
    pair('啞', '啞', SS01),
    pair('啦', '啦', SS01),
    pair('喔', '喔', D),
    pair('嗑', '嗑', SS01),
    pair('嚇', '嚇', SS01),
    pair('好', '好', D),
    pair('從', '從', SS03),
    pair('怔', '怔', SS01),
    pair('悶', '悶', SS01),
    pair('擔', '擔', SS01),
    pair('數', '數', SS01),
    pair('施', '施', SS01),
    PairRule {
        pair: ['晃', '晃'],
        base: D,
        refinements: &[PairRefinement {
            context: PairContext::Preceding(&['白', '明', '亮', '精', '油']),
            style: SS01,
            trailing: &[],
        }],
    },
    pair('朴', '朴', SS02),
    pair('棲', '棲', SS01),
    pair('殷', '殷', SS01),
    pair('比', '比', SS01),
    pair('泄', '泄', SS01),
    pair('洩', '洩', SS01),
    pair('湛', '湛', D),
    pair('湯', '湯', SS01),
    pair('濕', '濕', SS02),
    pair('濟', '濟', SS01),
    pair('濺', '濺', SS01),
    pair('父', '父', SS02),
    pair('種', '種', D),
    pair('答', '答', SS01),
    pair('粥', '粥', SS02),
    pair('累', '累', SS01),
    pair('繆', '繆', SS02),
    pair('脈', '脈', SS01),
    pair('菲', '菲', D),
    pair('蔚', '蔚', SS01),
    pair('藉', '藉', SS01),
    pair('虎', '虎', SS01),
    pair('處', '處', SS01),
    pair('蛇', '蛇', SS01),
    PairRule {
        pair: ['行', '行'],
        base: D,
        refinements: &[
            PairRefinement {
                context: PairContext::Following("出狀"),
                style: SS01,
                trailing: &[D, D],
            },
            PairRefinement {
                context: PairContext::Following("重行"),
                style: D,
                trailing: &[SS01, D],
            },
            PairRefinement {
                context: PairContext::Following("如也"),
                style: SS03,
                trailing: &[D, D],
            },
        ],
    },
    pair('褶', '褶', SS01),
    pair('逮', '逮', D),
    pair('那', '那', SS01),
    PairRule {
        pair: ['重', '重'],
        base: SS01,
        refinements: &[PairRefinement {
            context: PairContext::Following("的"),
            style: D,
            trailing: &[D],
        }],
    },
    pair('銻', '銻', SS02),
    pair('鰓', '鰓', SS01),
    pair('個', '個', D),
    pair('个', '个', D),
    pair('大', '大', D),
    pair('方', '方', D),
    pair('喏', '喏', D),
];

pub(crate) fn special_pair(first: char, second: char) -> Option<&'static PairRule> {
    static INDEX: OnceLock<HashMap<[char; 2], &'static PairRule>> = OnceLock::new();
    INDEX
        .get_or_init(|| SPECIAL_PAIRS.iter().map(|r| (r.pair, r)).collect())
        .get(&[first, second])
        .copied()
}
