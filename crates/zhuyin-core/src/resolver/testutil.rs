use std::sync::Arc;

use crate::dict::{PolyphonicDictionary, ToneTable};
use crate::style::StyleSet;

use super::Resolver;

pub(crate) const SAMPLE_DICT: &str = r#"{
  "_comment": "test fixture",
  "data": {
    "行": { "s": 2, "v": ["", "銀*/*業/*列"] },
    "重": { "s": 4, "v": ["", "*複/*新/*行"] },
    "地": { "s": 4, "v": ["", ""] },
    "著": { "s": 5, "v": ["", "*作/顯*", "*急"] },
    "長": { "s": 2, "v": ["", "*城", "家*/多*"] },
    "樂": { "s": 4, "v": ["", "音*/*器", "快*"] },
    "好": { "s": 3, "v": ["", "*奇/愛*"] },
    "藏": { "s": 2, "v": ["*身", ""] },
    "呱": { "s": 1, "v": ["", "*唧"] },
    "晃": { "s": 3, "v": ["", "*動"] },
    "的": { "s": 5, "v": [] }
  }
}"#;

pub(crate) const SAMPLE_TONES: &str = r#"{
  "_comment": "test fixture",
  "一": 1, "不": 4, "個": 4, "心": 1, "直": 2, "起": 3, "樣": 4,
  "要": 4, "能": 2, "吃": 1, "好": 3, "定": 4, "去": 4, "天": 1,
  "年": 2, "是": 4, "來": 2, "對": 4, "會": 4, "嗎": 5
}"#;

pub(crate) fn sample_dict() -> PolyphonicDictionary {
    PolyphonicDictionary::from_json_str(SAMPLE_DICT).unwrap()
}

pub(crate) fn sample_tones() -> ToneTable {
    ToneTable::from_json_str(SAMPLE_TONES).unwrap()
}

pub(crate) fn sample_resolver() -> Resolver {
    Resolver::new(Arc::new(sample_dict()), Arc::new(sample_tones()))
}

/// Style of every character of `text`, in order.
pub(crate) fn styles(resolver: &Resolver, text: &str) -> Vec<StyleSet> {
    resolver.resolve(text).iter().map(|r| r.style).collect()
}

/// Parse a space-separated style list (`"0000 ss01"`).
pub(crate) fn expect(list: &str) -> Vec<StyleSet> {
    list.split_whitespace().map(|s| s.parse().unwrap()).collect()
}
