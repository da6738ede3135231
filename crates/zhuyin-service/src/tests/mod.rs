use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use zhuyin_core::dict::{CompiledTables, DictError};
use zhuyin_core::{PolyphonicDictionary, ToneTable};

use crate::{AnnotateError, LoadError, ResourceLocation, Resources, ZhuyinService};

const DICT: &str = r#"{
  "_comment": "service fixture",
  "data": {
    "行": { "s": 2, "v": ["", "銀*/*業"] },
    "長": { "s": 2, "v": ["", "家*"] }
  }
}"#;

const TONES: &str = r#"{ "要": 4, "心": 1 }"#;

fn write_fixture(dir: &Path) -> Resources {
    let dict = dir.join("poyin_db.json");
    let tones = dir.join("tone_db.json");
    fs::write(&dict, DICT).unwrap();
    fs::write(&tones, TONES).unwrap();
    Resources::new(
        ResourceLocation::Path(dict),
        Some(ResourceLocation::Path(tones)),
    )
}

fn fixture_tables() -> CompiledTables {
    CompiledTables::new(
        PolyphonicDictionary::from_json_str(DICT).unwrap(),
        ToneTable::from_json_str(TONES).unwrap(),
    )
}

fn unreachable_resources() -> Resources {
    Resources::new(ResourceLocation::Path("/nonexistent/poyin_db.json".into()), None)
}

#[test]
fn not_loaded_before_load() {
    let dir = tempfile::tempdir().unwrap();
    let service = ZhuyinService::new(write_fixture(dir.path()));
    assert!(!service.is_loaded());
    assert_eq!(service.annotate("銀行"), Err(AnnotateError::NotLoaded));
    assert_eq!(service.process("銀行"), Err(AnnotateError::NotLoaded));
}

#[test]
fn load_from_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let service = ZhuyinService::new(write_fixture(dir.path()));
    service.load().unwrap();

    assert!(service.is_loaded());
    assert_eq!(service.annotate("銀行").unwrap(), "銀行\u{E01E1}");
    assert_eq!(service.annotate("不要").unwrap(), "不\u{E01E1}要");
    assert_eq!(service.process("家長").unwrap()[1].style.to_string(), "ss01");
}

#[test]
fn load_is_idempotent() {
    let service = ZhuyinService::new(unreachable_resources());
    let calls = AtomicUsize::new(0);
    let loader = || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(fixture_tables())
    };
    service.load_with(loader).unwrap();
    service.load_with(loader).unwrap();
    // Resources are never touched once loaded.
    service.load().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_loads_build_once() {
    let service = Arc::new(ZhuyinService::new(unreachable_resources()));
    let calls = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            let calls = Arc::clone(&calls);
            thread::spawn(move || {
                service.load_with(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(fixture_tables())
                })
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(service.is_loaded());
}

#[test]
fn failed_load_is_reported() {
    let service = ZhuyinService::new(unreachable_resources());
    let err = service.load().unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(!service.is_loaded());

    match service.annotate("銀行") {
        Err(AnnotateError::LoadFailed(reason)) => assert!(reason.contains("poyin_db.json")),
        other => panic!("expected LoadFailed, got {other:?}"),
    }
    assert_eq!(service.annotate_or_plain("銀行"), "銀行");
}

#[test]
fn retry_after_failure() {
    let service = ZhuyinService::new(unreachable_resources());
    assert!(service.load().is_err());
    service.load_with(|| Ok(fixture_tables())).unwrap();
    assert!(service.is_loaded());
    assert_eq!(service.annotate_or_plain("銀行"), "銀行\u{E01E1}");
}

#[test]
fn malformed_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poyin_db.json");
    fs::write(&path, r#"{"entries": {}}"#).unwrap();
    let service = ZhuyinService::new(Resources::new(ResourceLocation::Path(path), None));
    let err = service.load().unwrap_err();
    assert!(matches!(err, LoadError::Dict(DictError::MissingData)));
}

#[test]
fn load_in_background() {
    let dir = tempfile::tempdir().unwrap();
    let service = Arc::new(ZhuyinService::new(write_fixture(dir.path())));
    let handle = service.load_in_background().unwrap();
    handle.wait().unwrap();
    assert!(service.is_loaded());
    assert_eq!(service.annotate("行業").unwrap(), "行\u{E01E1}業");
}

#[test]
fn background_failure_is_returned() {
    let service = Arc::new(ZhuyinService::new(unreachable_resources()));
    let err = service.load_in_background().unwrap().wait().unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn load_compiled_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poyin.zydx");
    fixture_tables().save(&path).unwrap();

    // The tone location is ignored for snapshots.
    let resources = Resources::new(
        ResourceLocation::Path(path),
        Some(ResourceLocation::Path(dir.path().join("missing.json"))),
    );
    let service = ZhuyinService::new(resources);
    service.load().unwrap();
    assert_eq!(service.annotate("不要").unwrap(), "不\u{E01E1}要");
}

#[test]
fn missing_tone_table_disables_sandhi_tones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poyin_db.json");
    fs::write(&path, DICT).unwrap();
    let service = ZhuyinService::new(Resources::new(ResourceLocation::Path(path), None));
    service.load().unwrap();
    assert_eq!(service.annotate("不要").unwrap(), "不要");
    assert_eq!(service.annotate("銀行").unwrap(), "銀行\u{E01E1}");
}

#[test]
fn explain_through_service() {
    let service = ZhuyinService::new(unreachable_resources());
    assert_eq!(service.explain("行").unwrap_err(), AnnotateError::NotLoaded);
    service.load_with(|| Ok(fixture_tables())).unwrap();
    let e = service.explain("銀行").unwrap();
    assert_eq!(e.annotated, "銀行\u{E01E1}");
}
