use std::collections::BTreeMap;
use std::fs;
use std::process;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;
use zhuyin_core::Resolver;

#[derive(Debug, Deserialize)]
pub struct AccuracyCorpus {
    pub cases: Vec<AccuracyCase>,
}

#[derive(Debug, Deserialize)]
pub struct AccuracyCase {
    pub text: String,
    /// One style per character, whitespace separated.
    pub expected: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResult {
    pub text: String,
    pub expected: String,
    pub actual: String,
    pub status: AccuracyStatus,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
pub struct AccuracySummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub pass_rate: String,
}

#[derive(Debug, Serialize)]
pub struct AccuracyReport {
    pub results: Vec<AccuracyResult>,
    pub summary: AccuracySummary,
}

impl AccuracyCorpus {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

fn normalize(styles: &str) -> String {
    styles.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn actual_styles(resolver: &Resolver, text: &str) -> String {
    resolver
        .resolve(text)
        .iter()
        .map(|r| r.style.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run every case matching the filters. Skipped cases are reported but not resolved.
pub fn run_corpus(
    resolver: &Resolver,
    corpus: &AccuracyCorpus,
    tag: Option<&str>,
    category: Option<&str>,
) -> AccuracyReport {
    let results: Vec<AccuracyResult> = corpus
        .cases
        .iter()
        .filter(|c| tag.map_or(true, |t| c.tags.iter().any(|ct| ct == t)))
        .filter(|c| category.map_or(true, |cat| c.category == cat))
        .map(|case| {
            let expected = normalize(&case.expected);
            let (actual, status) = if case.skip {
                (String::new(), AccuracyStatus::Skip)
            } else {
                let actual = actual_styles(resolver, &case.text);
                let status = if actual == expected {
                    AccuracyStatus::Pass
                } else {
                    AccuracyStatus::Fail
                };
                (actual, status)
            };
            AccuracyResult {
                text: case.text.clone(),
                expected,
                actual,
                status,
                category: case.category.clone(),
                note: case.note.clone(),
            }
        })
        .collect();

    let count = |s: AccuracyStatus| results.iter().filter(|r| r.status == s).count();
    let (pass, fail, skip) = (
        count(AccuracyStatus::Pass),
        count(AccuracyStatus::Fail),
        count(AccuracyStatus::Skip),
    );
    let total = results.len();
    let tested = total - skip;
    let rate = if tested > 0 {
        pass as f64 / tested as f64 * 100.0
    } else {
        0.0
    };

    AccuracyReport {
        results,
        summary: AccuracySummary {
            total,
            pass,
            fail,
            skip,
            pass_rate: format!("{rate:.1}%"),
        },
    }
}

fn pad(text: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(w)))
}

fn print_text(report: &AccuracyReport, verbose: bool) {
    let mut grouped: BTreeMap<&str, Vec<&AccuracyResult>> = BTreeMap::new();
    for r in &report.results {
        grouped.entry(&r.category).or_default().push(r);
    }
    let width = report
        .results
        .iter()
        .map(|r| UnicodeWidthStr::width(r.text.as_str()))
        .max()
        .unwrap_or(0);

    for (cat, group) in &grouped {
        println!("\n=== {} ({} cases) ===", cat, group.len());
        for r in group {
            match r.status {
                AccuracyStatus::Pass => {
                    if verbose {
                        println!("  \u{2713} {} \u{2192} {}", pad(&r.text, width), r.expected);
                    }
                }
                AccuracyStatus::Fail => {
                    println!(
                        "  \u{2717} {} \u{2192} {} (got: {})",
                        pad(&r.text, width),
                        r.expected,
                        r.actual
                    );
                }
                AccuracyStatus::Skip => {
                    let reason = r.note.as_deref().unwrap_or("known failure");
                    println!("  - {} [skip: {}]", pad(&r.text, width), reason);
                }
            }
        }
    }

    let s = &report.summary;
    println!();
    println!("=== Summary ===");
    println!("  Total:     {}", s.total);
    println!("  Pass:      {:>3}", s.pass);
    println!("  Fail:      {:>3}", s.fail);
    println!("  Skip:      {:>3}", s.skip);
    println!("  Pass rate: {} ({}/{})", s.pass_rate, s.pass, s.total - s.skip);
}

pub fn accuracy(
    dict: Option<&str>,
    tones: Option<&str>,
    corpus_file: &str,
    tag: Option<&str>,
    category: Option<&str>,
    verbose: bool,
    json: bool,
) {
    let content = die!(
        fs::read_to_string(corpus_file),
        "Failed to read corpus file {corpus_file}: {}"
    );
    let corpus = die!(
        AccuracyCorpus::parse(&content),
        "Failed to parse corpus TOML: {}"
    );
    let resolver = super::annotate_ops::load_resolver(dict, tones);

    let report = run_corpus(&resolver, &corpus, tag, category);
    if report.results.is_empty() {
        eprintln!("No cases match the given filters");
        process::exit(1);
    }

    if json {
        let out = die!(
            serde_json::to_string_pretty(&report),
            "JSON serialization failed: {}"
        );
        println!("{out}");
    } else {
        print_text(&report, verbose);
    }

    if report.summary.fail > 0 {
        process::exit(1);
    }
}
