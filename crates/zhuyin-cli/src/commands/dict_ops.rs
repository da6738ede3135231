use std::fs;
use std::path::Path;
use std::process;
use std::time::Duration;

use zhuyin_core::dict::{is_snapshot, CompiledTables};
use zhuyin_core::settings::settings;
use zhuyin_core::{PolyphonicDictionary, StyleSet, ToneTable};
use zhuyin_service::{ResourceLocation, Resources};

fn timeout() -> Duration {
    Duration::from_secs(settings().fetch.timeout_secs)
}

fn report_size(output_file: &str) {
    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!("Wrote {output_file} ({:.1} KB)", file_size as f64 / 1024.0);
}

/// Download a dictionary or tone table to a local file.
pub fn fetch(source: Option<&str>, output_file: &str) {
    let source = source.unwrap_or(settings().resources.dictionary.as_str());
    let location = ResourceLocation::parse(source);
    eprintln!("Fetching {location}...");
    die!(
        location.download(Path::new(output_file), timeout()),
        "Error fetching {location}: {}"
    );
    report_size(output_file);
}

/// Compile JSON resources into a ZYDX snapshot.
pub fn compile(dict_file: &str, tones_file: Option<&str>, output_file: &str) {
    let resources = Resources::new(
        ResourceLocation::parse(dict_file),
        tones_file.map(ResourceLocation::parse),
    )
    .with_timeout(timeout());
    let tables = die!(resources.load(), "Error loading {dict_file}: {}");

    eprintln!(
        "Compiling {} entries ({} polyphonic, {} patterns), {} tones...",
        tables.dictionary.len(),
        tables.dictionary.polyphonic_count(),
        tables.dictionary.pattern_count(),
        tables.tones.len(),
    );
    die!(
        tables.save(Path::new(output_file)),
        "Error writing {output_file}: {}"
    );
    report_size(output_file);
}

fn print_dictionary(dict: &PolyphonicDictionary) {
    let max_slots = dict.iter().map(|(_, e)| e.variants.len()).max().unwrap_or(0);
    println!("  Entries:         {}", dict.len());
    println!("  Polyphonic:      {}", dict.polyphonic_count());
    println!("  Patterns:        {}", dict.pattern_count());
    println!("  Max slots:       {max_slots}");
}

fn print_tones(tones: &ToneTable) {
    println!("  Tones:           {}", tones.len());
}

/// Describe a snapshot, dictionary JSON or tone table JSON.
pub fn info(file: &str) {
    let bytes = die!(fs::read(file), "Error reading {file}: {}");

    if is_snapshot(&bytes) {
        let tables = die!(
            CompiledTables::from_bytes(&bytes),
            "Error reading snapshot: {}"
        );
        println!("{file}: compiled snapshot (ZYDX, {} bytes)", bytes.len());
        print_dictionary(&tables.dictionary);
        print_tones(&tables.tones);
        return;
    }

    let text = die!(String::from_utf8(bytes), "Error: {file} is not UTF-8: {}");
    if let Ok(dict) = PolyphonicDictionary::from_json_str(&text) {
        println!("{file}: polyphone dictionary (JSON)");
        print_dictionary(&dict);
        return;
    }
    if let Ok(tones) = ToneTable::from_json_str(&text) {
        println!("{file}: tone table (JSON)");
        print_tones(&tones);
        return;
    }
    eprintln!("Error: {file} is neither a snapshot, a dictionary nor a tone table");
    process::exit(1);
}

/// Show the variant slots of one character.
pub fn lookup(dict: Option<&str>, tones: Option<&str>, ch: char) {
    let tables = die!(
        super::resources(dict, tones).load(),
        "Error loading polyphone data: {}"
    );
    let tone = tables
        .tones
        .tone(ch)
        .map_or_else(|| "-".to_string(), |t| t.to_string());
    let Some(entry) = tables.dictionary.get(ch) else {
        println!("{ch}: not in dictionary (tone {tone})");
        return;
    };
    println!("{ch}: s={} tone={tone}", entry.default_tone);
    for (slot, variant) in entry.variants.iter().enumerate() {
        let patterns: Vec<String> = variant.patterns.iter().map(|p| p.to_string()).collect();
        let mut line = format!("  [{slot}] {}", StyleSet::from_slot(slot));
        if !patterns.is_empty() {
            line.push(' ');
            line.push_str(&patterns.join("/"));
        }
        if slot == entry.fallback_slot() {
            line.push_str(" (fallback)");
        }
        println!("{line}");
    }
}
