use std::fs;

pub fn settings_export() {
    print!("{}", zhuyin_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        zhuyin_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: resources.dictionary={}, resources.tones={}, fetch.timeout_secs={}, annotate.fallback_to_plain={}",
        s.resources.dictionary, s.resources.tones, s.fetch.timeout_secs, s.annotate.fallback_to_plain
    );
}

/// Install a custom settings file before any command reads settings.
pub fn load_settings(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        zhuyin_core::settings::init_custom(content),
        "Error in {file}: {}"
    );
}
