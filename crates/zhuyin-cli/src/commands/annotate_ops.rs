use std::io::{self, BufRead, Write};
use std::process;
use std::sync::Arc;

use zhuyin_core::resolver::format_text;
use zhuyin_core::settings::settings;
use zhuyin_core::Resolver;
use zhuyin_service::ZhuyinService;

fn load_service(dict: Option<&str>, tones: Option<&str>) -> ZhuyinService {
    let service = ZhuyinService::new(super::resources(dict, tones));
    if let Err(e) = service.load() {
        if !settings().annotate.fallback_to_plain {
            eprintln!("Error loading polyphone data: {e}");
            process::exit(1);
        }
        eprintln!("Warning: {e}; writing text without annotations");
    }
    service
}

/// Load the tables or exit.
pub fn load_resolver(dict: Option<&str>, tones: Option<&str>) -> Arc<Resolver> {
    let service = ZhuyinService::new(super::resources(dict, tones));
    die!(service.load(), "Error loading polyphone data: {}");
    die!(service.resolver(), "Error: {}")
}

fn render(service: &ZhuyinService, line: &str, styles: bool) -> String {
    if !styles {
        return service.annotate_or_plain(line);
    }
    match service.process(line) {
        Ok(chars) => chars
            .iter()
            .map(|r| r.style.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        Err(_) => line.chars().map(|_| "0000").collect::<Vec<_>>().join(" "),
    }
}

/// Annotate `text`, or every line of stdin when no text is given.
pub fn annotate(text: Option<&str>, dict: Option<&str>, tones: Option<&str>, styles: bool) {
    let service = load_service(dict, tones);

    if let Some(text) = text {
        println!("{}", render(&service, text, styles));
        return;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = die!(line, "Failed to read stdin: {}");
        die!(
            writeln!(out, "{}", render(&service, &line, styles)),
            "Failed to write: {}"
        );
    }
}

pub fn explain(text: &str, dict: Option<&str>, tones: Option<&str>, json: bool) {
    let resolver = load_resolver(dict, tones);
    let explanation = resolver.explain(text);
    if json {
        let out = die!(
            serde_json::to_string_pretty(&explanation),
            "JSON serialization failed: {}"
        );
        println!("{out}");
    } else {
        print!("{}", format_text(&explanation));
    }
}
