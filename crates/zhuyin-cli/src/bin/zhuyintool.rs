use std::path::Path;

use clap::{Parser, Subcommand};

use zhuyin_cli::commands::{accuracy_ops, annotate_ops, config_ops, dict_ops};

#[derive(Parser)]
#[command(name = "zhuyintool", about = "Zhuyin polyphone annotation tool")]
struct Cli {
    /// Custom settings TOML (replaces the built-in defaults)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Write a JSON trace to this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download a dictionary or tone table
    Fetch {
        /// Path or URL (defaults to resources.dictionary)
        #[arg(long)]
        source: Option<String>,
        /// Output file
        output_file: String,
    },
    /// Compile JSON resources into a binary snapshot
    Compile {
        /// Polyphone dictionary JSON
        dict_file: String,
        /// Tone table JSON
        #[arg(long)]
        tones: Option<String>,
        /// Output file
        output_file: String,
    },
    /// Show snapshot, dictionary or tone table info (auto-detected)
    Info {
        file: String,
    },
    /// Show the variant slots of a character
    Lookup {
        ch: char,
        #[arg(long)]
        dict: Option<String>,
        #[arg(long)]
        tones: Option<String>,
    },
    /// Annotate text (reads stdin line by line when TEXT is omitted)
    Annotate {
        text: Option<String>,
        #[arg(long)]
        dict: Option<String>,
        #[arg(long)]
        tones: Option<String>,
        /// Print one style per character instead of annotated text
        #[arg(long)]
        styles: bool,
    },
    /// Explain which rule chose each character's style
    Explain {
        text: String,
        #[arg(long)]
        dict: Option<String>,
        #[arg(long)]
        tones: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run annotation accuracy tests from a TOML corpus
    Accuracy {
        /// Path to the accuracy corpus TOML file
        corpus_file: String,
        #[arg(long)]
        dict: Option<String>,
        #[arg(long)]
        tones: Option<String>,
        /// Filter by tag (only run cases with this tag)
        #[arg(long)]
        tag: Option<String>,
        /// Filter by category (only run cases in this category)
        #[arg(long)]
        category: Option<String>,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = &cli.trace_dir {
        zhuyin_service::trace_init::init_tracing(Path::new(dir));
    }
    if let Some(file) = &cli.settings {
        config_ops::load_settings(file);
    }

    match cli.command {
        Command::Fetch {
            source,
            output_file,
        } => dict_ops::fetch(source.as_deref(), &output_file),
        Command::Compile {
            dict_file,
            tones,
            output_file,
        } => dict_ops::compile(&dict_file, tones.as_deref(), &output_file),
        Command::Info { file } => dict_ops::info(&file),
        Command::Lookup { ch, dict, tones } => {
            dict_ops::lookup(dict.as_deref(), tones.as_deref(), ch)
        }
        Command::Annotate {
            text,
            dict,
            tones,
            styles,
        } => annotate_ops::annotate(text.as_deref(), dict.as_deref(), tones.as_deref(), styles),
        Command::Explain {
            text,
            dict,
            tones,
            json,
        } => annotate_ops::explain(&text, dict.as_deref(), tones.as_deref(), json),
        Command::Accuracy {
            corpus_file,
            dict,
            tones,
            tag,
            category,
            verbose,
            json,
        } => accuracy_ops::accuracy(
            dict.as_deref(),
            tones.as_deref(),
            &corpus_file,
            tag.as_deref(),
            category.as_deref(),
            verbose,
            json,
        ),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
