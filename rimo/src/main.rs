use clap::{Parser, Subcommand};
use rimologia::{
    analyze_mosaic, classify_with_variant, count_syllables, detect_scheme_with,
    detect_stress_positions, extract_rhyme_domain, g2p, g2p_with_mode, is_repetition,
    possible_syllable_counts, pre_rhyme_vowel, rhyme_part_and_onset, Classification,
    RhymeQuality, SchemeOptions, SchemeResult, Variant,
};
use serde_json::json;
use std::fs;

mod config;
use config::{expand_path, AppConfig};

#[derive(Subcommand, Debug, Clone)]
enum Mode {
    /// Transcribe Greek text to its phonetic form
    #[command(alias = "ph")]
    Phonemes {
        /// Text to transcribe
        text: String,

        /// Emit the raw symbol stream instead of the ASCII form
        #[arg(long = "ipa")]
        ipa: bool,
    },

    /// Count the possible syllables of a word
    #[command(alias = "syl")]
    Syllables {
        /// Word to analyze
        word: String,
    },

    /// Locate the stressed syllable of a word
    #[command(alias = "st")]
    Stress {
        /// Word to analyze
        word: String,
    },

    /// Extract the rhyme domain of a verse line
    #[command(alias = "dom")]
    Domain {
        /// Line to analyze
        line: String,
    },

    /// Classify the rhyme between two lines
    #[command(alias = "p")]
    Pair {
        /// First line (or bare rhyme domain)
        first: String,

        /// Second line (or bare rhyme domain)
        second: String,
    },

    /// Check a line pair for a mosaic rhyme spanning a word boundary
    #[command(alias = "mos")]
    Mosaic {
        /// First line
        line1: String,

        /// Second line
        line2: String,
    },

    /// Detect the rhyme scheme of a poem file
    #[command(alias = "sch")]
    Scheme {
        /// Filesystem path of the poem, one verse per line
        input_path: String,

        /// How far ahead a line looks for rhyme partners
        /// Default from config: window
        #[arg(long)]
        window: Option<usize>,

        /// Lines per analyzed chunk
        /// Default from config: chunk_size
        #[arg(long = "chunk-size", value_name = "CHUNK_SIZE")]
        chunk_size: Option<usize>,

        /// Also accept imperfect rhymes when connecting lines
        #[arg(long = "imperfect")]
        imperfect: bool,
    },

    /// Show configuration paths and current settings
    #[command(name = "config", alias = "cfg")]
    Config {
        /// Show all configuration paths
        #[arg(long)]
        paths: bool,

        /// Initialize config file in global config directory
        #[arg(long)]
        init: bool,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(name = "rimo")]
#[command(version = "0.2")]
#[command(about = "Rhyme and stress analysis for Modern Greek poetry")]
#[command(after_help = "Configuration files are loaded from (highest to lowest priority):
  1. --config <file>
  2. Environment variables (RIMO_*)
  3. ./config.toml (local)
  4. $XDG_CONFIG_HOME/rimo/config.toml (global)

Run 'rimo config --paths' to see configuration paths.
Run 'rimo config --init' to create a default config file.")]
struct Cli {
    /// Path to a custom config file (highest priority)
    #[arg(short = 'c', long = "config", value_name = "CONFIG_FILE", global = true)]
    config_file: Option<String>,

    /// Accept open-against-closed syllable rhymes (the Topintzi variant)
    #[arg(long = "permissive")]
    permissive: bool,

    /// Emit JSON instead of human-readable output
    #[arg(short = 'j', long = "json", value_name = "JSON")]
    json: Option<bool>,

    /// Enable verbose debug output
    #[arg(short = 'v', long = "verbose", value_name = "VERBOSE")]
    verbose: Option<bool>,

    #[command(subcommand)]
    mode: Mode,
}

/// Resolved configuration after merging CLI args with config file
/// CLI args take priority over config file values
#[derive(Debug)]
struct ResolvedConfig {
    variant: Variant,
    window: usize,
    chunk_size: usize,
    json: bool,
    verbose: bool,
}

impl ResolvedConfig {
    /// Merge CLI arguments with config file, CLI takes priority
    fn from_cli_and_config(cli: &Cli, config: &AppConfig) -> Self {
        let variant = if cli.permissive {
            Variant::Permissive
        } else {
            match config.variant.as_str() {
                "permissive" => Variant::Permissive,
                "strict" => Variant::Strict,
                other => {
                    eprintln!("Warning: unknown variant {:?} in config, using strict", other);
                    Variant::Strict
                }
            }
        };

        Self {
            variant,
            window: config.window,
            chunk_size: config.chunk_size,
            json: cli.json.unwrap_or(config.json),
            verbose: cli.verbose.unwrap_or(config.verbose),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Handle config subcommand first (doesn't need the engine)
    if let Mode::Config { paths, init } = &cli.mode {
        if *paths {
            AppConfig::print_paths();
        }
        if *init {
            if let Err(e) = AppConfig::ensure_config_exists() {
                eprintln!("Failed to create config: {}", e);
                std::process::exit(1);
            }
        }
        if !*paths && !*init {
            AppConfig::print_paths();
            println!();
            match AppConfig::load(cli.config_file.as_deref()) {
                Ok(config) => {
                    println!("Current configuration:");
                    println!("  variant: {}", config.variant);
                    println!("  window: {}", config.window);
                    println!("  chunk_size: {}", config.chunk_size);
                    println!("  json: {}", config.json);
                    println!("  verbose: {}", config.verbose);
                }
                Err(e) => {
                    eprintln!("Failed to load config: {}", e);
                }
            }
        }
        return Ok(());
    }

    // Load configuration (CLI args will override these)
    let app_config = match AppConfig::load(cli.config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config file: {}", e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };

    // Merge CLI args with config (CLI takes priority)
    let resolved = ResolvedConfig::from_cli_and_config(&cli, &app_config);

    let log_level = if resolved.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();
    log::debug!("resolved config: {:?}", resolved);

    match &cli.mode {
        Mode::Config { .. } => {
            // Already handled above
            unreachable!();
        }

        Mode::Phonemes { text, ipa } => {
            let phonetic = if *ipa {
                g2p_with_mode(text, false)
            } else {
                g2p(text)
            };
            if resolved.json {
                let value = json!({ "text": text, "phonetic": phonetic });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", phonetic);
            }
        }

        Mode::Syllables { word } => {
            let counts = possible_syllable_counts(word);
            if resolved.json {
                let value = json!({
                    "word": word,
                    "min": counts.min(),
                    "max": counts.max(),
                    "preferred": count_syllables(word),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else if counts.is_ambiguous() {
                println!(
                    "{}: {}-{} syllables ({} with synizesis)",
                    word,
                    counts.min(),
                    counts.max(),
                    count_syllables(word)
                );
            } else {
                println!("{}: {} syllables", word, counts.min());
            }
        }

        Mode::Stress { word } => {
            let analysis = detect_stress_positions(word);
            if resolved.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                let primary = analysis.primary();
                println!(
                    "{}: {} (stressed syllable {} from the end)",
                    word, primary.stress, primary.distance
                );
                for option in &analysis.options()[1..] {
                    println!(
                        "  also possible: {} (syllable {} from the end)",
                        option.stress, option.distance
                    );
                }
            }
        }

        Mode::Domain { line } => {
            let domain = extract_rhyme_domain(line);
            let split = rhyme_part_and_onset(&domain.text);
            let pre_vowel = pre_rhyme_vowel(&domain.text);
            if resolved.json {
                let value = json!({
                    "domain": domain,
                    "rhyme_part": split.as_ref().map(|(part, _)| part),
                    "onset": split.as_ref().map(|(_, onset)| onset),
                    "pre_rhyme_vowel": pre_vowel,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("domain:   {}", domain.text);
                println!("stress:   {}", domain.stress);
                println!("phonetic: {}", domain.phonetic);
                if domain.is_potential_mosaic {
                    println!("words:    {} (mosaic candidate)", domain.words.join(" | "));
                }
                match &split {
                    Some((part, onset)) => {
                        println!("rhyme part: \"{}\"", part);
                        println!("onset:      \"{}\"", onset);
                    }
                    None => println!("rhyme part: none (no vowel found)"),
                }
                if let Some(vowel) = pre_vowel {
                    println!("pre-rhyme vowel: {}", vowel);
                }
            }
        }

        Mode::Pair { first, second } => {
            let domain1 = extract_rhyme_domain(first);
            let domain2 = extract_rhyme_domain(second);
            let classification =
                classify_with_variant(&domain1.text, &domain2.text, resolved.variant);
            let idv = match (pre_rhyme_vowel(&domain1.text), pre_rhyme_vowel(&domain2.text)) {
                (Some(v1), Some(v2)) => v1 == v2,
                _ => false,
            };
            if resolved.json {
                let value = json!({
                    "domain1": domain1.text,
                    "domain2": domain2.text,
                    "classification": classification,
                    "code": classification.code(idv),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{} | {}", domain1.text, domain2.text);
                println!("{}", classification.code(idv));
                match &classification {
                    Classification::Rich { onset, .. } => {
                        println!("shared onset: \"{}\"", onset)
                    }
                    Classification::Imperfect { details, .. } => {
                        println!("mismatch: {}", details)
                    }
                    Classification::None { reason } => println!("{}", reason),
                    _ => {}
                }
            }
        }

        Mode::Mosaic { line1, line2 } => {
            let result = analyze_mosaic(line1, line2);
            let repetition = is_repetition(&result.domain1.words, &result.domain2.words);
            if resolved.json {
                let value = json!({ "mosaic": result, "is_repetition": repetition });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", result.report());
                if let Some(explanation) = &result.explanation {
                    println!("{}", explanation);
                }
                if repetition {
                    println!("repetition: the domains repeat the same words");
                }
            }
        }

        Mode::Scheme {
            input_path,
            window,
            chunk_size,
            imperfect,
        } => {
            let content = fs::read_to_string(expand_path(input_path))?;
            let lines: Vec<&str> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();

            let chunk_size = chunk_size.unwrap_or(resolved.chunk_size).max(1);
            let options = SchemeOptions {
                window: window.unwrap_or(resolved.window),
                min_quality: if *imperfect {
                    RhymeQuality::Imperfect
                } else {
                    RhymeQuality::Pure
                },
                variant: resolved.variant,
            };

            let results: Vec<SchemeResult> = lines
                .chunks(chunk_size)
                .map(|chunk| detect_scheme_with(chunk, options))
                .collect();

            if resolved.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for (index, result) in results.iter().enumerate() {
                    let start = index * chunk_size;
                    if results.len() > 1 {
                        println!("lines {}-{}:", start + 1, start + result.total_lines);
                    }
                    println!("scheme:  {}", result.scheme);
                    println!("pattern: {}", result.pattern);
                    println!(
                        "rhyming: {}/{} lines",
                        result.rhyming_lines, result.total_lines
                    );
                    for conn in &result.connections {
                        println!(
                            "  {} ~ {}  {}  ({} | {})",
                            start + conn.line1 + 1,
                            start + conn.line2 + 1,
                            conn.classification.type_code(),
                            conn.domain1,
                            conn.domain2
                        );
                    }
                    if index + 1 < results.len() {
                        println!();
                    }
                }
            }
        }
    }

    Ok(())
}
