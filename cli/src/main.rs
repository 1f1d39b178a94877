//! markspan CLI - extract highlight ranges from marked-up strings

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use markspan::model::Mark;
use markspan::render::{self, MarkVisitor, VisitorAction};
use markspan::{
    Catalog, CodeUnit, Extraction, ExtractionStats, FileLanguageStore, JsonFormat, Language,
    LanguageStore, MarkupParser, MatchStrategy, ParseOptions,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "markspan")]
#[command(version)]
#[command(about = "Extract plain text and highlight ranges from marked-up strings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plain text and mark ranges from markup
    Extract {
        /// Markup to extract (stdin if neither this nor --file is given)
        #[arg(value_name = "MARKUP")]
        markup: Option<String>,

        /// Read markup from a file (UTF-8 or UTF-16 with BOM)
        #[arg(short, long, value_name = "FILE", conflicts_with = "markup")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Only report the first mark
        #[arg(long)]
        first: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Look up a localized string and extract its marks
    Lookup {
        /// Localization key
        #[arg(value_name = "KEY")]
        key: String,

        /// Catalog: a directory of *.lproj tables or a JSON file
        #[arg(short, long, env = "MARKSPAN_CATALOG", value_name = "PATH")]
        catalog: PathBuf,

        /// Language (defaults to the stored preference)
        #[arg(short, long)]
        lang: Option<String>,

        /// Language preference file
        #[arg(long, env = "MARKSPAN_PREFS", default_value = ".markspan/language.json")]
        prefs: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "annotated")]
        format: OutputFormat,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Extract every string of a catalog and report problems
    Check {
        /// Catalog: a directory of *.lproj tables or a JSON file
        #[arg(short, long, env = "MARKSPAN_CATALOG", value_name = "PATH")]
        catalog: PathBuf,

        /// Language to check (all catalog languages if not specified)
        #[arg(short, long)]
        lang: Option<String>,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Show or change the stored display language
    Lang {
        #[command(subcommand)]
        action: LangAction,

        /// Language preference file
        #[arg(long, env = "MARKSPAN_PREFS", default_value = ".markspan/language.json", global = true)]
        prefs: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum LangAction {
    /// Print the stored language
    Show,
    /// Store a language choice
    Set {
        /// Language code (en, zh_Hans, zh_Hant)
        #[arg(value_name = "LANG")]
        lang: String,
    },
    /// List supported languages
    List,
}

#[derive(clap::Args)]
struct ParseArgs {
    /// How mark ranges are located
    #[arg(long, value_enum, default_value = "tracked")]
    strategy: Strategy,

    /// Unit the ranges are reported in
    #[arg(long, value_enum, default_value = "utf16")]
    unit: Unit,

    /// Collapse whitespace like an HTML renderer
    #[arg(long)]
    collapse_whitespace: bool,

    /// Recover from malformed markup instead of failing
    #[arg(long)]
    lenient: bool,

    /// Mark element tag name
    #[arg(long, default_value = "a")]
    tag: String,

    /// Ordinal attribute name
    #[arg(long, default_value = "id")]
    ordinal_attr: String,
}

impl ParseArgs {
    fn options(&self) -> ParseOptions {
        let mut options = ParseOptions::new()
            .with_strategy(self.strategy.into())
            .with_unit(self.unit.into())
            .with_mark_tag(&self.tag)
            .with_ordinal_attr(&self.ordinal_attr);
        if self.collapse_whitespace {
            options = options.collapse_whitespace();
        }
        if self.lenient {
            options = options.lenient();
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain text followed by one range per line
    Text,
    /// Full extraction as JSON
    Json,
    /// Plain text with marks highlighted
    Annotated,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Offsets recorded while stripping tags
    Tracked,
    /// Substring search over the plain text
    Search,
}

impl From<Strategy> for MatchStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Tracked => MatchStrategy::Tracked,
            Strategy::Search => MatchStrategy::Search,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Unit {
    /// UTF-16 code units
    Utf16,
    /// UTF-8 bytes
    Utf8,
    /// Unicode scalar values
    Char,
}

impl From<Unit> for CodeUnit {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Utf16 => CodeUnit::Utf16,
            Unit::Utf8 => CodeUnit::Utf8,
            Unit::Char => CodeUnit::Char,
        }
    }
}

/// Highlights marks with terminal colors.
struct ColorVisitor;

impl MarkVisitor for ColorVisitor {
    fn visit_mark(&mut self, mark: &Mark, _position: usize) -> VisitorAction {
        VisitorAction::Replace(mark.text.cyan().underline().to_string())
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            markup,
            file,
            format,
            compact,
            first,
            parse,
        } => cmd_extract(markup, file.as_deref(), format, compact, first, &parse),
        Commands::Lookup {
            key,
            catalog,
            lang,
            prefs,
            format,
            parse,
        } => cmd_lookup(&key, &catalog, lang.as_deref(), &prefs, format, &parse),
        Commands::Check {
            catalog,
            lang,
            parse,
        } => cmd_check(&catalog, lang.as_deref(), &parse),
        Commands::Lang { action, prefs } => cmd_lang(action, &prefs),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    markup: Option<String>,
    file: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    first: bool,
    parse: &ParseArgs,
) -> CliResult {
    let parser = MarkupParser::with_options(parse.options());

    let mut extraction = match (markup, file) {
        (Some(markup), _) => parser.parse(&markup)?,
        (None, Some(path)) => parser.parse_file(path)?,
        (None, None) => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data)?;
            parser.parse_bytes(&data)?
        }
    };

    if first {
        extraction.marks.truncate(1);
    }

    print_extraction(&extraction, format, compact)
}

fn cmd_lookup(
    key: &str,
    catalog: &Path,
    lang: Option<&str>,
    prefs: &Path,
    format: OutputFormat,
    parse: &ParseArgs,
) -> CliResult {
    let catalog = Catalog::load(catalog)?;
    let lang = resolve_language(lang, prefs)?;
    log::debug!("Looking up {:?} in {:?}", key, lang);

    let extraction = catalog.extract(key, lang, &parse.options())?;
    print_extraction(&extraction, format, false)
}

fn cmd_check(catalog: &Path, lang: Option<&str>, parse: &ParseArgs) -> CliResult {
    let catalog = Catalog::load(catalog)?;
    let languages = match lang {
        Some(code) => vec![code.parse::<Language>()?],
        None => catalog.languages(),
    };
    let options = parse.options();

    let mut total = ExtractionStats::new();
    let mut failures = 0;

    for lang in languages {
        println!("{} {}", lang.name().cyan().bold(), format!("({})", lang).dimmed());
        println!("{}", "─".repeat(40).dimmed());

        for (key, result) in catalog.extract_all(Some(lang), &options) {
            match result {
                Ok(extraction) => {
                    for miss in &extraction.misses {
                        println!("  {} {}: {}", "miss".yellow(), key, miss);
                    }
                    total.merge(&ExtractionStats::from_extraction(&extraction));
                }
                Err(e) => {
                    println!("  {} {}: {}", "fail".red(), key, e);
                    failures += 1;
                }
            }
        }
        println!();
    }

    println!("{}", "Summary".cyan().bold());
    println!("{}: {}", "Strings".bold(), total.document_count);
    println!("{}: {}", "Marks".bold(), total.element_count);
    println!("{}: {}", "Located".bold(), total.matched_count);
    println!("{}: {}", "Misses".bold(), total.miss_count);
    println!("{}: {:.1}%", "Match rate".bold(), total.match_rate() * 100.0);
    println!("{}: {}", "Failures".bold(), failures);

    if failures > 0 {
        return Err(format!("{} strings failed to extract", failures).into());
    }
    Ok(())
}

fn cmd_lang(action: LangAction, prefs: &Path) -> CliResult {
    let mut store = FileLanguageStore::new(prefs);

    match action {
        LangAction::Show => match store.load_preference()? {
            Some(preference) => println!(
                "{} {} {}",
                preference.language.name().bold(),
                format!("({})", preference.language).dimmed(),
                format!("set {}", preference.updated_at.format("%Y-%m-%d %H:%M UTC")).dimmed()
            ),
            None => println!(
                "{} {}",
                Language::FALLBACK.name().bold(),
                "(default, nothing stored)".dimmed()
            ),
        },
        LangAction::Set { lang } => {
            let lang: Language = lang.parse()?;
            store.save(lang)?;
            println!("{} {}", "Language set to".green(), lang.name());
        }
        LangAction::List => {
            for lang in Language::ALL {
                println!("  {:<8} {}", lang.code(), lang.name());
            }
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "markspan".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Highlight range extraction for localized strings");
    println!();
    println!("License: MIT");
}

/// Explicit `--lang` wins, then the stored preference; `None` means the fallback language.
fn resolve_language(lang: Option<&str>, prefs: &Path) -> Result<Option<Language>, markspan::Error> {
    match lang {
        Some(code) => code.parse().map(Some),
        None => FileLanguageStore::new(prefs).load(),
    }
}

fn print_extraction(extraction: &Extraction, format: OutputFormat, compact: bool) -> CliResult {
    match format {
        OutputFormat::Json => {
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            println!("{}", render::to_json(extraction, format)?);
        }
        OutputFormat::Text => {
            println!("{}", extraction.plain_text);
            for mark in &extraction.marks {
                println!(
                    "{} {} {}",
                    mark.range.to_string().bold(),
                    extraction.unit.to_string().dimmed(),
                    mark.text
                );
            }
        }
        OutputFormat::Annotated => {
            println!("{}", render::to_annotated(extraction, &mut ColorVisitor));
        }
    }

    for miss in &extraction.misses {
        eprintln!("{}: {}", "Warning".yellow().bold(), miss);
    }

    Ok(())
}
