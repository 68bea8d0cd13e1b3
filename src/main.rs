use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use conftex::model::ParseOptions;
use conftex::pipeline::{self, Document, RenderOptions};
use conftex::render::BlockOrder;
use conftex::{ProgramError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Render(args) => execute_render(args),
        Command::Dump(args) => execute_dump(args),
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ProgramError::Logging(error.to_string()))
}

fn execute_render(args: RenderArgs) -> Result<()> {
    check_inputs(&args.sessions, args.authors.as_deref())?;

    let documents = if args.documents.is_empty() {
        Document::ALL.to_vec()
    } else {
        args.documents.iter().copied().map(Document::from).collect()
    };
    let options = RenderOptions {
        parse: args.parse_options(),
        documents,
        order: args.order.map(BlockOrder::from).unwrap_or_default(),
        author_index: !args.no_author_index,
    };
    pipeline::write_program(
        &args.sessions,
        args.authors.as_deref(),
        &args.out_dir,
        &options,
    )
}

fn execute_dump(args: DumpArgs) -> Result<()> {
    check_inputs(&args.sessions, args.authors.as_deref())?;

    let options = ParseOptions {
        max_slots: args.max_slots,
        ..ParseOptions::default()
    };
    let json = pipeline::dump_model(
        &args.sessions,
        args.authors.as_deref(),
        &options,
        args.pretty,
    )?;
    println!("{json}");
    Ok(())
}

fn check_inputs(sessions: &std::path::Path, authors: Option<&std::path::Path>) -> Result<()> {
    if !sessions.exists() {
        return Err(ProgramError::MissingInput(sessions.to_path_buf()));
    }
    if let Some(path) = authors {
        if !path.exists() {
            return Err(ProgramError::MissingInput(path.to_path_buf()));
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Render conference program CSV exports into LaTeX include files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the LaTeX program documents.
    Render(RenderArgs),
    /// Print the normalized conference model as JSON.
    Dump(DumpArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Sessions spreadsheet (CSV export).
    #[arg(long)]
    sessions: PathBuf,

    /// Optional authors spreadsheet used to resolve missing affiliations.
    #[arg(long)]
    authors: Option<PathBuf>,

    /// Directory receiving the rendered include files.
    #[arg(long, default_value = "program")]
    out_dir: PathBuf,

    /// Documents to render. Defaults to all of them.
    #[arg(long, value_enum, value_delimiter = ',')]
    documents: Vec<DocumentKind>,

    /// Block order of the flat contribution list.
    #[arg(long, value_enum)]
    order: Option<BlockOrderKind>,

    /// Uppercase percentage above which a title is rewritten to title case.
    #[arg(long, default_value_t = 75.0)]
    uppercase_threshold: f64,

    /// Leave titles untouched instead of normalizing their case.
    #[arg(long)]
    keep_title_case: bool,

    /// Maximum number of contribution slots scanned per session row.
    #[arg(long, default_value_t = 80)]
    max_slots: usize,

    /// Skip the author-index annotations in the abstracts booklet.
    #[arg(long)]
    no_author_index: bool,
}

impl RenderArgs {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_slots: self.max_slots,
            uppercase_threshold: self.uppercase_threshold,
            fix_uppercase_titles: !self.keep_title_case,
        }
    }
}

#[derive(clap::Args)]
struct DumpArgs {
    /// Sessions spreadsheet (CSV export).
    #[arg(long)]
    sessions: PathBuf,

    /// Optional authors spreadsheet used to resolve missing affiliations.
    #[arg(long)]
    authors: Option<PathBuf>,

    /// Maximum number of contribution slots scanned per session row.
    #[arg(long, default_value_t = 80)]
    max_slots: usize,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DocumentKind {
    Overview,
    Contributions,
    Abstracts,
    Tables,
}

impl From<DocumentKind> for Document {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Overview => Document::Overview,
            DocumentKind::Contributions => Document::Contributions,
            DocumentKind::Abstracts => Document::Abstracts,
            DocumentKind::Tables => Document::Tables,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum BlockOrderKind {
    TalksFirst,
    PostersFirst,
}

impl From<BlockOrderKind> for BlockOrder {
    fn from(kind: BlockOrderKind) -> Self {
        match kind {
            BlockOrderKind::TalksFirst => BlockOrder::TalksFirst,
            BlockOrderKind::PostersFirst => BlockOrder::PostersFirst,
        }
    }
}
