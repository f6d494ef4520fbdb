use catalog_domain::{ItemKind, Listing};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CATALOG_BUILD_COMMIT"), ")");

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse the Marvel comics catalog one page at a time", long_about = None)]
#[command(version = VERSION)]
pub struct Cli {
    /// Path to a TOML config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE", env = "CATALOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the Marvel public API
    #[arg(long, global = true, env = "MARVEL_API_URL")]
    pub api_url: Option<String>,

    /// Marvel API public key
    #[arg(long, global = true, env = "MARVEL_PUBLIC_KEY", hide_env_values = true)]
    pub public_key: Option<String>,

    /// Marvel API private key
    #[arg(long, global = true, env = "MARVEL_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a single page of a listing
    Page(PageArgs),
    /// Mount a listing view and scroll it with simulated visibility signals
    Scroll(ScrollArgs),
    /// Fetch a single character, comic or event
    Show(ShowArgs),
    /// Print the effective configuration
    Config,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct SourceArgs {
    /// Listing to page through, e.g. `characters` or `comics/82967/characters`
    #[arg(value_name = "LISTING")]
    pub listing: Listing,

    /// Serve items from a JSON array file instead of the API
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

#[derive(Args)]
pub struct PageArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Page size (defaults to paging.page_limit)
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args)]
pub struct ScrollArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Size of the first page (defaults to paging.page_limit)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Number of visibility signals to send
    #[arg(long, default_value_t = 1)]
    pub triggers: u32,

    /// Intersection ratio reported with every signal
    #[arg(long, default_value_t = 1.0)]
    pub ratio: f64,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(value_enum)]
    pub kind: KindArg,

    pub id: u64,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Character,
    Comic,
    Event,
}

impl From<KindArg> for ItemKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Character => ItemKind::Character,
            KindArg::Comic => ItemKind::Comic,
            KindArg::Event => ItemKind::Event,
        }
    }
}
