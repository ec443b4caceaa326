use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    pub quiet: bool,             // global --quiet
    pub no_color: bool,          // global --no-color
    pub dry_run: bool,           // global --dry-run
    pub config: Option<PathBuf>, // global --config
}

#[derive(Parser)]
#[command(name = "basma")]
#[command(
    about = "Score dialectal words by easiness and pick per-concept targets and distractors"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: first of basma.toml/.yaml/.json/.basma.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Compute everything but write no files
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl Cli {
    /// Build a context once, pass everywhere
    pub fn context(&self) -> AppContext {
        AppContext {
            quiet: self.quiet,
            no_color: self.no_color,
            dry_run: self.dry_run,
            config: self.config.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Attach levels, score and category to every lexicon entry
    Score(ScoreArgs),

    /// Pick the best Easy/Medium/Hard word of every complete concept
    Targets(TargetsArgs),

    /// List every categorized word in long form, plus complete concepts only
    TargetsAll(TargetsAllArgs),

    /// Collect each concept's words by tier
    Group(GroupArgs),

    /// Choose distractors for every target concept
    Distractors(DistractorsArgs),

    /// Run score, targets, targets-all and group in order
    Pipeline(PipelineArgs),

    /// Initialize a basma.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug, Default)]
pub struct ScoreArgs {
    /// Lexicon table with raw signals (default: files.scores)
    #[arg(long)]
    pub scores: Option<PathBuf>,

    /// Scoring table source (default: files.scoring_table)
    #[arg(long)]
    pub scoring_table: Option<PathBuf>,

    /// Frequencies table with RCom values (default: files.frequencies)
    #[arg(long)]
    pub frequencies: Option<PathBuf>,

    /// Output easiness table (default: files.easiness)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Default)]
pub struct TargetsArgs {
    /// Easiness table (default: files.easiness)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output targets table (default: files.targets)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Default)]
pub struct TargetsAllArgs {
    /// Easiness table (default: files.easiness)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Every categorized word (default: files.targets_all_long)
    #[arg(long)]
    pub long: Option<PathBuf>,

    /// Words of complete concepts only (default: files.targets_all_triplets)
    #[arg(long)]
    pub triplets: Option<PathBuf>,
}

#[derive(Parser, Debug, Default)]
pub struct GroupArgs {
    /// Easiness table (default: files.easiness)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output grouped table (default: files.grouped)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Closest words by edit distance, per tier
    #[default]
    Rank,
    /// One tagged word per slot ([rand], [hard], [edit])
    Typed,
}

#[derive(Parser, Debug, Default)]
pub struct DistractorsArgs {
    /// Easiness table (default: files.easiness)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Targets table (default: files.targets)
    #[arg(long)]
    pub targets: Option<PathBuf>,

    /// Output distractor table (default: files.distractors)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Selection policy
    #[arg(long, value_enum, default_value_t = PolicyArg::Rank)]
    pub policy: PolicyArg,

    /// Distractors per tier for the rank policy (default: distractors.per_tier)
    #[arg(long)]
    pub per_tier: Option<usize>,

    /// Random seed (default: seed)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Parser, Debug, Default)]
pub struct PipelineArgs {
    /// Also run the distractors stage
    #[arg(long)]
    pub with_distractors: bool,

    /// Distractor policy when --with-distractors is set
    #[arg(long, value_enum, default_value_t = PolicyArg::Rank)]
    pub policy: PolicyArg,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
