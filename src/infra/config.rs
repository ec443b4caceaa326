use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{AppContext, InitArgs};
use crate::core::level::{LevelMapper, Thresholds};
use crate::core::resolve::FrequencyColumns;
use crate::core::table::{Category, CategoryThresholds, TableLayout};
use crate::error::Error;

/// Config file names tried in the working directory, first match wins
pub const CONFIG_FILES: [&str; 4] = ["basma.toml", "basma.yaml", "basma.json", ".basma.toml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Seed for every randomized tie-break
    pub seed: u64,

    /// Input and output table locations
    pub files: FilesConfig,

    /// Layout of the scoring table source
    pub scoring_table: TableLayout,

    /// Layout of the frequencies table (root-commonality source)
    pub frequencies_file: FrequenciesConfig,

    /// Raw signal to level cutoffs
    pub mapping_thresholds: LevelMapper,

    /// Score to category cutoffs for table rows without a category
    pub category_thresholds: CategoryThresholds,

    /// Distractor selection settings
    pub distractors: DistractorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig
{
    pub scores: PathBuf,
    pub frequencies: PathBuf,
    pub scoring_table: PathBuf,
    pub easiness: PathBuf,
    pub targets: PathBuf,
    pub targets_all_long: PathBuf,
    pub targets_all_triplets: PathBuf,
    pub grouped: PathBuf,
    pub distractors: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequenciesConfig
{
    pub columns: FrequencyColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistractorConfig
{
    /// Picks per tier for the rank cascade
    pub per_tier: usize,
    /// Tiers whose words may be offered as distractors
    pub candidate_tiers: Vec<Category>,
    /// Separator between alternatives in the MSA gloss
    pub msa_separator: String,
    /// Closest candidates kept for the typed `[edit]` slot
    pub typed_top_n: usize,
    /// Edit budget for the typed `[edit]` slot
    pub typed_max_edits: usize,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            seed: 42,
            files: FilesConfig::default(),
            scoring_table: TableLayout::default(),
            frequencies_file: FrequenciesConfig::default(),
            mapping_thresholds: LevelMapper::default(),
            category_thresholds: CategoryThresholds::default(),
            distractors: DistractorConfig::default(),
        }
    }
}

impl Default for FilesConfig
{
    fn default() -> Self
    {
        let inter = Path::new("data/intermediate");
        let out = Path::new("data/output");
        Self {
            scores: inter.join("scores.csv"),
            frequencies: inter.join("frequencies.csv"),
            scoring_table: inter.join("scoring_table.csv"),
            easiness: out.join("easiness.csv"),
            targets: out.join("targets.csv"),
            targets_all_long: out.join("targets_all_long.csv"),
            targets_all_triplets: out.join("targets_all_triplets.csv"),
            grouped: out.join("concepts_grouped.csv"),
            distractors: out.join("distractors.csv"),
        }
    }
}

impl Default for DistractorConfig
{
    fn default() -> Self
    {
        Self {
            per_tier: 2,
            candidate_tiers: vec![Category::Medium, Category::Hard],
            msa_separator: "،".to_string(),
            typed_top_n: 6,
            typed_max_edits: 2,
        }
    }
}

impl Config
{
    /// Reject settings that contradict each other
    pub fn validate(&self) -> crate::error::Result<()>
    {
        let m = &self.mapping_thresholds;
        for (name, t) in [("dfreq", &m.dfreq), ("dcom", &m.dcom), ("rcom", &m.rcom)]
        {
            check_thresholds(name, t)?;
        }

        let c = &self.category_thresholds;
        if c.medium_min > c.easy_min
        {
            return Err(Error::InvalidConfig(format!(
                "category_thresholds: medium_min ({}) exceeds easy_min ({})",
                c.medium_min, c.easy_min
            )));
        }

        let t = &self.scoring_table;
        if t.header_row >= t.data_start_row
        {
            return Err(Error::InvalidConfig(format!(
                "scoring_table: header_row ({}) must come before data_start_row ({})",
                t.header_row, t.data_start_row
            )));
        }

        if self.distractors.per_tier == 0
        {
            return Err(Error::InvalidConfig("distractors.per_tier must be at least 1".into()));
        }
        Ok(())
    }
}

fn check_thresholds(
    name: &str,
    t: &Thresholds,
) -> crate::error::Result<()>
{
    if t.low_max > t.medium_max
    {
        return Err(Error::InvalidConfig(format!(
            "mapping_thresholds.{name}: low_max ({}) exceeds medium_max ({})",
            t.low_max, t.medium_max
        )));
    }
    Ok(())
}

/// Load configuration from `explicit`, or the first config file found in the
/// working directory, layered under `BASMA_*` environment variables.
pub fn load_config(explicit: Option<&Path>) -> Result<Config>
{
    let mut builder = config::Config::builder();

    match explicit
    {
        Some(path) =>
        {
            if !path.exists()
            {
                return Err(Error::MissingInput { path: path.to_path_buf() })
                    .context("Failed to load configuration");
            }
            builder = builder.add_source(config::File::from(path));
        }
        None =>
        {
            if let Some(found) = CONFIG_FILES
                .iter()
                .find(|p| Path::new(p).exists())
            {
                debug!(path = *found, "using config file");
                builder = builder.add_source(config::File::with_name(found));
            }
        }
    }

    // BASMA_SEED=7, BASMA_DISTRACTORS__PER_TIER=3
    builder = builder.add_source(
        config::Environment::with_prefix("BASMA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    parsed
        .validate()
        .context("Configuration rejected")?;
    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("basma.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        println!("{toml_string}");
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
