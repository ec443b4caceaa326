//! `basma distractors`: wrong-answer words for every target concept.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, instrument};

use crate::cli::{AppContext, DistractorsArgs, PolicyArg};
use crate::cli_ext::report::{Written, emit, load_scored, print_written};
use crate::core::distractor::{
    CandidateIndex, DistractorPolicy, RankCascade, TypedSlots, assign, vocabulary_map,
};
use crate::core::record::{ScoredRecord, fields, group_by_concept};
use crate::core::tiers::vocabularies;
use crate::infra::config::{Config, load_config};
use crate::infra::io::{HeadedTable, read_headed};

/// Policy choice plus the values that may be overridden per run
#[derive(Debug, Clone, Copy)]
pub struct Selection
{
    pub policy: PolicyArg,
    pub per_tier: usize,
    pub seed: u64,
}

impl Selection
{
    pub fn from_config(
        cfg: &Config,
        policy: PolicyArg,
    ) -> Self
    {
        Self { policy, per_tier: cfg.distractors.per_tier, seed: cfg.seed }
    }
}

fn build_policy(
    cfg: &Config,
    records: &[ScoredRecord],
    selection: &Selection,
) -> Box<dyn DistractorPolicy>
{
    let d = &cfg.distractors;
    match selection.policy
    {
        PolicyArg::Rank =>
        {
            let index = CandidateIndex::from_records(records, &d.candidate_tiers);
            info!(candidates = index.len(), "candidate index built");
            Box::new(RankCascade::new(index, selection.per_tier, d.msa_separator.as_str()))
        }
        PolicyArg::Typed =>
        {
            let groups = group_by_concept(records.iter().cloned());
            let index = CandidateIndex::from_vocabularies(&vocabularies(&groups));
            info!(candidates = index.len(), "candidate index built");
            Box::new(TypedSlots::new(index, d.typed_top_n, d.typed_max_edits))
        }
    }
}

/// Distractor table for `targets`; one output row per target row
#[instrument(skip_all, fields(policy = ?selection.policy, seed = selection.seed))]
pub fn distractors(
    cfg: &Config,
    records: &[ScoredRecord],
    targets: &HeadedTable,
    selection: &Selection,
) -> (Vec<String>, Vec<Vec<String>>)
{
    let groups = group_by_concept(records.iter().cloned());
    let vocabs = vocabulary_map(vocabularies(&groups));
    let policy = build_policy(cfg, records, selection);

    let mut rng = ChaCha8Rng::seed_from_u64(selection.seed);
    assign(policy.as_ref(), targets, &vocabs, &mut rng)
}

pub fn distractors_stage(
    ctx: &AppContext,
    cfg: &Config,
    records: &[ScoredRecord],
    targets: &HeadedTable,
    selection: &Selection,
    output: Option<&Path>,
) -> Result<Written>
{
    let (headers, rows) = distractors(cfg, records, targets, selection);
    let path = output.unwrap_or(&cfg.files.distractors);
    emit(ctx, "distractors", path, &headers, rows)
}

pub fn run(
    args: DistractorsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = load_config(ctx.config.as_deref())?;

    let mut selection = Selection::from_config(&cfg, args.policy);
    if let Some(n) = args.per_tier
    {
        if n == 0
        {
            bail!("--per-tier must be at least 1");
        }
        selection.per_tier = n;
    }
    if let Some(seed) = args.seed
    {
        selection.seed = seed;
    }

    let input = args
        .input
        .as_deref()
        .unwrap_or(&cfg.files.easiness);
    let records = load_scored(input)?;

    let targets_path = args
        .targets
        .as_deref()
        .unwrap_or(&cfg.files.targets);
    let targets = read_headed(targets_path)
        .with_context(|| format!("Failed to read targets table {}", targets_path.display()))?;
    targets
        .require_columns(targets_path, &[fields::ID])
        .context("Targets table is not usable")?;

    let written = distractors_stage(ctx, &cfg, &records, &targets, &selection, args.output.as_deref())?;
    print_written(ctx, &[written]);
    Ok(())
}
