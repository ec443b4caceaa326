//! `basma score`: attach levels, easiness score and category to the lexicon.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::cli::{AppContext, ScoreArgs};
use crate::cli_ext::report::{Written, emit, print_written};
use crate::core::record::{LexicalRecord, ScoredRecord, scored_headers};
use crate::core::resolve::{RComLookup, ScoreResolver};
use crate::core::table::ScoringTable;
use crate::infra::config::{Config, load_config};
use crate::infra::io::{project, read_headed};

/// Scored lexicon with its output column order
#[derive(Debug, Clone)]
pub struct Scored
{
    pub headers: Vec<String>,
    pub records: Vec<ScoredRecord>,
}

impl Scored
{
    pub fn rows(&self) -> Vec<Vec<String>>
    {
        self.records
            .iter()
            .map(|r| project(&r.to_row(), &self.headers))
            .collect()
    }
}

/// Input locations for one scoring run
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a>
{
    pub scores: &'a Path,
    pub scoring_table: &'a Path,
    pub frequencies: &'a Path,
}

#[instrument(skip_all, fields(scores = %inputs.scores.display()))]
pub fn score(
    cfg: &Config,
    inputs: ScoreInputs<'_>,
) -> Result<Scored>
{
    let lexicon = read_headed(inputs.scores)
        .with_context(|| format!("Failed to read scores table {}", inputs.scores.display()))?;

    let table = ScoringTable::load(inputs.scoring_table, &cfg.scoring_table, &cfg.category_thresholds)
        .with_context(|| format!("Failed to load scoring table {}", inputs.scoring_table.display()))?;
    info!(entries = table.len(), "scoring table loaded");

    let rcom = RComLookup::load(inputs.frequencies, &cfg.frequencies_file.columns).with_context(|| {
        format!("Failed to read frequencies table {}", inputs.frequencies.display())
    })?;
    info!(entries = rcom.len(), "rcom lookup loaded");

    let resolver = ScoreResolver::new(&table, &rcom, &cfg.mapping_thresholds);
    let headers = scored_headers(&lexicon.headers);
    let records = resolver.resolve_all(
        lexicon
            .rows
            .into_iter()
            .map(LexicalRecord::new),
    );

    let scored = records
        .iter()
        .filter(|r| r.score.is_some())
        .count();
    info!(rows = records.len(), scored, "lexicon scored");

    Ok(Scored { headers, records })
}

/// Score and write the easiness table
pub fn stage(
    ctx: &AppContext,
    cfg: &Config,
    args: &ScoreArgs,
) -> Result<(Scored, Written)>
{
    let files = &cfg.files;
    let inputs = ScoreInputs {
        scores: args
            .scores
            .as_deref()
            .unwrap_or(&files.scores),
        scoring_table: args
            .scoring_table
            .as_deref()
            .unwrap_or(&files.scoring_table),
        frequencies: args
            .frequencies
            .as_deref()
            .unwrap_or(&files.frequencies),
    };
    let output = args
        .output
        .as_deref()
        .unwrap_or(&files.easiness);

    let scored = score(cfg, inputs)?;
    let written = emit(ctx, "score", output, &scored.headers, scored.rows())?;
    Ok((scored, written))
}

pub fn run(
    args: ScoreArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = load_config(ctx.config.as_deref())?;
    let (_, written) = stage(ctx, &cfg, &args)?;
    print_written(ctx, &[written]);
    Ok(())
}
