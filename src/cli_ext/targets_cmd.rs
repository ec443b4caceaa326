//! `basma targets` and `basma targets-all`.

use std::path::Path;

use anyhow::Result;
use tracing::{info, instrument};

use crate::cli::{AppContext, TargetsAllArgs, TargetsArgs};
use crate::cli_ext::report::{Written, emit, load_scored, print_written};
use crate::core::record::{ScoredRecord, group_by_concept};
use crate::core::tiers::{TierSelection, long_form, long_form_headers, long_form_row, select_all, target_headers};
use crate::infra::config::{Config, load_config};
use crate::infra::io::{HeadedTable, Row};

/// Best exemplar per tier for every complete concept
#[derive(Debug, Clone, Default)]
pub struct Targets
{
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Targets
{
    /// The same rows keyed by column name, as the distractor stage reads them
    pub fn to_table(&self) -> HeadedTable
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect::<Row>()
            })
            .collect();
        HeadedTable { headers: self.headers.clone(), rows }
    }
}

#[instrument(skip_all, fields(records = records.len()))]
pub fn targets(records: &[ScoredRecord]) -> Targets
{
    let groups = group_by_concept(records.iter().cloned());
    let picks = select_all(&groups);
    info!(concepts = groups.len(), complete = picks.len(), "targets selected");

    Targets {
        headers: target_headers(),
        rows: picks
            .iter()
            .map(TierSelection::to_row)
            .collect(),
    }
}

pub fn targets_stage(
    ctx: &AppContext,
    cfg: &Config,
    records: &[ScoredRecord],
    output: Option<&Path>,
) -> Result<(Targets, Written)>
{
    let out = targets(records);
    let path = output.unwrap_or(&cfg.files.targets);
    let written = emit(ctx, "targets", path, &out.headers, out.rows.clone())?;
    Ok((out, written))
}

/// Long-form listing and its complete-concept subset
#[instrument(skip_all, fields(records = records.len()))]
pub fn targets_all(records: &[ScoredRecord]) -> (Vec<Vec<String>>, Vec<Vec<String>>)
{
    let lf = long_form(records);
    info!(rows = lf.all.len(), triplet_rows = lf.triplets.len(), "long form built");

    let rows = |recs: &[&ScoredRecord]| -> Vec<Vec<String>> {
        recs.iter()
            .map(|r| long_form_row(r))
            .collect()
    };
    (rows(lf.all.as_slice()), rows(lf.triplets.as_slice()))
}

pub fn targets_all_stage(
    ctx: &AppContext,
    cfg: &Config,
    records: &[ScoredRecord],
    args: &TargetsAllArgs,
) -> Result<Vec<Written>>
{
    let (all, triplets) = targets_all(records);
    let headers = long_form_headers();
    let long = args
        .long
        .as_deref()
        .unwrap_or(&cfg.files.targets_all_long);
    let trip = args
        .triplets
        .as_deref()
        .unwrap_or(&cfg.files.targets_all_triplets);

    Ok(vec![
        emit(ctx, "targets-all", long, &headers, all)?,
        emit(ctx, "targets-all", trip, &headers, triplets)?,
    ])
}

pub fn run(
    args: TargetsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = load_config(ctx.config.as_deref())?;
    let input = args
        .input
        .as_deref()
        .unwrap_or(&cfg.files.easiness);
    let records = load_scored(input)?;

    let (_, written) = targets_stage(ctx, &cfg, &records, args.output.as_deref())?;
    print_written(ctx, &[written]);
    Ok(())
}

pub fn run_all(
    args: TargetsAllArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = load_config(ctx.config.as_deref())?;
    let input = args
        .input
        .as_deref()
        .unwrap_or(&cfg.files.easiness);
    let records = load_scored(input)?;

    let written = targets_all_stage(ctx, &cfg, &records, &args)?;
    print_written(ctx, &written);
    Ok(())
}
