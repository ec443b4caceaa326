//! `basma group`: each concept's words by tier.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::cli::{AppContext, GroupArgs};
use crate::cli_ext::report::{Written, emit, load_scored, print_written};
use crate::core::record::{ScoredRecord, group_by_concept};
use crate::core::tiers::{grouped_headers, vocabularies};
use crate::infra::config::{Config, load_config};

pub fn group_stage(
    ctx: &AppContext,
    cfg: &Config,
    records: &[ScoredRecord],
    output: Option<&Path>,
) -> Result<Written>
{
    let groups = group_by_concept(records.iter().cloned());
    let rows: Vec<Vec<String>> = vocabularies(&groups)
        .iter()
        .map(|v| v.to_row())
        .collect();
    info!(concepts = rows.len(), "concepts grouped");

    let path = output.unwrap_or(&cfg.files.grouped);
    emit(ctx, "group", path, &grouped_headers(), rows)
}

pub fn run(
    args: GroupArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = load_config(ctx.config.as_deref())?;
    let input = args
        .input
        .as_deref()
        .unwrap_or(&cfg.files.easiness);
    let records = load_scored(input)?;

    let written = group_stage(ctx, &cfg, &records, args.output.as_deref())?;
    print_written(ctx, &[written]);
    Ok(())
}
