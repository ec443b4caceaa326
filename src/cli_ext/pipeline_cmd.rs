//! `basma pipeline`: every stage in order, in one process.

use anyhow::Result;
use tracing::{info, instrument};

use crate::cli::{AppContext, PipelineArgs, ScoreArgs, TargetsAllArgs};
use crate::cli_ext::distractors_cmd::{Selection, distractors_stage};
use crate::cli_ext::group_cmd::group_stage;
use crate::cli_ext::report::{Written, print_summary};
use crate::cli_ext::score_cmd;
use crate::cli_ext::targets_cmd::{targets_all_stage, targets_stage};
use crate::infra::config::{Config, load_config};

/// Run score, targets, targets-all, group and optionally distractors.
/// Later stages consume earlier results in memory.
#[instrument(skip_all, fields(with_distractors = args.with_distractors))]
pub fn pipeline(
    ctx: &AppContext,
    cfg: &Config,
    args: &PipelineArgs,
) -> Result<Vec<Written>>
{
    let mut written = Vec::new();

    let (scored, w) = score_cmd::stage(ctx, cfg, &ScoreArgs::default())?;
    written.push(w);
    let records = scored.records;

    let (targets, w) = targets_stage(ctx, cfg, &records, None)?;
    written.push(w);

    written.extend(targets_all_stage(ctx, cfg, &records, &TargetsAllArgs::default())?);
    written.push(group_stage(ctx, cfg, &records, None)?);

    if args.with_distractors
    {
        let selection = Selection::from_config(cfg, args.policy);
        written.push(distractors_stage(ctx, cfg, &records, &targets.to_table(), &selection, None)?);
    }

    info!(stages = written.len(), "pipeline finished");
    Ok(written)
}

pub fn run(
    args: PipelineArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = load_config(ctx.config.as_deref())?;
    let written = pipeline(ctx, &cfg, &args)?;
    print_summary(ctx, &written);
    Ok(())
}
