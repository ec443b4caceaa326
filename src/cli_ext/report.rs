//! Writing stage outputs and telling the user about them.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled};
use tracing::info;

use crate::cli::AppContext;
use crate::core::record::{ScoredRecord, fields};
use crate::infra::io::{HeadedTable, read_headed, write_table};

/// One table a stage produced
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct Written
{
    #[tabled(rename = "Stage")]
    pub stage: &'static str,
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[tabled(rename = "Path")]
    pub path: String,
}

/// Write `rows` to `path` unless this is a dry run.
pub fn emit(
    ctx: &AppContext,
    stage: &'static str,
    path: &Path,
    headers: &[String],
    rows: Vec<Vec<String>>,
) -> Result<Written>
{
    let count = rows.len();
    if !ctx.dry_run
    {
        write_table(path, headers, rows)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    info!(stage, rows = count, path = %path.display(), dry_run = ctx.dry_run, "stage output");

    Ok(Written { stage, rows: count, path: path.display().to_string() })
}

/// `Wrote: <path> (<n> rows)` per table
pub fn print_written(
    ctx: &AppContext,
    written: &[Written],
)
{
    if ctx.quiet
    {
        return;
    }
    let verb = if ctx.dry_run { "Would write:" } else { "Wrote:" };
    for w in written
    {
        if ctx.no_color
        {
            println!("{verb} {} ({} rows)", w.path, w.rows);
        }
        else
        {
            println!("{} {} ({} rows)", verb.green(), w.path, w.rows);
        }
    }
}

/// Per-table lines followed by a summary table
pub fn print_summary(
    ctx: &AppContext,
    written: &[Written],
)
{
    print_written(ctx, written);
    if ctx.quiet || written.is_empty()
    {
        return;
    }
    let table = Table::new(written.to_vec()).to_string();
    if ctx.no_color
    {
        println!("\n{table}");
    }
    else
    {
        println!("\n{}\n{table}", "Pipeline summary".bold());
    }
}

/// Read a previously written easiness table
pub fn load_scored(path: &Path) -> Result<Vec<ScoredRecord>>
{
    let table = read_scored_table(path)?;
    Ok(table
        .rows
        .into_iter()
        .map(ScoredRecord::from_scored_row)
        .collect())
}

fn read_scored_table(path: &Path) -> Result<HeadedTable>
{
    let table =
        read_headed(path).with_context(|| format!("Failed to read easiness table {}", path.display()))?;
    table
        .require_columns(path, &[fields::ID, fields::CODA, fields::CATEGORY])
        .context("Easiness table is not usable")?;
    Ok(table)
}
