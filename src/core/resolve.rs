//! Score resolution: record → level tuple → scoring-table entry.
//!
//! The root-commonality signal is not carried by the subject table itself; it
//! comes from a secondary keyed lookup over the frequencies table. Both indices
//! are built up front and only borrowed here.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::core::level::LevelMapper;
use crate::core::record::{LexicalRecord, ScoredRecord, fields};
use crate::core::table::ScoringTable;
use crate::error::Result;
use crate::infra::io::read_raw_rows;

/// Column positions (0-based) in the frequencies table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyColumns
{
    pub english: usize,
    pub french: usize,
    pub msa: usize,
    pub pos: usize,
    pub coda: usize,
    pub rcom: usize,
}

impl FrequencyColumns
{
    fn width(&self) -> usize
    {
        [self.english, self.french, self.msa, self.pos, self.coda, self.rcom]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl Default for FrequencyColumns
{
    fn default() -> Self
    {
        Self { english: 0, french: 1, msa: 2, pos: 3, coda: 7, rcom: 10 }
    }
}

/// (English, French, MSA, POS, CODA), every part non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootKey
{
    english: String,
    french: String,
    msa: String,
    pos: String,
    coda: String,
}

impl RootKey
{
    pub fn new(
        english: &str,
        french: &str,
        msa: &str,
        pos: &str,
        coda: &str,
    ) -> Option<Self>
    {
        let parts = [english.trim(), french.trim(), msa.trim(), pos.trim(), coda.trim()];
        if parts
            .iter()
            .any(|p| p.is_empty())
        {
            return None;
        }
        let [english, french, msa, pos, coda] = parts.map(str::to_string);
        Some(Self { english, french, msa, pos, coda })
    }

    pub fn of(record: &LexicalRecord) -> Option<Self>
    {
        Self::new(
            record.get(fields::ENGLISH),
            record.get(fields::FRENCH),
            record.get(fields::MSA),
            record.get(fields::POS),
            record.get(fields::CODA),
        )
    }
}

/// Root-commonality raw values keyed by concept gloss + surface form
#[derive(Debug, Clone, Default)]
pub struct RComLookup
{
    entries: HashMap<RootKey, String>,
}

impl RComLookup
{
    /// Load from the frequencies table. A missing file is not fatal: the
    /// lookup is empty and every record gets an unknown RCom level.
    #[instrument(skip(columns), fields(path = %path.display()))]
    pub fn load(
        path: &Path,
        columns: &FrequencyColumns,
    ) -> Result<Self>
    {
        if !path.exists()
        {
            warn!("frequencies file not found, RCom levels will be unknown");
            return Ok(Self::default());
        }

        let rows = read_raw_rows(path)?;
        Ok(Self::from_rows(rows.iter().skip(1), columns))
    }

    /// Build from data rows (header already stripped). Later rows overwrite.
    pub fn from_rows<'a, I>(
        rows: I,
        columns: &FrequencyColumns,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Vec<String>>,
    {
        let width = columns.width();
        let mut entries = HashMap::new();
        let mut skipped = 0usize;

        for row in rows
        {
            if row.len() < width
            {
                skipped += 1;
                continue;
            }
            let key = RootKey::new(
                &row[columns.english],
                &row[columns.french],
                &row[columns.msa],
                &row[columns.pos],
                &row[columns.coda],
            );
            let value = row[columns.rcom].trim();

            match key
            {
                Some(key) if !value.is_empty() =>
                {
                    entries.insert(key, value.to_string());
                }
                _ => skipped += 1,
            }
        }

        debug!(entries = entries.len(), skipped, "rcom lookup built");
        Self { entries }
    }

    pub fn get(
        &self,
        record: &LexicalRecord,
    ) -> Option<&str>
    {
        RootKey::of(record)
            .and_then(|k| self.entries.get(&k))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize
    {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.entries
            .is_empty()
    }
}

/// Joins records against the scoring table
pub struct ScoreResolver<'a>
{
    table: &'a ScoringTable,
    rcom: &'a RComLookup,
    mapper: &'a LevelMapper,
}

impl<'a> ScoreResolver<'a>
{
    pub fn new(
        table: &'a ScoringTable,
        rcom: &'a RComLookup,
        mapper: &'a LevelMapper,
    ) -> Self
    {
        Self { table, rcom, mapper }
    }

    pub fn resolve(
        &self,
        record: LexicalRecord,
    ) -> ScoredRecord
    {
        let rcom_raw = self
            .rcom
            .get(&record)
            .unwrap_or_default()
            .to_string();
        let rcom = Some(rcom_raw.as_str()).filter(|r| !r.is_empty());
        let levels = self
            .mapper
            .map(&record.signals(rcom));

        let (score, category) = match self
            .table
            .lookup(&levels)
        {
            Some(entry) => (Some(entry.score), Some(entry.category.clone())),
            None => (None, None),
        };

        ScoredRecord { record, levels, rcom_raw, score, category }
    }

    pub fn resolve_all<I>(
        &self,
        records: I,
    ) -> Vec<ScoredRecord>
    where
        I: IntoIterator<Item = LexicalRecord>,
    {
        let scored: Vec<ScoredRecord> = records
            .into_iter()
            .map(|r| self.resolve(r))
            .collect();

        let unscored = scored
            .iter()
            .filter(|r| r.score.is_none())
            .count();
        debug!(rows = scored.len(), unscored, "records resolved");
        scored
    }
}
