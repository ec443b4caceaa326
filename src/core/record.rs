//! Flat tabular records exchanged between stages.
//!
//! Field names are the contract; column order is cosmetic. Records keep every
//! input column so that outputs pass original fields through untouched.

use indexmap::IndexMap;

use crate::core::level::{LevelTuple, Magnitude, RawSignals, Similarity, magnitude_code};
use crate::core::table::Category;
use crate::infra::io::Row;

/// Column names shared by every stage
pub mod fields
{
    pub const ID: &str = "ID";
    pub const ENGLISH: &str = "English";
    pub const FRENCH: &str = "French";
    pub const MSA: &str = "MSA";
    pub const POS: &str = "POS";
    pub const REGION: &str = "Region";
    pub const CODA: &str = "CODA";

    pub const ASIM: &str = "ASim";
    pub const FSIM: &str = "FSim";
    pub const DFREQ: &str = "DFreq";
    pub const DCOM: &str = "DCom";
    pub const RCOM: &str = "RCom";

    pub const ASIM_LEVEL: &str = "ASimLevel";
    pub const FSIM_LEVEL: &str = "FSimLevel";
    pub const DFREQ_LEVEL: &str = "DFreqLevel";
    pub const DCOM_LEVEL: &str = "DComLevel";
    pub const RCOM_LEVEL: &str = "RComLevel";
    pub const SCORE: &str = "EasinessScore";
    pub const CATEGORY: &str = "EasinessCategory";
}

/// One dialectal-word observation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexicalRecord
{
    fields: Row,
}

impl LexicalRecord
{
    pub fn new(fields: Row) -> Self
    {
        Self { fields }
    }

    /// Build from `(column, value)` pairs, mostly for tests and fixtures
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Raw cell, empty when the column is absent
    pub fn get(
        &self,
        name: &str,
    ) -> &str
    {
        self.fields
            .get(name)
            .map_or("", String::as_str)
    }

    /// Trimmed cell
    pub fn field(
        &self,
        name: &str,
    ) -> &str
    {
        self.get(name)
            .trim()
    }

    pub fn fields(&self) -> &Row
    {
        &self.fields
    }

    pub fn concept_id(&self) -> &str
    {
        self.field(fields::ID)
    }

    pub fn pos(&self) -> &str
    {
        self.field(fields::POS)
    }

    /// Dialectal surface form (CODA)
    pub fn surface(&self) -> &str
    {
        self.field(fields::CODA)
    }

    pub fn msa(&self) -> &str
    {
        self.field(fields::MSA)
    }

    pub fn region(&self) -> &str
    {
        self.field(fields::REGION)
    }

    /// Raw signals of this record; `rcom` comes from the secondary lookup.
    pub fn signals<'a>(
        &'a self,
        rcom: Option<&'a str>,
    ) -> RawSignals<'a>
    {
        RawSignals {
            asim: self.get(fields::ASIM),
            fsim: self.get(fields::FSIM),
            dfreq: self.get(fields::DFREQ),
            dcom: self.get(fields::DCOM),
            rcom,
        }
    }
}

/// A record with its resolved levels, score and category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredRecord
{
    pub record: LexicalRecord,
    pub levels: LevelTuple,
    /// Raw root-commonality value as found in the lookup, empty if none
    pub rcom_raw: String,
    /// `None` means unscored, never zero
    pub score: Option<i64>,
    pub category: Option<String>,
}

impl ScoredRecord
{
    /// The tier, when the category label is exactly Easy/Medium/Hard
    pub fn tier(&self) -> Option<Category>
    {
        self.category
            .as_deref()
            .and_then(Category::from_label)
    }

    /// Rebuild from a row of a previously written easiness table
    pub fn from_scored_row(row: Row) -> Self
    {
        let record = LexicalRecord::new(row);
        let level = |name: &str| Magnitude::from_code(record.field(name));

        let levels = LevelTuple {
            asim: Similarity::from_code(record.field(fields::ASIM_LEVEL))
                .unwrap_or(Similarity::Different),
            fsim: Similarity::from_code(record.field(fields::FSIM_LEVEL))
                .unwrap_or(Similarity::Different),
            dfreq: level(fields::DFREQ_LEVEL),
            dcom: level(fields::DCOM_LEVEL),
            rcom: level(fields::RCOM_LEVEL),
        };
        let rcom_raw = record
            .field(fields::RCOM)
            .to_string();
        let score = parse_score(record.get(fields::SCORE));
        let category = Some(record.field(fields::CATEGORY))
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Self { record, levels, rcom_raw, score, category }
    }

    /// Input fields plus the appended level/score columns
    pub fn to_row(&self) -> Row
    {
        let mut row = self
            .record
            .fields()
            .clone();

        let appended = [
            (fields::RCOM, self.rcom_raw.clone()),
            (fields::ASIM_LEVEL, self.levels.asim.code().to_string()),
            (fields::FSIM_LEVEL, self.levels.fsim.code().to_string()),
            (fields::DFREQ_LEVEL, magnitude_code(self.levels.dfreq).to_string()),
            (fields::DCOM_LEVEL, magnitude_code(self.levels.dcom).to_string()),
            (fields::RCOM_LEVEL, magnitude_code(self.levels.rcom).to_string()),
            (fields::SCORE, self.score.map(|s| s.to_string()).unwrap_or_default()),
            (fields::CATEGORY, self.category.clone().unwrap_or_default()),
        ];
        for (name, value) in appended
        {
            row.insert(name.to_string(), value);
        }
        row
    }
}

/// Integer score, tolerating thousands separators; anything else is absent.
pub fn parse_score(raw: &str) -> Option<i64>
{
    raw.replace(',', "")
        .trim()
        .parse()
        .ok()
}

/// Output column order for the easiness table: input columns, `RCom` right
/// after `DCom`, then the level columns with `RComLevel` after `DComLevel`,
/// then score and category.
pub fn scored_headers(input: &[String]) -> Vec<String>
{
    let mut out: Vec<String> = Vec::with_capacity(input.len() + 8);
    let has = |out: &[String], name: &str| out.iter().any(|h| h == name);
    let has_rcom = input
        .iter()
        .any(|h| h == fields::RCOM);

    for col in input
    {
        if has(&out, col.as_str())
        {
            continue;
        }
        out.push(col.clone());
        if col == fields::DCOM && !has_rcom
        {
            out.push(fields::RCOM.to_string());
        }
        if col == fields::DCOM_LEVEL && !has(&out, fields::RCOM_LEVEL)
        {
            out.push(fields::RCOM_LEVEL.to_string());
        }
    }
    if !has(&out, fields::RCOM)
    {
        out.push(fields::RCOM.to_string());
    }

    for col in [
        fields::ASIM_LEVEL,
        fields::FSIM_LEVEL,
        fields::DFREQ_LEVEL,
        fields::DCOM_LEVEL,
        fields::RCOM_LEVEL,
        fields::SCORE,
        fields::CATEGORY,
    ]
    {
        if !has(&out, col)
        {
            out.push(col.to_string());
        }
    }
    out
}

/// All scored records of one concept, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptGroup
{
    pub concept_id: String,
    pub records: Vec<ScoredRecord>,
}

impl ConceptGroup
{
    /// Records whose category is exactly `tier`
    pub fn in_tier(
        &self,
        tier: Category,
    ) -> impl Iterator<Item = &ScoredRecord>
    {
        self.records
            .iter()
            .filter(move |r| r.tier() == Some(tier))
    }

    /// Complete when every tier has at least one record
    pub fn is_complete(&self) -> bool
    {
        Category::ALL
            .iter()
            .all(|&t| self.in_tier(t).next().is_some())
    }
}

/// Group by concept id in first-appearance order; empty ids are dropped.
pub fn group_by_concept<I>(records: I) -> Vec<ConceptGroup>
where
    I: IntoIterator<Item = ScoredRecord>,
{
    let mut groups: IndexMap<String, Vec<ScoredRecord>> = IndexMap::new();
    for rec in records
    {
        let id = rec
            .record
            .concept_id()
            .to_string();
        if id.is_empty()
        {
            continue;
        }
        groups
            .entry(id)
            .or_default()
            .push(rec);
    }

    groups
        .into_iter()
        .map(|(concept_id, records)| ConceptGroup { concept_id, records })
        .collect()
}
