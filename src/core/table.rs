//! Scoring table: fully-specified level key → (score, category).
//!
//! Built once from a positional source table (no header semantics beyond the
//! configured offsets) and read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::level::{LevelKey, LevelTuple};
use crate::error::{Error, Result};
use crate::infra::io::read_raw_rows;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category
{
    Easy,
    Medium,
    Hard,
}

impl Category
{
    pub const ALL: [Category; 3] = [Category::Easy, Category::Medium, Category::Hard];

    /// Exact label match; anything else is not a tier
    pub fn from_label(label: &str) -> Option<Self>
    {
        match label
        {
            "Easy" => Some(Category::Easy),
            "Medium" => Some(Category::Medium),
            "Hard" => Some(Category::Hard),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str
    {
        match self
        {
            Category::Easy => "Easy",
            Category::Medium => "Medium",
            Category::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Category
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result
    {
        f.write_str(self.label())
    }
}

/// Score cutoffs used when a table row has no explicit category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryThresholds
{
    pub easy_min: i64,
    pub medium_min: i64,
}

impl CategoryThresholds
{
    pub fn infer(
        &self,
        score: i64,
    ) -> Category
    {
        if score >= self.easy_min
        {
            Category::Easy
        }
        else if score >= self.medium_min
        {
            Category::Medium
        }
        else
        {
            Category::Hard
        }
    }
}

impl Default for CategoryThresholds
{
    fn default() -> Self
    {
        Self { easy_min: 8, medium_min: 5 }
    }
}

/// Column positions (0-based) of the scoring table source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableColumns
{
    pub asim: usize,
    pub fsim: usize,
    pub dfreq: usize,
    pub dcom: usize,
    pub rcom: usize,
    pub score: usize,
    pub category: usize,
}

impl TableColumns
{
    /// Minimum row width that holds every configured column
    pub fn width(&self) -> usize
    {
        [self.asim, self.fsim, self.dfreq, self.dcom, self.rcom, self.score, self.category]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl Default for TableColumns
{
    fn default() -> Self
    {
        Self { asim: 0, fsim: 1, dfreq: 2, dcom: 3, rcom: 4, score: 5, category: 6 }
    }
}

/// Where the header and the data live inside the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout
{
    /// 0-based index of the header row
    pub header_row: usize,
    /// 0-based index of the first data row
    pub data_start_row: usize,
    pub columns: TableColumns,
}

impl Default for TableLayout
{
    fn default() -> Self
    {
        Self { header_row: 12, data_start_row: 13, columns: TableColumns::default() }
    }
}

/// A stored table value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry
{
    pub score: i64,
    /// Explicit label kept verbatim, or the inferred tier label
    pub category: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringTable
{
    entries: HashMap<LevelKey, TableEntry>,
}

impl ScoringTable
{
    /// Read the source file and build the table.
    ///
    /// # Errors
    /// Fails when the file is missing or shorter than `data_start_row` rows.
    #[instrument(skip(layout, thresholds), fields(path = %path.display()))]
    pub fn load(
        path: &Path,
        layout: &TableLayout,
        thresholds: &CategoryThresholds,
    ) -> Result<Self>
    {
        let rows = read_raw_rows(path)?;
        if rows.len() < layout.data_start_row
        {
            return Err(Error::TooShort {
                path: path.to_path_buf(),
                rows: rows.len(),
                needed: layout.data_start_row,
            });
        }

        if let Some(header) = rows.get(layout.header_row)
        {
            debug!(header = ?header, "scoring table header");
        }

        Ok(Self::from_rows(&rows, layout, thresholds))
    }

    /// Build from already-read rows. Invalid rows are skipped silently.
    pub fn from_rows(
        rows: &[Vec<String>],
        layout: &TableLayout,
        thresholds: &CategoryThresholds,
    ) -> Self
    {
        let cols = &layout.columns;
        let width = cols.width();
        let mut table = Self::default();
        let mut skipped = 0usize;

        for row in rows
            .iter()
            .skip(layout.data_start_row)
        {
            if row.len() < width
            {
                skipped += 1;
                continue;
            }

            let key = LevelKey::from_codes(
                cell(row, cols.asim),
                cell(row, cols.fsim),
                cell(row, cols.dfreq),
                cell(row, cols.dcom),
                cell(row, cols.rcom),
            );
            let Some(key) = key
            else
            {
                skipped += 1;
                continue;
            };
            let Ok(score) = cell(row, cols.score).parse::<i64>()
            else
            {
                skipped += 1;
                continue;
            };

            let category = match cell(row, cols.category)
            {
                "" => thresholds
                    .infer(score)
                    .label()
                    .to_string(),
                explicit => explicit.to_string(),
            };

            table.insert(key, TableEntry { score, category });
        }

        debug!(entries = table.len(), skipped, "scoring table built");
        table
    }

    /// Insert or overwrite; later keys win.
    pub fn insert(
        &mut self,
        key: LevelKey,
        entry: TableEntry,
    )
    {
        self.entries
            .insert(key, entry);
    }

    pub fn get(
        &self,
        key: &LevelKey,
    ) -> Option<&TableEntry>
    {
        self.entries
            .get(key)
    }

    /// Exact lookup for a record's tuple; unknown levels never match.
    pub fn lookup(
        &self,
        tuple: &LevelTuple,
    ) -> Option<&TableEntry>
    {
        tuple
            .key()
            .and_then(|k| self.get(&k))
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

fn cell(
    row: &[String],
    i: usize,
) -> &str
{
    row.get(i)
        .map_or("", |s| s.trim())
}

#[cfg(test)]
mod tests
{
    use assert_fs::prelude::*;
    use proptest::prelude::*;

    use super::*;

    fn row(cells: &[&str]) -> Vec<String>
    {
        cells
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    fn layout() -> TableLayout
    {
        TableLayout { header_row: 0, data_start_row: 1, columns: TableColumns::default() }
    }

    fn key(codes: [&str; 5]) -> LevelKey
    {
        LevelKey::from_codes(codes[0], codes[1], codes[2], codes[3], codes[4]).unwrap()
    }

    #[test]
    fn infers_category_when_absent()
    {
        let rows = vec![
            row(&["ASim", "FSim", "DFreq", "DCom", "RCom", "Score", "Category"]),
            row(&["S", "S", "L", "L", "L", "9", ""]),
        ];
        let thresholds = CategoryThresholds { easy_min: 8, medium_min: 5 };
        let table = ScoringTable::from_rows(&rows, &layout(), &thresholds);

        let entry = table
            .get(&key(["S", "S", "L", "L", "L"]))
            .unwrap();
        assert_eq!(entry.score, 9);
        assert_eq!(entry.category, "Easy");
    }

    #[test]
    fn explicit_category_is_kept_verbatim()
    {
        let rows = vec![
            row(&["header"]),
            row(&["S", "D", "H", "M", "L", "2", "Medium"]),
            row(&["D", "D", "L", "L", "L", "9", "hard-ish"]),
        ];
        let table = ScoringTable::from_rows(&rows, &layout(), &CategoryThresholds::default());

        assert_eq!(table.get(&key(["S", "D", "H", "M", "L"])).unwrap().category, "Medium");
        assert_eq!(table.get(&key(["D", "D", "L", "L", "L"])).unwrap().category, "hard-ish");
    }

    #[test]
    fn invalid_rows_are_skipped()
    {
        let rows = vec![
            row(&["header"]),
            row(&["S", "S", "L", "L"]),                   // too narrow
            row(&["X", "S", "L", "L", "L", "3", ""]),     // bad binary level
            row(&["S", "S", "L", "Q", "L", "3", ""]),     // bad magnitude level
            row(&["S", "S", "L", "L", "", "3", ""]),      // empty level
            row(&["S", "S", "L", "L", "L", "three", ""]), // bad score
            row(&["", "", "", "", "", "", ""]),
            row(&["D", "S", "M", "M", "M", " 4 ", ""]),
        ];
        let table = ScoringTable::from_rows(&rows, &layout(), &CategoryThresholds::default());

        assert_eq!(table.len(), 1);
        let entry = table
            .get(&key(["D", "S", "M", "M", "M"]))
            .unwrap();
        assert_eq!(entry.score, 4);
        assert_eq!(entry.category, "Hard");
    }

    #[test]
    fn duplicate_keys_last_write_wins()
    {
        let rows = vec![
            row(&["header"]),
            row(&["S", "S", "H", "H", "H", "10", "Easy"]),
            row(&["S", "S", "H", "H", "H", "6", ""]),
        ];
        let table = ScoringTable::from_rows(&rows, &layout(), &CategoryThresholds::default());

        assert_eq!(table.len(), 1);
        let entry = table
            .get(&key(["S", "S", "H", "H", "H"]))
            .unwrap();
        assert_eq!(entry.score, 6);
        assert_eq!(entry.category, "Medium");
    }

    #[test]
    fn rows_before_data_start_are_ignored()
    {
        let rows = vec![
            row(&["S", "S", "L", "L", "L", "1", ""]),
            row(&["S", "S", "M", "L", "L", "2", ""]),
            row(&["S", "S", "H", "L", "L", "3", ""]),
        ];
        let layout = TableLayout { header_row: 1, data_start_row: 2, columns: TableColumns::default() };
        let table = ScoringTable::from_rows(&rows, &layout, &CategoryThresholds::default());

        assert_eq!(table.len(), 1);
        assert!(table.get(&key(["S", "S", "H", "L", "L"])).is_some());
    }

    #[test]
    fn inference_boundaries()
    {
        let t = CategoryThresholds { easy_min: 8, medium_min: 5 };
        assert_eq!(t.infer(8), Category::Easy);
        assert_eq!(t.infer(7), Category::Medium);
        assert_eq!(t.infer(5), Category::Medium);
        assert_eq!(t.infer(4), Category::Hard);
        assert_eq!(t.infer(-3), Category::Hard);
    }

    #[test]
    fn category_labels_are_exact()
    {
        assert_eq!(Category::from_label("Easy"), Some(Category::Easy));
        assert_eq!(Category::from_label("easy"), None);
        assert_eq!(Category::from_label(""), None);
        assert_eq!(Category::Hard.to_string(), "Hard");
    }

    #[test]
    fn blank_preamble_lines_count_toward_offsets()
    {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("scoring_table.csv");
        file.write_str(
            "Scoring sheet\n\nASim,FSim,DFreq,DCom,RCom,Score,Category\nS,S,L,L,L,9,\nD,D,H,H,H,2,\n",
        )
        .unwrap();
        let layout = TableLayout { header_row: 2, data_start_row: 3, columns: TableColumns::default() };

        let table = ScoringTable::load(file.path(), &layout, &CategoryThresholds::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&key(["S", "S", "L", "L", "L"])).unwrap().score, 9);
        assert_eq!(table.get(&key(["D", "D", "H", "H", "H"])).unwrap().category, "Hard");
    }

    #[test]
    fn blank_lines_count_toward_length()
    {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("scoring_table.csv");
        file.write_str("title\n\n\nS,S,L,L,L,9,\n").unwrap();
        let layout = TableLayout { header_row: 2, data_start_row: 3, columns: TableColumns::default() };

        let table = ScoringTable::load(file.path(), &layout, &CategoryThresholds::default()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn source_shorter_than_data_start_is_fatal()
    {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("scoring_table.csv");
        file.write_str("title\nASim,FSim\n").unwrap();

        let err = ScoringTable::load(file.path(), &TableLayout::default(), &CategoryThresholds::default())
            .unwrap_err();
        match err
        {
            Error::TooShort { rows, needed, .. } =>
            {
                assert_eq!(rows, 2);
                assert_eq!(needed, 13);
            }
            other => panic!("expected TooShort, got {other:?}"),
        }
    }

    #[test]
    fn missing_source_is_fatal()
    {
        let tmp = assert_fs::TempDir::new().unwrap();
        let path = tmp.path().join("absent.csv");
        assert!(matches!(
            ScoringTable::load(&path, &TableLayout::default(), &CategoryThresholds::default()),
            Err(Error::MissingInput { .. })
        ));
    }

    fn any_key() -> impl Strategy<Value = LevelKey>
    {
        let sim = prop::sample::select(vec!["S", "D"]);
        let mag = || prop::sample::select(vec!["L", "M", "H"]);
        (sim.clone(), sim, mag(), mag(), mag())
            .prop_map(|(a, f, q, c, r)| LevelKey::from_codes(a, f, q, c, r).unwrap())
    }

    proptest! {
        #[test]
        fn inference_is_monotonic(a in -50i64..50, b in -50i64..50, easy in 0i64..20, gap in 0i64..10) {
            let t = CategoryThresholds { easy_min: easy, medium_min: easy - gap };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            // Easy < Medium < Hard, so a higher score never infers a harder tier
            prop_assert!(t.infer(hi) <= t.infer(lo));
        }

        #[test]
        fn lookup_returns_exactly_what_was_stored(
            stored in prop::collection::btree_map(any_key(), -20i64..20, 0..12),
            queried in any_key(),
        ) {
            let mut table = ScoringTable::default();
            for (k, score) in &stored {
                table.insert(*k, TableEntry { score: *score, category: "Easy".into() });
            }
            let expected: Option<i64> = stored.get(&queried).copied();
            prop_assert_eq!(table.get(&queried).map(|e| e.score), expected);
            prop_assert_eq!(table.len(), stored.len());
        }
    }
}
