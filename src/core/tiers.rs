//! Per-concept tier selection.
//!
//! Picks the best exemplar of each tier, lists records in long form, and
//! gathers each concept's vocabulary by tier.

use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::core::level::{Magnitude, magnitude_code};
use crate::core::record::{ConceptGroup, ScoredRecord, fields};
use crate::core::table::Category;

/// Composite ordering key: score, then DCom level, then DFreq level.
/// Missing scores and unknown levels order below every real value.
pub type RankKey = (Option<i64>, Option<Magnitude>, Option<Magnitude>);

pub fn rank_key(rec: &ScoredRecord) -> RankKey
{
    (rec.score, rec.levels.dcom, rec.levels.dfreq)
}

/// Maximum under [`rank_key`]; on full ties the first record seen wins.
pub fn pick_best<'a, I>(records: I) -> Option<&'a ScoredRecord>
where
    I: IntoIterator<Item = &'a ScoredRecord>,
{
    records
        .into_iter()
        .fold(None, |best, rec| match best
        {
            Some(b) if rank_key(rec) <= rank_key(b) => Some(b),
            _ => Some(rec),
        })
}

/// The three exemplars of a complete concept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSelection<'a>
{
    pub concept_id: &'a str,
    pub easy: &'a ScoredRecord,
    pub medium: &'a ScoredRecord,
    pub hard: &'a ScoredRecord,
}

impl<'a> TierSelection<'a>
{
    pub fn get(
        &self,
        tier: Category,
    ) -> &'a ScoredRecord
    {
        match tier
        {
            Category::Easy => self.easy,
            Category::Medium => self.medium,
            Category::Hard => self.hard,
        }
    }

    /// Row matching [`target_headers`]; concept metadata comes from the Easy pick.
    pub fn to_row(&self) -> Vec<String>
    {
        let meta = &self.easy.record;
        let mut row = vec![
            self.concept_id.to_string(),
            meta.field(fields::ENGLISH).to_string(),
            meta.field(fields::FRENCH).to_string(),
            meta.field(fields::MSA).to_string(),
            meta.field(fields::POS).to_string(),
        ];
        for tier in Category::ALL
        {
            let rec = self.get(tier);
            row.push(rec.record.surface().to_string());
            row.push(rec.record.region().to_string());
            row.push(rec.score.map(|s| s.to_string()).unwrap_or_default());
        }
        row
    }
}

pub fn target_headers() -> Vec<String>
{
    let mut headers: Vec<String> = [fields::ID, fields::ENGLISH, fields::FRENCH, fields::MSA, fields::POS]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for tier in Category::ALL
    {
        headers.push(format!("{tier}CODA"));
        headers.push(format!("{tier}Region"));
        headers.push(format!("{tier}EasinessScore"));
    }
    headers
}

/// Best record per tier, or `None` if any tier is empty.
pub fn select_best(group: &ConceptGroup) -> Option<TierSelection<'_>>
{
    Some(TierSelection {
        concept_id: &group.concept_id,
        easy: pick_best(group.in_tier(Category::Easy))?,
        medium: pick_best(group.in_tier(Category::Medium))?,
        hard: pick_best(group.in_tier(Category::Hard))?,
    })
}

/// Selections for every complete concept, sorted by concept id.
pub fn select_all(groups: &[ConceptGroup]) -> Vec<TierSelection<'_>>
{
    let mut out: Vec<TierSelection<'_>> = groups
        .iter()
        .filter_map(select_best)
        .collect();
    out.sort_by(|a, b| compare_concept_ids(a.concept_id, b.concept_id));
    out
}

/// Numeric ids compare numerically and sort before non-numeric ids, which
/// compare lexicographically.
pub fn compare_concept_ids(
    a: &str,
    b: &str,
) -> Ordering
{
    match (a.parse::<i64>(), b.parse::<i64>())
    {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

pub fn long_form_headers() -> Vec<String>
{
    [
        fields::ID,
        fields::ENGLISH,
        fields::FRENCH,
        fields::MSA,
        fields::POS,
        "Category",
        fields::CODA,
        fields::REGION,
        fields::ASIM_LEVEL,
        fields::FSIM_LEVEL,
        fields::DFREQ_LEVEL,
        fields::DCOM_LEVEL,
        fields::SCORE,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn long_form_row(rec: &ScoredRecord) -> Vec<String>
{
    let r = &rec.record;
    vec![
        r.concept_id().to_string(),
        r.field(fields::ENGLISH).to_string(),
        r.field(fields::FRENCH).to_string(),
        r.field(fields::MSA).to_string(),
        r.field(fields::POS).to_string(),
        rec.tier()
            .map(|t| t.label().to_string())
            .unwrap_or_default(),
        r.surface().to_string(),
        r.region().to_string(),
        rec.levels.asim.code().to_string(),
        rec.levels.fsim.code().to_string(),
        magnitude_code(rec.levels.dfreq).to_string(),
        magnitude_code(rec.levels.dcom).to_string(),
        rec.score.map(|s| s.to_string()).unwrap_or_default(),
    ]
}

/// Long-form listing in input order
#[derive(Debug, Clone, Default)]
pub struct LongForm<'a>
{
    /// Every record with a tier
    pub all: Vec<&'a ScoredRecord>,
    /// The subset whose concept is complete
    pub triplets: Vec<&'a ScoredRecord>,
}

pub fn long_form(records: &[ScoredRecord]) -> LongForm<'_>
{
    let all: Vec<&ScoredRecord> = records
        .iter()
        .filter(|r| r.tier().is_some())
        .collect();

    let mut tiers_by_id: IndexMap<&str, HashSet<Category>> = IndexMap::new();
    for rec in &all
    {
        if let Some(tier) = rec.tier()
        {
            tiers_by_id
                .entry(rec.record.concept_id())
                .or_default()
                .insert(tier);
        }
    }
    let complete: HashSet<&str> = tiers_by_id
        .into_iter()
        .filter(|(_, tiers)| tiers.len() == Category::ALL.len())
        .map(|(id, _)| id)
        .collect();

    let triplets = all
        .iter()
        .copied()
        .filter(|r| complete.contains(r.record.concept_id()))
        .collect();

    LongForm { all, triplets }
}

/// A concept's surface forms by tier, with its shared metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConceptVocabulary
{
    pub concept_id: String,
    pub english: String,
    pub french: String,
    pub msa: String,
    pub pos: String,
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

impl ConceptVocabulary
{
    pub fn from_group(group: &ConceptGroup) -> Self
    {
        let words = |tier: Category| -> Vec<String> {
            group
                .in_tier(tier)
                .map(|r| r.record.surface())
                .filter(|w| !w.is_empty())
                .collect::<IndexSet<&str>>()
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        let mut vocab = Self {
            concept_id: group.concept_id.clone(),
            easy: words(Category::Easy),
            medium: words(Category::Medium),
            hard: words(Category::Hard),
            ..Self::default()
        };
        if let Some(first) = group.records.first()
        {
            let r = &first.record;
            vocab.english = r.field(fields::ENGLISH).to_string();
            vocab.french = r.field(fields::FRENCH).to_string();
            vocab.msa = r.msa().to_string();
            vocab.pos = r.pos().to_string();
        }
        vocab
    }

    pub fn words(
        &self,
        tier: Category,
    ) -> &[String]
    {
        match tier
        {
            Category::Easy => &self.easy,
            Category::Medium => &self.medium,
            Category::Hard => &self.hard,
        }
    }

    /// Every surface form of the concept, Easy then Medium then Hard
    pub fn all_words(&self) -> impl Iterator<Item = &str>
    {
        self.easy
            .iter()
            .chain(&self.medium)
            .chain(&self.hard)
            .map(String::as_str)
    }

    pub fn to_row(&self) -> Vec<String>
    {
        vec![
            self.concept_id.clone(),
            self.english.clone(),
            self.french.clone(),
            self.msa.clone(),
            self.pos.clone(),
            self.easy.iter().join("|"),
            self.medium.iter().join("|"),
            self.hard.iter().join("|"),
        ]
    }
}

pub fn grouped_headers() -> Vec<String>
{
    [fields::ID, fields::ENGLISH, fields::FRENCH, fields::MSA, fields::POS, "Easy", "Medium", "Hard"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn vocabularies(groups: &[ConceptGroup]) -> Vec<ConceptVocabulary>
{
    groups
        .iter()
        .map(ConceptVocabulary::from_group)
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::record::group_by_concept;

    fn rec(
        id: &str,
        coda: &str,
        score: &str,
        cat: &str,
        dcom: &str,
        dfreq: &str,
    ) -> ScoredRecord
    {
        ScoredRecord::from_scored_row(
            [
                ("ID", id),
                ("English", "house"),
                ("POS", "NOUN"),
                ("CODA", coda),
                ("Region", "Iraq"),
                ("EasinessScore", score),
                ("EasinessCategory", cat),
                ("DComLevel", dcom),
                ("DFreqLevel", dfreq),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        )
    }

    #[test]
    fn complete_concept_yields_each_tier()
    {
        let groups = group_by_concept(vec![
            rec("1", "bet", "10", "Easy", "H", "H"),
            rec("1", "dar", "7", "Medium", "M", "M"),
            rec("1", "manzil", "3", "Hard", "L", "L"),
        ]);
        let picks = select_all(&groups);

        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].easy.record.surface(), "bet");
        assert_eq!(picks[0].medium.record.surface(), "dar");
        assert_eq!(picks[0].hard.record.surface(), "manzil");
        assert_eq!(
            picks[0].to_row(),
            vec!["1", "house", "", "", "NOUN", "bet", "Iraq", "10", "dar", "Iraq", "7", "manzil", "Iraq", "3"]
        );
    }

    #[test]
    fn incomplete_concept_is_dropped()
    {
        let groups = group_by_concept(vec![
            rec("1", "bet", "10", "Easy", "H", "H"),
            rec("1", "dar", "7", "Medium", "M", "M"),
            rec("2", "a", "10", "Easy", "H", "H"),
            rec("2", "b", "7", "Medium", "M", "M"),
            rec("2", "c", "2", "Hard", "M", "M"),
        ]);
        let picks = select_all(&groups);

        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].concept_id, "2");
    }

    #[test]
    fn score_then_dcom_then_dfreq()
    {
        let a = rec("1", "a", "5", "Medium", "L", "H");
        let b = rec("1", "b", "5", "Medium", "H", "L");
        let c = rec("1", "c", "5", "Medium", "H", "M");
        let d = rec("1", "d", "", "Medium", "H", "H");
        let e = rec("1", "e", "6", "Medium", "", "");

        assert_eq!(pick_best([&a, &b]).unwrap().record.surface(), "b");
        assert_eq!(pick_best([&a, &b, &c]).unwrap().record.surface(), "c");
        assert_eq!(pick_best([&d, &a]).unwrap().record.surface(), "a");
        assert_eq!(pick_best([&a, &b, &c, &d, &e]).unwrap().record.surface(), "e");
    }

    #[test]
    fn full_tie_keeps_first_seen()
    {
        let a = rec("1", "first", "5", "Hard", "M", "M");
        let b = rec("1", "second", "5", "Hard", "M", "M");
        assert_eq!(pick_best([&a, &b]).unwrap().record.surface(), "first");
        assert_eq!(pick_best([&b, &a]).unwrap().record.surface(), "second");
        assert!(pick_best(std::iter::empty()).is_none());
    }

    #[test]
    fn ids_sort_numerically_first()
    {
        let mut ids = vec!["10", "x", "2", "b", "1"];
        ids.sort_by(|a, b| compare_concept_ids(a, b));
        assert_eq!(ids, vec!["1", "2", "10", "b", "x"]);
    }

    #[test]
    fn long_form_keeps_input_order_and_filters_triplets()
    {
        let records = vec![
            rec("2", "x", "9", "Easy", "", ""),
            rec("1", "a", "9", "Easy", "", ""),
            rec("1", "b", "6", "Medium", "", ""),
            rec("1", "zz", "", "", "", ""),
            rec("1", "c", "2", "Hard", "", ""),
        ];
        let lf = long_form(&records);

        let all: Vec<&str> = lf.all.iter().map(|r| r.record.surface()).collect();
        let trip: Vec<&str> = lf.triplets.iter().map(|r| r.record.surface()).collect();
        assert_eq!(all, vec!["x", "a", "b", "c"]);
        assert_eq!(trip, vec!["a", "b", "c"]);
        assert_eq!(long_form_row(lf.all[0])[5], "Easy");
    }

    #[test]
    fn vocabulary_dedupes_within_tier()
    {
        let groups = group_by_concept(vec![
            rec("4", "w1", "9", "Easy", "", ""),
            rec("4", "w1", "9", "Easy", "", ""),
            rec("4", "w2", "6", "Medium", "", ""),
            rec("4", "", "6", "Medium", "", ""),
        ]);
        let vocab = ConceptVocabulary::from_group(&groups[0]);

        assert_eq!(vocab.easy, vec!["w1"]);
        assert_eq!(vocab.medium, vec!["w2"]);
        assert!(vocab.hard.is_empty());
        assert_eq!(vocab.all_words().collect::<Vec<_>>(), vec!["w1", "w2"]);
        assert_eq!(vocab.to_row()[5..], ["w1", "w2", ""]);
    }
}
