//! Distractor selection.
//!
//! Candidates come from other concepts with the same part of speech. The rank
//! cascade orders them by raw edit distance to the anchors and breaks ties at
//! random; the typed-slot policy fills one slot per difficulty from dedicated
//! sub-pools. Both draw from a [`CandidateIndex`] and an explicit seeded RNG.

use std::collections::{BTreeMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use crate::core::record::{ScoredRecord, fields};
use crate::core::similarity::{min_distance, min_normalized_distance};
use crate::core::table::Category;
use crate::core::tiers::ConceptVocabulary;
use crate::infra::io::{HeadedTable, Row};

/// A word eligible as a distractor for other concepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate
{
    pub word: String,
    pub pos: String,
    pub concept_id: String,
    pub tier: Category,
}

/// Every candidate word, in input order. Duplicates across concepts are kept.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex
{
    candidates: Vec<Candidate>,
}

impl CandidateIndex
{
    /// Index scored records whose tier is one of `tiers`. Each candidate
    /// keeps its own record's POS.
    pub fn from_records(
        records: &[ScoredRecord],
        tiers: &[Category],
    ) -> Self
    {
        let candidates = records
            .iter()
            .filter_map(|rec| {
                let tier = rec
                    .tier()
                    .filter(|t| tiers.contains(t))?;
                let r = &rec.record;
                if r.concept_id().is_empty() || r.surface().is_empty()
                {
                    return None;
                }
                Some(Candidate {
                    word: r.surface().to_string(),
                    pos: r.pos().to_string(),
                    concept_id: r.concept_id().to_string(),
                    tier,
                })
            })
            .collect();
        Self { candidates }
    }

    /// Index every tier of every concept vocabulary under the concept's POS.
    pub fn from_vocabularies<'a, I>(vocabs: I) -> Self
    where
        I: IntoIterator<Item = &'a ConceptVocabulary>,
    {
        let mut candidates = Vec::new();
        for vocab in vocabs
        {
            for tier in Category::ALL
            {
                for word in vocab.words(tier)
                {
                    candidates.push(Candidate {
                        word: word.clone(),
                        pos: vocab.pos.clone(),
                        concept_id: vocab.concept_id.clone(),
                        tier,
                    });
                }
            }
        }
        Self { candidates }
    }

    pub fn len(&self) -> usize
    {
        self.candidates
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.candidates
            .is_empty()
    }

    /// Candidates of other concepts with part of speech `pos` that are not
    /// excluded, in index order
    pub fn pool<'a>(
        &'a self,
        pos: &'a str,
        exclude_concept: &'a str,
        exclusions: &'a Exclusions,
    ) -> impl Iterator<Item = &'a Candidate> + 'a
    {
        self.candidates
            .iter()
            .filter(move |c| {
                c.concept_id != exclude_concept
                    && c.pos.trim() == pos
                    && !exclusions.contains(&c.word)
            })
    }
}

/// Words barred from selection, matched trimmed and case-insensitively
#[derive(Debug, Clone, Default)]
pub struct Exclusions
{
    words: HashSet<String>,
}

impl Exclusions
{
    fn key(word: &str) -> String
    {
        word.trim()
            .to_lowercase()
    }

    pub fn insert(
        &mut self,
        word: &str,
    )
    {
        self.words
            .insert(Self::key(word));
    }

    pub fn contains(
        &self,
        word: &str,
    ) -> bool
    {
        self.words
            .contains(&Self::key(word))
    }
}

impl<S: AsRef<str>> Extend<S> for Exclusions
{
    fn extend<T: IntoIterator<Item = S>>(
        &mut self,
        iter: T,
    )
    {
        for word in iter
        {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Exclusions
{
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self
    {
        let mut out = Self::default();
        out.extend(iter);
        out
    }
}

/// Up to `k` distractors by ascending edit distance to the nearest anchor.
///
/// Candidates at one distance are deduplicated. When a rank holds at least
/// as many as are still needed, the needed number is drawn at random and
/// selection stops; otherwise the whole rank is taken and the next one is
/// tried. Anchors are excluded along with `exclusions`. Returns fewer than
/// `k` when the pool runs out, and nothing when the anchors or `pos` are
/// blank.
pub fn select_ranked<S, R>(
    index: &CandidateIndex,
    anchors: &[S],
    pos: &str,
    exclude_concept: &str,
    exclusions: &Exclusions,
    k: usize,
    rng: &mut R,
) -> Vec<String>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let anchors: Vec<&str> = anchors
        .iter()
        .map(|a| a.as_ref().trim())
        .filter(|a| !a.is_empty())
        .collect();
    let pos = pos.trim();
    if anchors.is_empty() || pos.is_empty() || k == 0
    {
        return Vec::new();
    }

    let mut barred = exclusions.clone();
    barred.extend(&anchors);

    let mut ranks: BTreeMap<usize, IndexSet<&str>> = BTreeMap::new();
    for cand in index.pool(pos, exclude_concept, &barred)
    {
        let word = cand
            .word
            .trim();
        if word.is_empty()
        {
            continue;
        }
        if let Some(dist) = min_distance(word, &anchors)
        {
            ranks
                .entry(dist)
                .or_default()
                .insert(word);
        }
    }

    let mut picks: Vec<String> = Vec::with_capacity(k);
    for (_, words) in ranks
    {
        let needed = k - picks.len();
        let mut words: Vec<&str> = words
            .into_iter()
            .collect();
        if words.len() >= needed
        {
            words.shuffle(rng);
            picks.extend(
                words
                    .into_iter()
                    .take(needed)
                    .map(str::to_string),
            );
            break;
        }
        picks.extend(
            words
                .into_iter()
                .map(str::to_string),
        );
    }
    picks
}

/// Fills the distractor columns for one targets row
pub trait DistractorPolicy
{
    fn name(&self) -> &'static str;

    /// Output header for a targets table with `target_headers`
    fn headers(
        &self,
        target_headers: &[String],
    ) -> Vec<String>;

    /// One output row matching [`DistractorPolicy::headers`]. `vocab` is
    /// `None` when the concept has no vocabulary.
    fn row(
        &self,
        target: &Row,
        target_headers: &[String],
        vocab: Option<&ConceptVocabulary>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<String>;
}

/// Exemplar word of `tier` in a targets row
fn target_word(
    target: &Row,
    tier: Category,
) -> String
{
    [format!("{tier}CODA"), format!("{tier}_target")]
        .iter()
        .find_map(|col| target.get(col))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn cell(
    target: &Row,
    name: &str,
) -> String
{
    target
        .get(name)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Per-tier rank cascade with cross-slot exclusivity
#[derive(Debug, Clone)]
pub struct RankCascade
{
    index: CandidateIndex,
    per_tier: usize,
    msa_separator: String,
}

impl RankCascade
{
    pub fn new(
        index: CandidateIndex,
        per_tier: usize,
        msa_separator: impl Into<String>,
    ) -> Self
    {
        Self { index, per_tier, msa_separator: msa_separator.into() }
    }

    /// `per_tier` picks for each tier, Easy then Medium then Hard
    pub fn select(
        &self,
        vocab: &ConceptVocabulary,
        msa: &str,
        rng: &mut ChaCha8Rng,
    ) -> [Vec<String>; 3]
    {
        let mut exclusions: Exclusions = vocab
            .all_words()
            .collect();

        let mut out: [Vec<String>; 3] = Default::default();
        for (slot, tier) in Category::ALL
            .into_iter()
            .enumerate()
        {
            let mut anchors: Vec<&str> = vocab
                .words(tier)
                .iter()
                .map(String::as_str)
                .collect();
            if tier == Category::Easy && !self.msa_separator.is_empty()
            {
                anchors.extend(
                    msa.split(self.msa_separator.as_str())
                        .map(str::trim)
                        .filter(|w| !w.is_empty()),
                );
            }

            let picks = select_ranked(
                &self.index,
                &anchors,
                &vocab.pos,
                &vocab.concept_id,
                &exclusions,
                self.per_tier,
                rng,
            );
            exclusions.extend(&picks);
            out[slot] = picks;
        }
        out
    }
}

impl DistractorPolicy for RankCascade
{
    fn name(&self) -> &'static str
    {
        "rank"
    }

    fn headers(
        &self,
        _target_headers: &[String],
    ) -> Vec<String>
    {
        let mut headers: Vec<String> = [fields::ID, fields::ENGLISH, fields::FRENCH, fields::MSA, fields::POS]
            .iter()
            .map(|s| s.to_string())
            .collect();
        headers.extend(Category::ALL.map(|t| format!("{t}_target")));
        for tier in Category::ALL
        {
            headers.extend((1..=self.per_tier).map(|i| format!("{tier}_distractor_{i}")));
        }
        headers
    }

    fn row(
        &self,
        target: &Row,
        _target_headers: &[String],
        vocab: Option<&ConceptVocabulary>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<String>
    {
        let mut row: Vec<String> = [fields::ID, fields::ENGLISH, fields::FRENCH, fields::MSA, fields::POS]
            .iter()
            .map(|name| cell(target, name))
            .collect();
        row.extend(Category::ALL.map(|t| target_word(target, t)));

        let bare;
        let vocab = match vocab
        {
            Some(vocab) => vocab,
            None =>
            {
                // No words of its own: only the MSA gloss anchors the Easy tier
                bare = ConceptVocabulary {
                    concept_id: cell(target, fields::ID),
                    pos: cell(target, fields::POS),
                    ..ConceptVocabulary::default()
                };
                &bare
            }
        };
        let picks = self.select(vocab, &cell(target, fields::MSA), rng);
        for tier_picks in picks
        {
            row.extend(
                (0..self.per_tier).map(|i| {
                    tier_picks
                        .get(i)
                        .cloned()
                        .unwrap_or_default()
                }),
            );
        }
        row
    }
}

/// Random word of `words` not yet used; marks it used.
fn pick_open(
    words: &[&str],
    used: &mut Exclusions,
    rng: &mut ChaCha8Rng,
) -> Option<String>
{
    let open: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| !used.contains(w))
        .collect();
    let word = open
        .choose(rng)
        .copied()?;
    used.insert(word);
    Some(word.to_string())
}

const TYPED_COLUMNS: [&str; 3] = ["Easy_distractor", "Medium_distractor", "Hard_distractor"];

/// One tagged distractor per difficulty slot
#[derive(Debug, Clone)]
pub struct TypedSlots
{
    index: CandidateIndex,
    top_n: usize,
    max_edits: usize,
}

impl TypedSlots
{
    pub fn new(
        index: CandidateIndex,
        top_n: usize,
        max_edits: usize,
    ) -> Self
    {
        Self { index, top_n, max_edits }
    }

    /// Three slots: `[rand]` from Easy/Medium words, `[hard]` from Hard
    /// words, `[edit]` from the closest candidates by normalized distance.
    /// Empty slots are back-filled at random and then padded with `""`.
    pub fn select(
        &self,
        vocab: &ConceptVocabulary,
        rng: &mut ChaCha8Rng,
    ) -> [String; 3]
    {
        let anchors: Vec<&str> = vocab
            .all_words()
            .collect();
        let barred: Exclusions = anchors
            .iter()
            .collect();
        let pool: Vec<&Candidate> = self
            .index
            .pool(vocab.pos.trim(), &vocab.concept_id, &barred)
            .collect();

        let easy_med: Vec<&str> = pool
            .iter()
            .filter(|c| matches!(c.tier, Category::Easy | Category::Medium))
            .map(|c| c.word.as_str())
            .collect();
        let hard: Vec<&str> = pool
            .iter()
            .filter(|c| c.tier == Category::Hard)
            .map(|c| c.word.as_str())
            .collect();
        let any: Vec<&str> = pool
            .iter()
            .map(|c| c.word.as_str())
            .collect();

        let mut used = Exclusions::default();
        let mut slots: [Option<String>; 3] = Default::default();

        slots[0] = pick_open(&easy_med, &mut used, rng).map(|w| format!("{w} [rand]"));
        slots[1] = pick_open(&hard, &mut used, rng).map(|w| format!("{w} [hard]"));

        let close = self.closest(&any, &anchors);
        slots[2] = pick_open(&close, &mut used, rng).map(|w| format!("{w} [edit]"));

        let mut backfill: Vec<&str> = easy_med
            .iter()
            .chain(&hard)
            .chain(&any)
            .copied()
            .collect();
        backfill.shuffle(rng);
        let mut backfill = backfill.into_iter();
        for slot in slots
            .iter_mut()
            .filter(|s| s.is_none())
        {
            if let Some(word) = backfill.find(|w| !used.contains(w))
            {
                used.insert(word);
                *slot = Some(format!("{word} [rand]"));
            }
        }

        slots.map(Option::unwrap_or_default)
    }

    /// Words within `max_edits` of an anchor relative to their own length,
    /// nearest first, at most `top_n`.
    fn closest<'a>(
        &self,
        words: &[&'a str],
        anchors: &[&str],
    ) -> Vec<&'a str>
    {
        let mut scored: Vec<(f64, &str)> = words
            .iter()
            .map(|w| (min_normalized_distance(w, anchors).unwrap_or(1.0), *w))
            .filter(|(d, w)| *d <= self.max_edits as f64 / w.chars().count().max(1) as f64)
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored
            .into_iter()
            .take(self.top_n)
            .map(|(_, w)| w)
            .collect()
    }
}

impl DistractorPolicy for TypedSlots
{
    fn name(&self) -> &'static str
    {
        "typed"
    }

    fn headers(
        &self,
        target_headers: &[String],
    ) -> Vec<String>
    {
        let mut headers = target_headers.to_vec();
        for col in TYPED_COLUMNS
        {
            if !headers.iter().any(|h| h == col)
            {
                headers.push(col.to_string());
            }
        }
        headers
    }

    fn row(
        &self,
        target: &Row,
        target_headers: &[String],
        vocab: Option<&ConceptVocabulary>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<String>
    {
        let mut out = target.clone();
        if let Some(vocab) = vocab
        {
            for (col, pick) in TYPED_COLUMNS
                .iter()
                .zip(self.select(vocab, rng))
            {
                out.insert(col.to_string(), pick);
            }
        }
        let headers = self.headers(target_headers);
        headers
            .iter()
            .map(|h| out.get(h).cloned().unwrap_or_default())
            .collect()
    }
}

/// Vocabularies keyed by concept id
pub fn vocabulary_map(vocabs: Vec<ConceptVocabulary>) -> IndexMap<String, ConceptVocabulary>
{
    vocabs
        .into_iter()
        .map(|v| (v.concept_id.clone(), v))
        .collect()
}

/// Apply `policy` to every row of `targets`, in order
#[instrument(skip_all, fields(policy = policy.name(), rows = targets.rows.len()))]
pub fn assign<P>(
    policy: &P,
    targets: &HeadedTable,
    vocabs: &IndexMap<String, ConceptVocabulary>,
    rng: &mut ChaCha8Rng,
) -> (Vec<String>, Vec<Vec<String>>)
where
    P: DistractorPolicy + ?Sized,
{
    let headers = policy.headers(&targets.headers);
    let mut missing = 0usize;
    let rows = targets
        .rows
        .iter()
        .map(|target| {
            let id = target
                .get(fields::ID)
                .map_or("", |s| s.trim());
            let vocab = vocabs.get(id);
            if vocab.is_none()
            {
                missing += 1;
            }
            policy.row(target, &targets.headers, vocab, rng)
        })
        .collect();
    debug!(missing, "distractors assigned");
    (headers, rows)
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;
    use rand::SeedableRng;

    use super::*;

    fn cand(
        word: &str,
        pos: &str,
        concept: &str,
        tier: Category,
    ) -> Candidate
    {
        Candidate { word: word.into(), pos: pos.into(), concept_id: concept.into(), tier }
    }

    fn index(cands: Vec<Candidate>) -> CandidateIndex
    {
        CandidateIndex { candidates: cands }
    }

    fn vocab(
        id: &str,
        pos: &str,
        easy: &[&str],
        medium: &[&str],
        hard: &[&str],
    ) -> ConceptVocabulary
    {
        let own = |ws: &[&str]| ws.iter().map(|w| w.to_string()).collect();
        ConceptVocabulary {
            concept_id: id.into(),
            pos: pos.into(),
            easy: own(easy),
            medium: own(medium),
            hard: own(hard),
            ..ConceptVocabulary::default()
        }
    }

    fn rng() -> ChaCha8Rng
    {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn closest_rank_fills_both_slots()
    {
        let idx = index(vec![
            cand("xyy", "NOUN", "2", Category::Medium),
            cand("abc", "NOUN", "3", Category::Hard),
            cand("xzz", "NOUN", "4", Category::Hard),
        ]);
        let mut picks = select_ranked(&idx, &["xyz"], "NOUN", "1", &Exclusions::default(), 2, &mut rng());
        picks.sort();
        assert_eq!(picks, vec!["xyy", "xzz"]);
    }

    #[test]
    fn short_rank_cascades_to_next()
    {
        let idx = index(vec![
            cand("xyy", "NOUN", "2", Category::Medium),
            cand("xyy", "NOUN", "5", Category::Medium),
            cand("abc", "NOUN", "3", Category::Hard),
            cand("xya", "VERB", "4", Category::Hard),
        ]);
        let picks = select_ranked(&idx, &["xyz"], "NOUN", "1", &Exclusions::default(), 2, &mut rng());
        assert_eq!(picks, vec!["xyy", "abc"]);
    }

    #[test]
    fn thin_pool_returns_fewer()
    {
        let idx = index(vec![cand("xyy", "NOUN", "2", Category::Medium)]);
        let picks = select_ranked(&idx, &["xyz"], "NOUN", "1", &Exclusions::default(), 3, &mut rng());
        assert_eq!(picks, vec!["xyy"]);
    }

    #[test]
    fn blank_anchors_or_pos_yield_nothing()
    {
        let idx = index(vec![cand("xyy", "NOUN", "2", Category::Medium)]);
        let none = Exclusions::default();
        assert!(select_ranked(&idx, &["  ", ""], "NOUN", "1", &none, 2, &mut rng()).is_empty());
        assert!(select_ranked(&idx, &["xyz"], " ", "1", &none, 2, &mut rng()).is_empty());
        assert!(select_ranked::<&str, _>(&idx, &[], "NOUN", "1", &none, 2, &mut rng()).is_empty());
    }

    #[test]
    fn exclusions_are_trimmed_and_case_insensitive()
    {
        let idx = index(vec![
            cand("Xyy", "NOUN", "2", Category::Medium),
            cand("xzz", "NOUN", "3", Category::Hard),
            cand("xyz", "NOUN", "1", Category::Hard),
        ]);
        let barred: Exclusions = [" xyy "].into_iter().collect();
        let picks = select_ranked(&idx, &["xyz"], "NOUN", "1", &barred, 2, &mut rng());
        assert_eq!(picks, vec!["xzz"]);
    }

    #[test]
    fn cascade_never_repeats_across_tiers()
    {
        let idx = index(vec![
            cand("bata", "NOUN", "2", Category::Medium),
            cand("bati", "NOUN", "3", Category::Hard),
            cand("batu", "NOUN", "4", Category::Hard),
            cand("beto", "NOUN", "5", Category::Medium),
            cand("beta", "NOUN", "6", Category::Hard),
            cand("kalb", "NOUN", "7", Category::Hard),
        ]);
        let policy = RankCascade::new(idx, 2, "،");
        let v = vocab("1", "NOUN", &["bat"], &["bet"], &["bit"]);

        let picks = policy.select(&v, "", &mut rng());
        let flat: Vec<&String> = picks.iter().flatten().collect();
        let unique: HashSet<&String> = flat.iter().copied().collect();
        assert_eq!(flat.len(), 6);
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn easy_anchors_include_msa_parts()
    {
        let idx = index(vec![
            cand("kitab", "NOUN", "2", Category::Medium),
            cand("zzzzzzz", "NOUN", "3", Category::Hard),
        ]);
        let policy = RankCascade::new(idx, 1, "،");
        let v = vocab("1", "NOUN", &["qqqqqq"], &[], &[]);

        let picks = policy.select(&v, "kitaab، daftar", &mut rng());
        assert_eq!(picks[0], vec!["kitab"]);
        assert!(picks[1].is_empty());
    }

    #[test]
    fn rank_row_layout()
    {
        let idx = index(vec![cand("xyy", "NOUN", "2", Category::Medium)]);
        let policy = RankCascade::new(idx, 2, "،");
        let target: Row = [("ID", "1"), ("POS", "NOUN"), ("EasyCODA", "xyz")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let v = vocab("1", "NOUN", &["xyz"], &[], &[]);

        let headers = policy.headers(&[]);
        let row = policy.row(&target, &[], Some(&v), &mut rng());
        assert_eq!(headers.len(), row.len());
        assert_eq!(headers[8], "Easy_distractor_1");
        assert_eq!(row[5], "xyz");
        assert_eq!(row[8], "xyy");
        assert_eq!(row[9], "");

        let row = policy.row(&target, &[], None, &mut rng());
        assert!(row[8..].iter().all(String::is_empty));
    }

    #[test]
    fn rank_row_without_vocabulary_anchors_on_msa()
    {
        let idx = index(vec![
            cand("kitab", "NOUN", "2", Category::Medium),
            cand("kitaab", "NOUN", "1", Category::Medium),
            cand("zzzzzzz", "NOUN", "3", Category::Hard),
        ]);
        let policy = RankCascade::new(idx, 1, "،");
        let target: Row = [("ID", "1"), ("POS", "NOUN"), ("MSA", "kitaab، daftar")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let row = policy.row(&target, &[], None, &mut rng());
        let headers = policy.headers(&[]);
        assert_eq!(headers.len(), row.len());
        assert_eq!(row[8], "kitab");
        assert_eq!(row[9], "");
        assert_eq!(row[10], "");
    }

    #[test]
    fn typed_slots_are_tagged_and_distinct()
    {
        let vocabs = vec![
            vocab("1", "NOUN", &["kalb"], &["kelb"], &[]),
            vocab("2", "NOUN", &["bet"], &["dar"], &["manzil"]),
            vocab("3", "NOUN", &["kalbi"], &[], &["kilab"]),
            vocab("4", "VERB", &["kalba"], &[], &[]),
        ];
        let policy = TypedSlots::new(CandidateIndex::from_vocabularies(&vocabs), 6, 2);

        let picks = policy.select(&vocabs[0], &mut rng());
        assert!(picks[0].ends_with(" [rand]"));
        assert!(picks[1].ends_with(" [hard]"));
        assert!(picks[2].ends_with(" [edit]") || picks[2].ends_with(" [rand]"));

        let words: HashSet<&str> = picks
            .iter()
            .map(|p| p.split(" [").next().unwrap())
            .collect();
        assert_eq!(words.len(), 3);
        assert!(!words.contains("kalba"));
        assert!(!words.contains("kalb"));
    }

    #[test]
    fn typed_slots_pad_when_pool_is_empty()
    {
        let vocabs = vec![vocab("1", "NOUN", &["kalb"], &[], &[]), vocab("2", "VERB", &["kla"], &[], &[])];
        let policy = TypedSlots::new(CandidateIndex::from_vocabularies(&vocabs), 6, 2);
        assert_eq!(policy.select(&vocabs[0], &mut rng()), [String::new(), String::new(), String::new()]);
    }

    #[test]
    fn typed_headers_append_once()
    {
        let policy = TypedSlots::new(CandidateIndex::default(), 6, 2);
        let headers = policy.headers(&["ID".to_string(), "Hard_distractor".to_string()]);
        assert_eq!(headers, vec!["ID", "Hard_distractor", "Easy_distractor", "Medium_distractor"]);
    }

    fn word() -> impl Strategy<Value = String>
    {
        "[a-d]{1,4}"
    }

    proptest! {
        #[test]
        fn ranked_selection_is_reproducible(
            pool in prop::collection::vec(word(), 0..24),
            anchors in prop::collection::vec(word(), 1..3),
            seed in any::<u64>(),
            k in 1usize..4,
        ) {
            let idx = index(
                pool.iter()
                    .enumerate()
                    .map(|(i, w)| cand(w, "N", &(i % 5 + 2).to_string(), Category::Hard))
                    .collect(),
            );
            let none = Exclusions::default();
            let a = select_ranked(&idx, &anchors, "N", "1", &none, k, &mut ChaCha8Rng::seed_from_u64(seed));
            let b = select_ranked(&idx, &anchors, "N", "1", &none, k, &mut ChaCha8Rng::seed_from_u64(seed));
            prop_assert_eq!(&a, &b);
            prop_assert!(a.len() <= k);
        }

        #[test]
        fn cascade_picks_are_unique_and_foreign(
            own in prop::collection::vec(word(), 3),
            pool in prop::collection::vec(word(), 0..30),
            seed in any::<u64>(),
        ) {
            let idx = index(
                pool.iter()
                    .enumerate()
                    .map(|(i, w)| cand(w, "N", &(i % 4 + 2).to_string(), Category::Medium))
                    .collect(),
            );
            let v = vocab("1", "N", &[own[0].as_str()], &[own[1].as_str()], &[own[2].as_str()]);
            let policy = RankCascade::new(idx, 2, "،");
            let picks = policy.select(&v, "", &mut ChaCha8Rng::seed_from_u64(seed));

            let flat: Vec<String> = picks.iter().flatten().map(|w| w.to_lowercase()).collect();
            let unique: HashSet<&String> = flat.iter().collect();
            prop_assert_eq!(unique.len(), flat.len());
            for w in &flat {
                prop_assert!(!own.contains(w));
            }
        }
    }
}
