//! Level mapping: raw feature signals → discrete ordinal levels.
//!
//! Every mapper here is total. Input that cannot be read as a level yields the
//! "unknown" sentinel (`None` for magnitudes, `Different` for similarity
//! flags) instead of an error, and a [`LevelTuple`] carrying an unknown
//! component has no [`LevelKey`], so it can never match a scoring-table entry.

use serde::{Deserialize, Serialize};

/// Binary similarity level (ASim, FSim)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Similarity
{
    Same,
    Different,
}

impl Similarity
{
    /// Map a raw similarity flag. `1` (or an already-mapped `S`) is `Same`,
    /// everything else, including malformed text, is `Different`.
    pub fn from_raw(raw: &str) -> Self
    {
        let raw = raw.trim();
        match raw.parse::<i64>()
        {
            Ok(1) => Similarity::Same,
            Ok(_) => Similarity::Different,
            Err(_) if raw == "S" || raw.eq_ignore_ascii_case("same") => Similarity::Same,
            Err(_) => Similarity::Different,
        }
    }

    /// Strict parse of a table code (`S` / `D`)
    pub fn from_code(code: &str) -> Option<Self>
    {
        match code
        {
            "S" => Some(Similarity::Same),
            "D" => Some(Similarity::Different),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str
    {
        match self
        {
            Similarity::Same => "S",
            Similarity::Different => "D",
        }
    }
}

/// Three-way magnitude level (DFreq, DCom, RCom).
///
/// The derived ordering is `Low < Medium < High`, and `Option<Magnitude>`
/// orders `None` (unknown) below every real level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Magnitude
{
    Low,
    Medium,
    High,
}

impl Magnitude
{
    /// Strict parse of a table code (`L` / `M` / `H`)
    pub fn from_code(code: &str) -> Option<Self>
    {
        match code
        {
            "L" => Some(Magnitude::Low),
            "M" => Some(Magnitude::Medium),
            "H" => Some(Magnitude::High),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str
    {
        match self
        {
            Magnitude::Low => "L",
            Magnitude::Medium => "M",
            Magnitude::High => "H",
        }
    }
}

/// Render an optional magnitude as its table code, unknown as `""`
pub fn magnitude_code(level: Option<Magnitude>) -> &'static str
{
    level.map_or("", Magnitude::code)
}

/// Inclusive cutoffs for one magnitude signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds
{
    /// Values `<= low_max` are Low
    pub low_max: i64,
    /// Values `<= medium_max` (and above `low_max`) are Medium
    pub medium_max: i64,
}

impl Thresholds
{
    pub const fn new(
        low_max: i64,
        medium_max: i64,
    ) -> Self
    {
        Self { low_max, medium_max }
    }

    pub fn classify(
        &self,
        value: i64,
    ) -> Magnitude
    {
        if value <= self.low_max
        {
            Magnitude::Low
        }
        else if value <= self.medium_max
        {
            Magnitude::Medium
        }
        else
        {
            Magnitude::High
        }
    }

    /// Parse and classify a raw integer signal; unparsable input is unknown.
    pub fn map(
        &self,
        raw: &str,
    ) -> Option<Magnitude>
    {
        raw.trim()
            .parse::<i64>()
            .ok()
            .map(|v| self.classify(v))
    }
}

/// Fully-specified scoring key. Only valid levels can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelKey
{
    pub asim: Similarity,
    pub fsim: Similarity,
    pub dfreq: Magnitude,
    pub dcom: Magnitude,
    pub rcom: Magnitude,
}

impl LevelKey
{
    /// Parse five table codes; any invalid component rejects the key.
    pub fn from_codes(
        asim: &str,
        fsim: &str,
        dfreq: &str,
        dcom: &str,
        rcom: &str,
    ) -> Option<Self>
    {
        Some(Self {
            asim: Similarity::from_code(asim)?,
            fsim: Similarity::from_code(fsim)?,
            dfreq: Magnitude::from_code(dfreq)?,
            dcom: Magnitude::from_code(dcom)?,
            rcom: Magnitude::from_code(rcom)?,
        })
    }
}

/// Levels derived for one record, possibly with unknown magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTuple
{
    pub asim: Similarity,
    pub fsim: Similarity,
    pub dfreq: Option<Magnitude>,
    pub dcom: Option<Magnitude>,
    pub rcom: Option<Magnitude>,
}

impl LevelTuple
{
    /// The lookup key, or `None` when any magnitude is unknown
    pub fn key(&self) -> Option<LevelKey>
    {
        Some(LevelKey {
            asim: self.asim,
            fsim: self.fsim,
            dfreq: self.dfreq?,
            dcom: self.dcom?,
            rcom: self.rcom?,
        })
    }
}

/// Raw textual signals of one record, borrowed from its row
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSignals<'a>
{
    pub asim: &'a str,
    pub fsim: &'a str,
    pub dfreq: &'a str,
    pub dcom: &'a str,
    /// Root commonality; `None` when the secondary lookup had no entry
    pub rcom: Option<&'a str>,
}

/// Per-signal thresholds bundled into one mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelMapper
{
    pub dfreq: Thresholds,
    pub dcom: Thresholds,
    pub rcom: Thresholds,
}

impl LevelMapper
{
    pub fn map(
        &self,
        signals: &RawSignals<'_>,
    ) -> LevelTuple
    {
        LevelTuple {
            asim: Similarity::from_raw(signals.asim),
            fsim: Similarity::from_raw(signals.fsim),
            dfreq: self.dfreq.map(signals.dfreq),
            dcom: self.dcom.map(signals.dcom),
            rcom: signals
                .rcom
                .filter(|raw| !raw.trim().is_empty())
                .and_then(|raw| self.rcom.map(raw)),
        }
    }
}

impl Default for LevelMapper
{
    fn default() -> Self
    {
        Self {
            dfreq: Thresholds::new(1, 3),
            dcom: Thresholds::new(2, 4),
            rcom: Thresholds::new(2, 4),
        }
    }
}
