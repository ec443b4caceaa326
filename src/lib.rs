//! **basma** - easiness scoring and distractor selection for dialectal vocabulary
//!
//! Raw lexicon signals are discretized into levels and looked up in a scoring
//! table; per concept, the best word of each difficulty tier is chosen and
//! wrong-answer words are drawn from other concepts by edit distance.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Fatal error taxonomy
pub mod error;

/// Scoring and selection engine
pub mod core {
    /// Raw signal to ordinal level mapping
    pub mod level;
    pub use level::{LevelKey, LevelMapper, LevelTuple, Magnitude, Similarity, Thresholds};

    /// Level tuple to (score, category) lookup table
    pub mod table;
    pub use table::{Category, CategoryThresholds, ScoringTable, TableLayout};

    /// Lexical and scored record model, concept grouping
    pub mod record;
    pub use record::{ConceptGroup, LexicalRecord, ScoredRecord, group_by_concept};

    /// Record scoring against the table, with the RCom lookup
    pub mod resolve;
    pub use resolve::{RComLookup, ScoreResolver};

    /// Best word per tier, long-form listings, concept vocabularies
    pub mod tiers;
    pub use tiers::{ConceptVocabulary, TierSelection, select_all, select_best};

    /// Edit distance
    pub mod similarity;
    pub use similarity::{edit_distance, normalized_distance};

    /// Distractor ranking and selection policies
    pub mod distractor;
    pub use distractor::{CandidateIndex, DistractorPolicy, RankCascade, TypedSlots, select_ranked};
}

/// Command handlers, one per subcommand
pub mod cli_ext {
    pub mod distractors_cmd;
    pub mod group_cmd;
    pub mod pipeline_cmd;
    pub mod score_cmd;
    pub mod targets_cmd;

    /// Stage output writing and summaries
    pub mod report;
}

/// Infrastructure - configuration, tabular I/O, logging
pub mod infra {
    /// Layered configuration with TOML/YAML/JSON files and BASMA_ env vars
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// CSV reading and writing
    pub mod io;

    /// tracing-subscriber setup
    pub mod logging;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use error::{Error, Result};
pub use infra::{Config, load_config};
