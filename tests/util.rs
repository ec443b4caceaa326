//! Shared test utilities for integration tests
//!
//! Builds a small lexicon project on disk: a config file, the three input
//! tables, and an empty output directory.

#![allow(dead_code)]

use assert_fs::prelude::*;

/// Config pointing every stage at `in/` and `out/`, with a scoring table
/// whose header is the first line.
pub const CONFIG: &str = r#"seed = 42

[files]
scores = "in/scores.csv"
frequencies = "in/frequencies.csv"
scoring_table = "in/scoring_table.csv"
easiness = "out/easiness.csv"
targets = "out/targets.csv"
targets_all_long = "out/all_long.csv"
targets_all_triplets = "out/all_triplets.csv"
grouped = "out/grouped.csv"
distractors = "out/distractors.csv"

[scoring_table]
header_row = 0
data_start_row = 1

[scoring_table.columns]
asim = 0
fsim = 1
dfreq = 2
dcom = 3
rcom = 4
score = 5
category = 6

[frequencies_file.columns]
english = 0
french = 1
msa = 2
pos = 3
coda = 4
rcom = 5
"#;

/// Two rows carry a category; the other two get one inferred from the score.
pub const SCORING_TABLE: &str = "\
ASim,FSim,DFreq,DCom,RCom,Score,Category
S,S,H,H,L,10,Easy
S,D,M,M,L,7,
D,D,L,L,L,3,
S,S,L,L,L,9,
not,a,valid,row
";

pub const FREQUENCIES: &str = "\
English,French,MSA,POS,CODA,RCom
house,maison,بيت,NOUN,bet,1
house,maison,بيت,NOUN,dar,1
house,maison,بيت,NOUN,manzil,1
dog,chien,كلب,NOUN,kalb,1
dog,chien,كلب,NOUN,kelb,1
dog,chien,كلب,NOUN,chien,1
water,eau,ماء,NOUN,mayy,1
";

/// Concepts 1 and 2 are complete; concept 3 has one Easy word and one word
/// without an RCom entry, which stays unscored.
pub const SCORES: &str = "\
ID,English,French,MSA,POS,Region,CODA,ASim,FSim,DFreq,DCom
1,house,maison,بيت,NOUN,Iraq,bet,1,1,5,5
1,house,maison,بيت,NOUN,Egypt,dar,1,0,2,3
1,house,maison,بيت,NOUN,Morocco,manzil,0,0,0,0
2,dog,chien,كلب,NOUN,Iraq,kalb,1,1,5,5
2,dog,chien,كلب,NOUN,Syria,kelb,1,0,2,3
2,dog,chien,كلب,NOUN,Tunis,chien,0,0,0,0
3,water,eau,ماء,NOUN,Iraq,mayy,1,1,0,0
3,water,eau,ماء,NOUN,Oman,moy,1,1,0,0
";

/// Create the fixture project in a fresh temp dir.
pub fn make_lexicon_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("basma.toml")
        .write_str(CONFIG)
        .expect("write config");
    tmp.child("in/scoring_table.csv")
        .write_str(SCORING_TABLE)
        .expect("write scoring table");
    tmp.child("in/frequencies.csv")
        .write_str(FREQUENCIES)
        .expect("write frequencies");
    tmp.child("in/scores.csv")
        .write_str(SCORES)
        .expect("write scores");

    tmp
}

/// Read an output file, normalizing line endings.
pub fn read_lines(
    tmp: &assert_fs::TempDir,
    rel: &str,
) -> Vec<String>
{
    std::fs::read_to_string(tmp.path().join(rel))
        .expect("read output")
        .lines()
        .map(str::to_string)
        .collect()
}
