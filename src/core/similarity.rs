//! Edit distance over Unicode scalar values.

/// Levenshtein distance (unit cost insert/delete/substitute).
///
/// Runs a single DP row over the shorter string, so working memory is
/// O(min(|a|, |b|)).
pub fn edit_distance(
    a: &str,
    b: &str,
) -> usize
{
    if a == b
    {
        return 0;
    }

    let a: Vec<char> = a
        .chars()
        .collect();
    let b: Vec<char> = b
        .chars()
        .collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty()
    {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (j, lc) in long
        .iter()
        .enumerate()
    {
        // row[i] still holds the previous line's value until overwritten
        let mut diag = row[0];
        row[0] = j + 1;
        for (i, sc) in short
            .iter()
            .enumerate()
        {
            let above = row[i + 1];
            let cost = usize::from(sc != lc);
            row[i + 1] = (above + 1)
                .min(row[i] + 1)
                .min(diag + cost);
            diag = above;
        }
    }

    row[short.len()]
}

/// Distance divided by the longer length (1 when both are empty), in [0, 1].
pub fn normalized_distance(
    a: &str,
    b: &str,
) -> f64
{
    let denom = a
        .chars()
        .count()
        .max(b.chars().count())
        .max(1);
    edit_distance(a, b) as f64 / denom as f64
}

/// Smallest raw distance from `word` to any anchor; `None` without anchors.
pub fn min_distance<S: AsRef<str>>(
    word: &str,
    anchors: &[S],
) -> Option<usize>
{
    anchors
        .iter()
        .map(|a| edit_distance(word, a.as_ref()))
        .min()
}

/// Smallest normalized distance from `word` to any anchor.
pub fn min_normalized_distance<S: AsRef<str>>(
    word: &str,
    anchors: &[S],
) -> Option<f64>
{
    anchors
        .iter()
        .map(|a| normalized_distance(word, a.as_ref()))
        .min_by(f64::total_cmp)
}
