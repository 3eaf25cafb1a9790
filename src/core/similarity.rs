use serde::{Deserialize, Serialize};

/// Normalized string similarity.
///
/// Implementations must be symmetric, return values in [0, 1], and return 1.0
/// only for identical inputs.
pub type SimilarityFn = fn(&str, &str) -> f64;

/// Built-in similarity metrics selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// 1 - indel distance / (len a + len b), i.e. 2 * LCS / (len a + len b)
    #[default]
    Indel,
    /// 1 - edit distance / longest length
    Levenshtein,
    /// Rewards shared prefixes
    JaroWinkler,
}

impl SimilarityMetric {
    pub fn function(&self) -> SimilarityFn {
        match self {
            Self::Indel => indel_ratio,
            Self::Levenshtein => levenshtein_ratio,
            Self::JaroWinkler => jaro_winkler_ratio,
        }
    }
}

/// Normalized insert/delete similarity over characters.
///
/// Two empty strings are identical (1.0).
pub fn indel_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * lcs_len(&a, &b)) as f64 / total as f64
}

/// Longest common subsequence length, two-row table
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[inline]
pub fn jaro_winkler_ratio(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b)
}

#[inline]
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}
