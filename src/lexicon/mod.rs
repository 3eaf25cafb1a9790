//! Sector keyword lexicon: suggestions, text keyword extraction and sector
//! affinity.
//!
//! A [`Lexicon`] is built once at startup, either from the built-in catalog
//! or from a TOML file, and is read-only afterwards.

pub mod catalog;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::error::EngineError;
use catalog::{
    CatalogFile, SectorEntry, SynonymEntry, GENERIC_FALLBACK_LEN, GENERIC_KEYWORDS,
    SECTOR_KEYWORDS, STOP_WORDS, SYNONYMS,
};

pub const DEFAULT_MIN_KEYWORD_LENGTH: usize = 3;
pub const MAX_EXTRACTED_KEYWORDS: usize = 20;
pub const DEFAULT_RELATED_LIMIT: usize = 10;

const EXACT_MATCH_WEIGHT: f64 = 1.0;
const PARTIAL_MATCH_WEIGHT: f64 = 0.5;
const SYNONYM_MATCH_WEIGHT: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct Lexicon {
    sectors: Vec<SectorEntry>,
    synonyms: Vec<SynonymEntry>,
    stop_words: HashSet<String>,
    generic_keywords: Vec<String>,
}

impl Lexicon {
    /// Lexicon backed by the built-in catalog
    pub fn builtin() -> Self {
        Self {
            sectors: SECTOR_KEYWORDS
                .iter()
                .map(|(name, keywords)| SectorEntry {
                    name: name.to_string(),
                    keywords: to_strings(keywords),
                })
                .collect(),
            synonyms: SYNONYMS
                .iter()
                .map(|(term, variants)| SynonymEntry {
                    term: term.to_string(),
                    variants: to_strings(variants),
                })
                .collect(),
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            generic_keywords: to_strings(GENERIC_KEYWORDS),
        }
    }

    /// Parse a catalog in the [`CatalogFile`] layout
    pub fn from_toml_str(raw: &str) -> Result<Self, EngineError> {
        let file: CatalogFile = toml::from_str(raw)?;

        if file.sectors.is_empty() {
            return Err(EngineError::Config("lexicon catalog has no sectors".to_string()));
        }
        if let Some(blank) = file.sectors.iter().find(|s| s.name.trim().is_empty()) {
            return Err(EngineError::Config(format!(
                "lexicon catalog has a sector without a name ({} keywords)",
                blank.keywords.len()
            )));
        }

        let stop_words = match file.stop_words {
            Some(words) => words.into_iter().map(|w| w.to_lowercase()).collect(),
            None => STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        };

        Ok(Self {
            sectors: file.sectors,
            synonyms: file.synonyms,
            stop_words,
            generic_keywords: file
                .generic_keywords
                .unwrap_or_else(|| to_strings(GENERIC_KEYWORDS)),
        })
    }

    /// Load a catalog file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("cannot read lexicon catalog {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Sector names in catalog order
    pub fn sectors(&self) -> Vec<&str> {
        self.sectors.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of keywords per sector, in catalog order
    pub fn sector_keyword_counts(&self) -> Vec<(&str, usize)> {
        self.sectors
            .iter()
            .map(|s| (s.name.as_str(), s.keywords.len()))
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Suggested keywords for a sector.
    ///
    /// Tries, in order: exact sector name, sector name contained in (or
    /// containing) the input, keywords containing the input. Falls back to
    /// generic procurement keywords.
    pub fn keywords_for_sector(&self, sector: &str) -> Vec<String> {
        let needle = sector.trim().to_lowercase();
        if needle.is_empty() {
            return self.fallback_keywords();
        }

        if let Some(entry) = self
            .sectors
            .iter()
            .find(|s| s.name.to_lowercase() == needle)
        {
            return entry.keywords.clone();
        }

        if let Some(entry) = self.sectors.iter().find(|s| {
            let name = s.name.to_lowercase();
            name.contains(&needle) || needle.contains(&name)
        }) {
            return entry.keywords.clone();
        }

        let mut seen = HashSet::new();
        let hits: Vec<String> = self
            .all_keywords()
            .filter(|k| k.to_lowercase().contains(&needle))
            .filter(|k| seen.insert(k.to_string()))
            .map(str::to_string)
            .collect();

        if hits.is_empty() {
            self.fallback_keywords()
        } else {
            hits
        }
    }

    /// Most frequent significant words of a text.
    ///
    /// Letters, ASCII digits and inner hyphens are kept, everything else separates
    /// words. Words shorter than `min_length` characters and stop words are
    /// dropped. Ties keep first-occurrence order.
    pub fn extract_keywords(&self, text: &str, min_length: usize) -> Vec<String> {
        let cleaned: String = text
            .chars()
            .map(|c| if c.is_alphabetic() || c.is_ascii_digit() || c == '-' { c } else { ' ' })
            .collect();

        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for raw in cleaned.split_whitespace() {
            let word = raw.trim_matches('-').to_lowercase();
            if word.is_empty()
                || word.chars().count() < min_length
                || self.stop_words.contains(&word)
            {
                continue;
            }

            match positions.get(&word).copied() {
                Some(idx) => counts[idx].1 += 1,
                None => {
                    positions.insert(word.clone(), counts.len());
                    counts.push((word, 1));
                }
            }
        }

        // Stable: equal counts keep first-occurrence order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .take(MAX_EXTRACTED_KEYWORDS)
            .map(|(word, _)| word)
            .collect()
    }

    /// Affinity of a keyword list with each sector, normalized so the best
    /// sector scores 1.0. Sectors without any match are absent.
    pub fn sector_affinity<S: AsRef<str>>(&self, keywords: &[S]) -> BTreeMap<String, f64> {
        let mut scores: BTreeMap<String, f64> = BTreeMap::new();

        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                continue;
            }

            for sector in &self.sectors {
                let mut gained = 0.0;
                let mut touched = false;

                for candidate in &sector.keywords {
                    let candidate = candidate.to_lowercase();
                    if candidate == keyword {
                        gained += EXACT_MATCH_WEIGHT;
                        touched = true;
                    } else if candidate.contains(&keyword) || keyword.contains(&candidate) {
                        gained += PARTIAL_MATCH_WEIGHT;
                        touched = true;
                    }
                }

                for synonym in &self.synonyms {
                    if !contains_ignore_case(&sector.keywords, &synonym.term) {
                        continue;
                    }
                    for variant in &synonym.variants {
                        if variant.to_lowercase() == keyword {
                            gained += SYNONYM_MATCH_WEIGHT;
                            touched = true;
                        }
                    }
                }

                if touched {
                    *scores.entry(sector.name.clone()).or_insert(0.0) += gained;
                }
            }
        }

        let max = scores.values().copied().fold(0.0_f64, f64::max);
        if max > 0.0 {
            for score in scores.values_mut() {
                *score /= max;
            }
        }
        scores
    }

    /// Keywords related to `keyword`: catalog keywords containing it,
    /// multi-word catalog keywords sharing a word with it, and synonyms in
    /// both directions. The input itself is never suggested.
    pub fn related_keywords(&self, keyword: &str, limit: usize) -> Vec<String> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let needle_words: HashSet<&str> = needle.split_whitespace().collect();
        let mut related = Suggestions::new(&needle);

        for candidate in self.all_keywords() {
            let lowered = candidate.to_lowercase();
            if lowered.contains(&needle) {
                related.push(candidate);
                continue;
            }
            let words: HashSet<&str> = lowered.split_whitespace().collect();
            if words.len() > 1 && !words.is_disjoint(&needle_words) {
                related.push(candidate);
            }
        }

        for synonym in &self.synonyms {
            if synonym.term.to_lowercase() == needle {
                synonym.variants.iter().for_each(|v| related.push(v));
            } else if contains_ignore_case(&synonym.variants, &needle) {
                related.push(&synonym.term);
                synonym.variants.iter().for_each(|v| related.push(v));
            }
        }

        let mut out = related.into_vec();
        out.truncate(limit);
        out
    }

    /// Keywords plus their synonym expansions, deduplicated case-insensitively
    pub fn expand_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut expanded = Vec::new();
        let mut push = |term: &str| {
            let trimmed = term.trim();
            if !trimmed.is_empty() && seen.insert(trimmed.to_lowercase()) {
                expanded.push(trimmed.to_string());
            }
        };

        for keyword in keywords {
            let keyword = keyword.as_ref();
            push(keyword);

            let lowered = keyword.trim().to_lowercase();
            for synonym in &self.synonyms {
                if synonym.term.to_lowercase() == lowered {
                    synonym.variants.iter().for_each(|v| push(v));
                } else if contains_ignore_case(&synonym.variants, &lowered) {
                    push(&synonym.term);
                }
            }
        }

        expanded
    }

    fn all_keywords(&self) -> impl Iterator<Item = &str> {
        self.sectors
            .iter()
            .flat_map(|s| s.keywords.iter().map(String::as_str))
    }

    fn fallback_keywords(&self) -> Vec<String> {
        self.generic_keywords
            .iter()
            .take(GENERIC_FALLBACK_LEN)
            .cloned()
            .collect()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Insertion-ordered, case-insensitively deduplicated suggestions that skip
/// the query itself
struct Suggestions<'a> {
    query: &'a str,
    seen: HashSet<String>,
    items: Vec<String>,
}

impl<'a> Suggestions<'a> {
    fn new(query: &'a str) -> Self {
        Self {
            query,
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    fn push(&mut self, term: &str) {
        let lowered = term.to_lowercase();
        if lowered != self.query && self.seen.insert(lowered) {
            self.items.push(term.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

fn contains_ignore_case(list: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    list.iter().any(|item| item.to_lowercase() == needle)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
