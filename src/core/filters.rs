use std::fmt;

use crate::models::{Profile, Tender};

/// Which exclusion rule removed a tender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion<'a> {
    Sector(&'a str),
    City(&'a str),
}

impl fmt::Display for Exclusion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Sector(term) => write!(f, "excluded sector `{term}`"),
            Exclusion::City(term) => write!(f, "excluded city `{term}`"),
        }
    }
}

/// Find the first exclusion rule matching a tender.
///
/// An excluded term matches when it is a case-insensitive substring of the
/// tender's sector (or city). Blank terms never match.
#[inline]
pub fn find_exclusion<'a>(profile: &'a Profile, tender: &Tender) -> Option<Exclusion<'a>> {
    let sector = tender.sector.to_lowercase();
    if let Some(term) = first_contained(&profile.excluded_sectors, &sector) {
        return Some(Exclusion::Sector(term));
    }

    let city = tender.city.to_lowercase();
    first_contained(&profile.excluded_cities, &city).map(Exclusion::City)
}

/// Check whether a tender is excluded by the profile
#[inline]
pub fn is_excluded(profile: &Profile, tender: &Tender) -> bool {
    find_exclusion(profile, tender).is_some()
}

fn first_contained<'a>(terms: &'a [String], haystack: &str) -> Option<&'a str> {
    terms
        .iter()
        .map(|t| t.trim())
        .find(|t| !t.is_empty() && haystack.contains(t.to_lowercase().as_str()))
}
