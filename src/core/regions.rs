//! Moroccan administrative regions and the cities they contain.
//!
//! This is the single region table of the crate. Geography scoring and the
//! city suggestion endpoint both read it, and every city belongs to at most
//! one region. Lookups fold case, surrounding whitespace and diacritics, so
//! "Fès", "fes" and " FES " are the same city.

use unicode_normalization::UnicodeNormalization;

/// An administrative region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub slug: &'static str,
    pub name: &'static str,
    pub cities: &'static [&'static str],
}

pub const REGIONS: &[Region] = &[
    Region {
        slug: "tanger_tetouan",
        name: "Tanger-Tétouan-Al Hoceïma",
        cities: &["Tanger", "Tétouan", "Al Hoceïma", "Larache", "Chefchaouen"],
    },
    Region {
        slug: "oriental",
        name: "Oriental",
        cities: &["Oujda", "Nador", "Berkane", "Taourirt", "Jerada"],
    },
    Region {
        slug: "fes_meknes",
        name: "Fès-Meknès",
        cities: &["Fès", "Meknès", "Ifrane", "Taza", "Sefrou"],
    },
    Region {
        slug: "rabat_sale",
        name: "Rabat-Salé-Kénitra",
        cities: &["Rabat", "Salé", "Témara", "Kénitra", "Skhirat", "Khémisset"],
    },
    Region {
        slug: "beni_mellal",
        name: "Béni Mellal-Khénifra",
        cities: &["Béni Mellal", "Khouribga", "Azilal", "Khénifra", "Fquih Ben Salah"],
    },
    Region {
        slug: "grand_casablanca",
        name: "Casablanca-Settat",
        cities: &["Casablanca", "Settat", "Mohammedia", "El Jadida", "Berrechid"],
    },
    Region {
        slug: "marrakech_safi",
        name: "Marrakech-Safi",
        cities: &["Marrakech", "Safi", "Essaouira", "Kelaat Es-Seraghna"],
    },
    Region {
        slug: "draa_tafilalet",
        name: "Drâa-Tafilalet",
        cities: &["Ouarzazate", "Zagora", "Tinghir", "Midelt", "Errachidia"],
    },
    Region {
        slug: "souss_massa",
        name: "Souss-Massa",
        cities: &["Agadir", "Tiznit", "Taroudant", "Inezgane"],
    },
    Region {
        slug: "guelmim",
        name: "Guelmim-Oued Noun",
        cities: &["Guelmim", "Tan-Tan", "Sidi Ifni", "Assa-Zag"],
    },
    Region {
        slug: "laayoune",
        name: "Laâyoune-Sakia El Hamra",
        cities: &["Laâyoune", "Boujdour", "Smara"],
    },
    Region {
        slug: "dakhla",
        name: "Dakhla-Oued Ed-Dahab",
        cities: &["Dakhla", "Aousserd"],
    },
];

/// Cities suggested when no region is requested
pub const POPULAR_CITIES: &[&str] = &[
    "Casablanca", "Rabat", "Fès", "Marrakech", "Tanger", "Agadir",
    "Meknès", "Oujda", "Salé", "Témara", "Mohammedia", "Settat",
    "Safi", "El Jadida", "Nador", "Tétouan", "Béni Mellal", "Khémisset",
];

/// Lowercase, trim and strip diacritics
pub fn fold(name: &str) -> String {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[inline]
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036f}')
}

/// Region a city belongs to, if any
pub fn region_of(city: &str) -> Option<&'static Region> {
    let folded = fold(city);
    if folded.is_empty() {
        return None;
    }
    REGIONS
        .iter()
        .find(|region| region.cities.iter().any(|c| fold(c) == folded))
}

/// True when `city` lies in the same region as any of `preferred`
pub fn same_region(preferred: &[String], city: &str) -> bool {
    let Some(target) = region_of(city) else {
        return false;
    };
    preferred
        .iter()
        .filter_map(|p| region_of(p))
        .any(|region| region.slug == target.slug)
}

/// Region by slug or display name
pub fn find_region(key: &str) -> Option<&'static Region> {
    let folded = fold(key);
    REGIONS
        .iter()
        .find(|region| region.slug == folded || fold(region.name) == folded)
}

/// Cities of the requested region, or the popular list when the region is
/// missing or unknown
pub fn suggest_cities(region: Option<&str>) -> &'static [&'static str] {
    region
        .and_then(find_region)
        .map(|r| r.cities)
        .unwrap_or(POPULAR_CITIES)
}
