//! Free-text carrier location parsing
//!
//! Carrier strings look like `"City, Region/Country"` or just `"Country"`.
//! Only the last comma splits; everything before it is the city.

use crate::domain::types::Location;
use celes::Country;
use rustc_hash::FxHashMap;

/// Short names that differ from the table's long name, with the official
/// and common spellings carriers also send. Keyed by alpha-2 code.
const SHORT_NAMES: &[(&str, &str, &[&str])] = &[
    ("US", "United States", &["United States of America", "America"]),
    (
        "GB",
        "United Kingdom",
        &["United Kingdom of Great Britain and Northern Ireland", "Great Britain", "UK"],
    ),
    ("DE", "Germany", &["Federal Republic of Germany"]),
    ("FR", "France", &["French Republic"]),
    ("NL", "Netherlands", &["Kingdom of the Netherlands", "Holland"]),
    ("CN", "China", &["People's Republic of China"]),
    ("CZ", "Czechia", &["Czech Republic"]),
    ("MX", "Mexico", &["United Mexican States"]),
    ("ES", "Spain", &["Kingdom of Spain"]),
    ("IT", "Italy", &["Italian Republic"]),
];

/// Read-only country name lookup, built once from the ISO 3166-1 table.
///
/// Every key for one country (short name, long name, known official or
/// common spellings, alpha-2 and alpha-3 codes) resolves to the same short
/// name. Matching ignores case, whitespace and punctuation.
#[derive(Debug, Clone)]
pub struct CountryReference {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
}

fn lookup_key(text: &str) -> String {
    text.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

/// `"The United States Of America"` -> `"United States of America"`
fn tidy_long_name(long_name: &str) -> String {
    let trimmed = long_name.strip_prefix("The ").unwrap_or(long_name);
    trimmed
        .split(' ')
        .enumerate()
        .map(|(i, word)| match word {
            "Of" | "And" | "The" if i > 0 => word.to_lowercase(),
            _ => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl CountryReference {
    pub fn iso3166() -> Self {
        let overrides: FxHashMap<&str, (&str, &[&str])> = SHORT_NAMES
            .iter()
            .map(|&(alpha2, short, extra)| (alpha2, (short, extra)))
            .collect();

        let mut names = Vec::new();
        let mut index = FxHashMap::default();
        let countries = Country::get_countries();

        for country in countries.iter() {
            let tidy = tidy_long_name(country.long_name);
            let (short, extra) = match overrides.get(country.alpha2) {
                Some(&(short, extra)) => (short.to_string(), extra),
                None => (tidy.clone(), &[][..]),
            };

            let slot = names.len();
            let keys = [short.as_str(), tidy.as_str(), country.long_name];
            for key in keys.into_iter().chain(extra.iter().copied()) {
                index.insert(lookup_key(key), slot);
            }
            names.push(short);
        }
        // Codes never shadow a name
        for (slot, country) in countries.iter().enumerate() {
            index.entry(lookup_key(country.alpha2)).or_insert(slot);
            index.entry(lookup_key(country.alpha3)).or_insert(slot);
        }

        Self { names, index }
    }

    /// Short name for `name`, if the reference knows it
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        let key = lookup_key(name);
        if key.is_empty() {
            return None;
        }
        self.index.get(&key).map(|&slot| self.names[slot].as_str())
    }

    /// Trim and canonicalize; unknown names are returned trimmed but otherwise verbatim
    pub fn normalize(&self, name: &str) -> String {
        let name = name.trim();
        match self.canonical_name(name) {
            Some(canonical) => canonical.to_string(),
            None => name.to_string(),
        }
    }
}

impl Default for CountryReference {
    fn default() -> Self {
        Self::iso3166()
    }
}

/// Upper-case the first character, leave the rest untouched
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse a carrier location. Never fails.
pub fn parse_location(raw: Option<&str>, countries: &CountryReference) -> Location {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Location::unknown();
    };

    match raw.rsplit_once(',') {
        Some((city, country)) => Location {
            country: Some(countries.normalize(country)),
            city: Some(capitalize(city.trim())),
        },
        None => Location { country: Some(countries.normalize(raw)), city: None },
    }
}
