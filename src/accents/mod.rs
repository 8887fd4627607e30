//! Accent candidates per base character and character set

use std::collections::{HashMap, HashSet};

mod table;

type Glyphs = &'static [&'static str];

/// Character sets that can be offered in the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    All,
    Bg,
    Ca,
    Crh,
    Cur,
    Cy,
    Cz,
    Dk,
    Epo,
    Est,
    Fi,
    Fr,
    Ga,
    Gd,
    De,
    El,
    He,
    Hr,
    Hu,
    Is,
    Ipa,
    It,
    Ku,
    Lt,
    Mi,
    Mk,
    Mt,
    Nl,
    No,
    Pi,
    Pie,
    Pl,
    Pt,
    Ro,
    Rom,
    Sk,
    Sl,
    Sp,
    Sr,
    SrCyrl,
    Sv,
    Tk,
    Vi,
}

struct Entry {
    language: Language,
    code: &'static str,
    name: &'static str,
    accents: fn(char) -> Glyphs,
}

fn no_accents(_: char) -> Glyphs {
    &[]
}

/// Indexed by `Language as usize`
static LANGUAGES: [Entry; 43] = [
    Entry { language: Language::All, code: "ALL", name: "All Languages", accents: no_accents },
    Entry { language: Language::Bg, code: "BG", name: "Bulgarian", accents: table::bg },
    Entry { language: Language::Ca, code: "CA", name: "Catalan", accents: table::ca },
    Entry { language: Language::Crh, code: "CRH", name: "Crimean Tatar", accents: table::crh },
    Entry { language: Language::Cur, code: "CUR", name: "Currency", accents: table::cur },
    Entry { language: Language::Cy, code: "CY", name: "Welsh", accents: table::cy },
    Entry { language: Language::Cz, code: "CZ", name: "Czech", accents: table::cz },
    Entry { language: Language::Dk, code: "DK", name: "Danish", accents: table::dk },
    Entry { language: Language::Epo, code: "EPO", name: "Esperanto", accents: table::epo },
    Entry { language: Language::Est, code: "EST", name: "Estonian", accents: table::est },
    Entry { language: Language::Fi, code: "FI", name: "Finnish", accents: table::fi },
    Entry { language: Language::Fr, code: "FR", name: "French", accents: table::fr },
    Entry { language: Language::Ga, code: "GA", name: "Gaeilge (Irish)", accents: table::ga },
    Entry { language: Language::Gd, code: "GD", name: "Gàidhlig (Scottish)", accents: table::gd },
    Entry { language: Language::De, code: "DE", name: "German", accents: table::de },
    Entry { language: Language::El, code: "EL", name: "Greek", accents: table::el },
    Entry { language: Language::He, code: "HE", name: "Hebrew", accents: table::he },
    Entry { language: Language::Hr, code: "HR", name: "Croatian", accents: table::hr },
    Entry { language: Language::Hu, code: "HU", name: "Hungarian", accents: table::hu },
    Entry { language: Language::Is, code: "IS", name: "Icelandic", accents: table::is },
    Entry { language: Language::Ipa, code: "IPA", name: "IPA", accents: table::ipa },
    Entry { language: Language::It, code: "IT", name: "Italian", accents: table::it },
    Entry { language: Language::Ku, code: "KU", name: "Kurdish", accents: table::ku },
    Entry { language: Language::Lt, code: "LT", name: "Lithuanian", accents: table::lt },
    Entry { language: Language::Mi, code: "MI", name: "Maori", accents: table::mi },
    Entry { language: Language::Mk, code: "MK", name: "Macedonian", accents: table::mk },
    Entry { language: Language::Mt, code: "MT", name: "Maltese", accents: table::mt },
    Entry { language: Language::Nl, code: "NL", name: "Dutch", accents: table::nl },
    Entry { language: Language::No, code: "NO", name: "Norwegian", accents: table::no },
    Entry { language: Language::Pi, code: "PI", name: "Pinyin", accents: table::pi },
    Entry { language: Language::Pie, code: "PIE", name: "Proto-Indo-European", accents: table::pie },
    Entry { language: Language::Pl, code: "PL", name: "Polish", accents: table::pl },
    Entry { language: Language::Pt, code: "PT", name: "Portuguese", accents: table::pt },
    Entry { language: Language::Ro, code: "RO", name: "Romanian", accents: table::ro },
    Entry { language: Language::Rom, code: "ROM", name: "Romanization (ME)", accents: table::rom },
    Entry { language: Language::Sk, code: "SK", name: "Slovak", accents: table::sk },
    Entry { language: Language::Sl, code: "SL", name: "Slovenian", accents: table::sl },
    Entry { language: Language::Sp, code: "SP", name: "Spanish", accents: table::sp },
    Entry { language: Language::Sr, code: "SR", name: "Serbian", accents: table::sr },
    Entry { language: Language::SrCyrl, code: "SR_CYRL", name: "Serbian (Cyrillic)", accents: table::sr_cyrl },
    Entry { language: Language::Sv, code: "SV", name: "Swedish", accents: table::sv },
    Entry { language: Language::Tk, code: "TK", name: "Turkish", accents: table::tk },
    Entry { language: Language::Vi, code: "VI", name: "Vietnamese", accents: table::vi },
];

impl Language {
    /// Every language including the `All` pseudo-set, in listing order
    pub fn all() -> impl Iterator<Item = Language> {
        LANGUAGES.iter().map(|entry| entry.language)
    }

    /// Every concrete character set
    pub fn sets() -> impl Iterator<Item = Language> {
        Self::all().filter(|&language| language != Language::All)
    }

    fn entry(self) -> &'static Entry {
        &LANGUAGES[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.entry().code
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Case-insensitive lookup by code (`"fr"`, `"SR_CYRL"`)
    pub fn from_code(code: &str) -> Option<Language> {
        LANGUAGES
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(code.trim()))
            .map(|entry| entry.language)
    }

    /// Accents this set defines for `base`, ignoring case. `All` defines none itself.
    pub fn accents(self, base: char) -> Glyphs {
        (self.entry().accents)(fold_case(base))
    }
}

/// Which character sets a lookup draws from, captured once per gesture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupConfig {
    pub all_character_sets: bool,
    pub character_sets: Vec<String>,
}

fn fold_case(base: char) -> char {
    let mut lower = base.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => c,
        _ => base,
    }
}

/// Pushes `glyphs` that were not seen yet, keeping first-seen order
fn merge(into: &mut Vec<String>, seen: &mut HashSet<&'static str>, glyphs: Glyphs) {
    for &glyph in glyphs {
        if seen.insert(glyph) {
            into.push(glyph.to_string());
        }
    }
}

/// Candidates for `base` without caching.
///
/// With an explicit list, codes are matched case-insensitively, unknown codes are
/// skipped and duplicates across sets are dropped. The all-languages mode returns the
/// union of every set in listing order.
pub fn lookup(base: char, config: &LookupConfig) -> Vec<String> {
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();

    if config.all_character_sets {
        for language in Language::sets() {
            merge(&mut candidates, &mut seen, language.accents(base));
        }
        return candidates;
    }

    for language in config
        .character_sets
        .iter()
        .filter_map(|code| Language::from_code(code))
    {
        merge(&mut candidates, &mut seen, language.accents(base));
    }
    candidates
}

/// Lookup front end that memoizes the all-languages union per base character
#[derive(Debug, Default)]
pub struct AccentTable {
    all_languages: HashMap<char, Vec<String>>,
}

impl AccentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&mut self, base: char, config: &LookupConfig) -> Vec<String> {
        if !config.all_character_sets {
            return lookup(base, config);
        }
        self.all_languages
            .entry(fold_case(base))
            .or_insert_with(|| lookup(base, config))
            .clone()
    }
}

/// Candidate as shown and injected: upper-cased when the held character is upper case
pub fn match_case(base: char, glyph: &str) -> String {
    if base.is_uppercase() {
        glyph.to_uppercase()
    } else {
        glyph.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(codes: &[&str]) -> LookupConfig {
        LookupConfig {
            all_character_sets: false,
            character_sets: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn all_sets() -> LookupConfig {
        LookupConfig {
            all_character_sets: true,
            character_sets: Vec::new(),
        }
    }

    #[test]
    fn test_table_matches_enum_order() {
        for (index, entry) in LANGUAGES.iter().enumerate() {
            assert_eq!(entry.language as usize, index, "{} out of order", entry.code);
        }
        assert_eq!(Language::sets().count(), 42);
    }

    #[test]
    fn test_french_e() {
        assert_eq!(lookup('e', &sets(&["FR"])), vec!["é", "è", "ê", "ë", "€"]);
    }

    #[test]
    fn test_german_comma() {
        assert_eq!(
            lookup(',', &sets(&["DE"])),
            vec!["„", "\"", ".", "'", "»", "«", "›", "‹"]
        );
    }

    #[test]
    fn test_empty_or_unknown_languages_yield_nothing() {
        assert!(lookup(',', &sets(&[])).is_empty());
        assert!(lookup('e', &sets(&["XX"])).is_empty());
        assert!(lookup('e', &sets(&["ALL"])).is_empty());
        assert!(lookup('q', &sets(&["FR", "DE"])).is_empty());
    }

    #[test]
    fn test_base_character_is_case_insensitive() {
        assert_eq!(lookup('E', &sets(&["FR"])), lookup('e', &sets(&["FR"])));
    }

    #[test]
    fn test_codes_are_case_insensitive() {
        assert_eq!(lookup('e', &sets(&["fr"])), lookup('e', &sets(&["FR"])));
        assert_eq!(Language::from_code("sr_cyrl"), Some(Language::SrCyrl));
        assert_eq!(Language::from_code("nope"), None);
    }

    #[test]
    fn test_duplicates_dropped_in_first_seen_order() {
        // FR e: é è ê ë €, SP e: é €
        assert_eq!(
            lookup('e', &sets(&["SP", "FR"])),
            vec!["é", "€", "è", "ê", "ë"]
        );
        // FR lists the plain double quote twice
        let quotes = lookup(',', &sets(&["FR"]));
        assert_eq!(quotes.iter().filter(|g| g.as_str() == "\"").count(), 1);
    }

    #[test]
    fn test_all_languages_is_a_deduplicated_union() {
        let all = lookup('e', &all_sets());
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        for language in Language::sets() {
            for glyph in language.accents('e') {
                assert!(all.iter().any(|g| g == glyph), "{glyph} missing");
            }
        }
        assert!(lookup('q', &all_sets()).is_empty());
    }

    #[test]
    fn test_all_languages_cached_per_base() {
        let mut table = AccentTable::new();
        let first = table.lookup('e', &all_sets());
        assert_eq!(table.all_languages.len(), 1);
        assert_eq!(table.lookup('E', &all_sets()), first);
        assert_eq!(table.all_languages.len(), 1);

        table.lookup('a', &all_sets());
        assert_eq!(table.all_languages.len(), 2);

        // explicit lists are never cached
        table.lookup('o', &sets(&["FR"]));
        assert_eq!(table.all_languages.len(), 2);
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case('E', "é"), "É");
        assert_eq!(match_case('e', "é"), "é");
        assert_eq!(match_case('A', "æ"), "Æ");
        assert_eq!(match_case(',', "«"), "«");
    }
}
