// src/extractors/notation.rs
//! Canonical comparison keys for move labels.
//!
//! Labels arrive either as numpad notation (`5L`, `j.M`, `236H`) or as the
//! move's prose name (`Dream Attraction`). Both are reduced to the same key
//! so headings and user input can be compared.

use once_cell::sync::Lazy;
use regex::Regex;

// Already-canonical forms: numpad motions ending in a button (5l, 66m, 236236h)
// and anything jump-prefixed (jm, j2h).
static CANONICAL_NOTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]+[lmhu]|j.+)$").expect("Failed to compile CANONICAL_NOTATION_RE")
});

/// Prose substring -> notation key. More specific phrases come first so the
/// `ultimate` variants are not shadowed by their base move.
const MOVE_ALIASES: &[(&str, &str)] = &[
    ("ultimate dream attraction", "236u"),
    ("ultimate rodent rhythm", "623u"),
    ("ultimate ring the dormouse", "214u"),
    ("ultimate marching teeth", "22u"),
    ("gilded heaven strike", "236236h"),
    ("eccentrical parade", "236236u"),
    ("dream attraction", "236l"),
    ("dream come true", "236l"),
    ("rodent rhythm", "623l"),
    ("ring the dormouse", "214l"),
    ("marching teeth", "22l"),
];

/// Special-move motions whose L/M/H versions share one prose name.
const SPECIAL_FAMILIES: &[(&str, &[&str])] = &[
    ("236", &["dream attraction", "dream come true"]),
    ("214", &["ring the dormouse"]),
    ("623", &["rodent rhythm"]),
    ("22", &["marching teeth"]),
];

const SPECIAL_BUTTONS: [char; 3] = ['l', 'm', 'h'];

static STANDARD: Lazy<Notation> = Lazy::new(|| Notation::new(MOVE_ALIASES, SPECIAL_FAMILIES));

/// Lower-case and drop `.` and spaces.
pub fn compact(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .filter(|c| *c != '.' && *c != ' ')
        .collect()
}

/// Alias tables used to turn labels into comparison keys.
#[derive(Debug, Clone)]
pub struct Notation {
    // (compacted phrase, key), in priority order
    aliases: Vec<(String, &'static str)>,
    families: Vec<(&'static str, Vec<&'static str>)>,
}

impl Notation {
    pub fn new(aliases: &[(&str, &'static str)], families: &[(&'static str, &[&'static str])]) -> Self {
        Self {
            aliases: aliases.iter().map(|(phrase, key)| (compact(phrase), *key)).collect(),
            families: families
                .iter()
                .map(|(motion, phrases)| (*motion, phrases.to_vec()))
                .collect(),
        }
    }

    /// The built-in tables, constructed once per process.
    pub fn standard() -> &'static Notation {
        &STANDARD
    }

    /// Reduces a label to its comparison key.
    ///
    /// Notation is returned compacted as-is; prose names are looked up in the
    /// alias table; anything else falls back to the compacted text.
    pub fn normalize(&self, label: &str) -> String {
        let compacted = compact(label);

        if CANONICAL_NOTATION_RE.is_match(&compacted) {
            return compacted;
        }

        for (phrase, key) in &self.aliases {
            if compacted.contains(phrase.as_str()) {
                tracing::trace!("Alias '{}' matched label '{}' -> {}", phrase, label, key);
                return (*key).to_string();
            }
        }

        compacted
    }

    /// Prose names for a directional special key (`236l`, `214h`, `22m`, ...).
    ///
    /// Returns `None` for keys outside the twelve `{236,214,623,22}x{l,m,h}` specials.
    pub fn special_phrases(&self, key: &str) -> Option<&[&'static str]> {
        let mut chars = key.chars();
        let button = chars.next_back()?;
        if !SPECIAL_BUTTONS.contains(&button) {
            return None;
        }
        let motion = chars.as_str();
        self.families
            .iter()
            .find(|(m, _)| *m == motion)
            .map(|(_, phrases)| phrases.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_is_kept() {
        let notation = Notation::standard();
        assert_eq!(notation.normalize("5L"), "5l");
        assert_eq!(notation.normalize("j.M"), "jm");
        assert_eq!(notation.normalize("236L"), "236l");
        assert_eq!(notation.normalize("66 H"), "66h");
        assert_eq!(notation.normalize("j.2H"), "j2h");
    }

    #[test]
    fn test_every_alias_maps_to_its_key() {
        let notation = Notation::standard();
        for (phrase, key) in MOVE_ALIASES {
            assert_eq!(notation.normalize(phrase), *key, "alias '{}'", phrase);
        }
        assert_eq!(notation.normalize("Dream Attraction"), "236l");
        assert_eq!(notation.normalize("Ultimate Rodent Rhythm"), "623u");
        assert_eq!(notation.normalize("Rodent Rhythm"), "623l");
    }

    #[test]
    fn test_unknown_label_is_compacted() {
        assert_eq!(Notation::standard().normalize("Normal Moves"), "normalmoves");
        assert_eq!(Notation::standard().normalize("Throw"), "throw");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let notation = Notation::standard();
        let labels = [
            "5L", "j.M", "236H", "Dream Attraction", "Ultimate Marching Teeth",
            "Normal Moves", "c.L", "Eccentrical Parade", "", "Dash Normals",
        ];
        for label in labels {
            let once = notation.normalize(label);
            assert_eq!(notation.normalize(&once), once, "label '{}'", label);
        }
    }

    #[test]
    fn test_special_phrases() {
        let notation = Notation::standard();
        assert_eq!(
            notation.special_phrases("236m"),
            Some(&["dream attraction", "dream come true"][..])
        );
        assert_eq!(notation.special_phrases("22h"), Some(&["marching teeth"][..]));
        assert_eq!(notation.special_phrases("236u"), None);
        assert_eq!(notation.special_phrases("5l"), None);
        assert_eq!(notation.special_phrases(""), None);
    }
}
