//! A compact rule table for English plural and singular forms.
//!
//! Rules match the end of the input case-insensitively and only rewrite the
//! matched suffix, so namespaced or camel-cased names such as
//! `tests/CamelKey` inflect on their last word.

use alloc::string::String;

// -----------------------------------------------------------------------------
// Tables

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

// (suffix, replacement) checked in order; the first match wins.
const PLURAL: &[(&str, &str)] = &[
    ("quiz", "quizzes"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("index", "indices"),
    ("octopus", "octopi"),
    ("virus", "viri"),
    ("alias", "aliases"),
    ("status", "statuses"),
    ("bus", "buses"),
    ("buffalo", "buffaloes"),
    ("tomato", "tomatoes"),
    ("axis", "axes"),
    ("testis", "testes"),
    ("sis", "ses"),
    ("hive", "hives"),
    ("tum", "ta"),
    ("ium", "ia"),
    ("x", "xes"),
    ("ch", "ches"),
    ("ss", "sses"),
    ("sh", "shes"),
    ("s", "s"),
];

const SINGULAR: &[(&str, &str)] = &[
    ("quizzes", "quiz"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("indices", "index"),
    ("octopi", "octopus"),
    ("octopus", "octopus"),
    ("viri", "virus"),
    ("virus", "virus"),
    ("aliases", "alias"),
    ("alias", "alias"),
    ("statuses", "status"),
    ("status", "status"),
    ("buses", "bus"),
    ("bus", "bus"),
    ("buffaloes", "buffalo"),
    ("tomatoes", "tomato"),
    ("axes", "axis"),
    ("testes", "testis"),
    ("analyses", "analysis"),
    ("databases", "database"),
    ("bases", "basis"),
    ("diagnoses", "diagnosis"),
    ("parentheses", "parenthesis"),
    ("prognoses", "prognosis"),
    ("synopses", "synopsis"),
    ("theses", "thesis"),
    ("sis", "sis"),
    ("hives", "hive"),
    ("ta", "tum"),
    ("ia", "ium"),
    ("xes", "x"),
    ("ches", "ch"),
    ("sses", "ss"),
    ("shes", "sh"),
    ("news", "news"),
    ("ss", "ss"),
    ("s", ""),
];

// -----------------------------------------------------------------------------
// Public API

/// Returns the plural form of the last word of `word`.
///
/// # Examples
///
/// ```
/// use am_utils::text::pluralize;
///
/// assert_eq!(pluralize("user"), "users");
/// assert_eq!(pluralize("users"), "users");
/// assert_eq!(pluralize("businessSector"), "businessSectors");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("person"), "people");
/// assert_eq!(pluralize("tests/CamelKey"), "tests/CamelKeys");
/// ```
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || is_uncountable(word) {
        return String::from(word);
    }
    if let Some(s) = irregular(word, |&(one, many)| (one, many)) {
        return s;
    }
    if let Some(s) = apply_rules(word, PLURAL) {
        return s;
    }
    if let Some(s) = consonant_y(word) {
        return s;
    }
    if let Some(s) = f_to_ves(word) {
        return s;
    }

    let mut out = String::from(word);
    out.push('s');
    out
}

/// Returns the singular form of the last word of `word`.
///
/// # Examples
///
/// ```
/// use am_utils::text::singularize;
///
/// assert_eq!(singularize("users"), "user");
/// assert_eq!(singularize("user"), "user");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("people"), "person");
/// assert_eq!(singularize("addresses"), "address");
/// ```
pub fn singularize(word: &str) -> String {
    if word.is_empty() || is_uncountable(word) {
        return String::from(word);
    }
    if let Some(s) = irregular(word, |&(one, many)| (many, one)) {
        return s;
    }
    // Irregular singulars are already singular.
    if IRREGULAR.iter().any(|(one, _)| ends_with_word(word, one)) {
        return String::from(word);
    }
    if let Some(s) = ies_to_y(word) {
        return s;
    }
    if let Some(s) = ves_to_f(word) {
        return s;
    }
    if let Some(s) = apply_rules(word, SINGULAR) {
        return s;
    }
    String::from(word)
}

// -----------------------------------------------------------------------------
// Rule helpers

fn ends_with_ci(word: &str, suffix: &str) -> bool {
    word.len() >= suffix.len()
        && word.is_char_boundary(word.len() - suffix.len())
        && word[word.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

// `suffix` matches a whole trailing word: it is preceded by nothing, a
// non-letter, or a lower-to-upper camel boundary.
fn ends_with_word(word: &str, suffix: &str) -> bool {
    if !ends_with_ci(word, suffix) {
        return false;
    }
    let head = &word[..word.len() - suffix.len()];
    let first = word[head.len()..].chars().next();
    match (head.chars().last(), first) {
        (None, _) => true,
        (Some(prev), _) if !prev.is_alphabetic() => true,
        (Some(_), Some(first)) => first.is_uppercase(),
        _ => false,
    }
}

fn is_uncountable(word: &str) -> bool {
    UNCOUNTABLE.iter().any(|u| ends_with_word(word, u))
}

// Replaces the suffix, keeping the case of its first character.
fn replace_suffix(word: &str, suffix_len: usize, replacement: &str) -> String {
    let head = &word[..word.len() - suffix_len];
    let tail_first_upper = word[head.len()..]
        .chars()
        .next()
        .is_some_and(char::is_uppercase);

    let mut out = String::with_capacity(head.len() + replacement.len());
    out.push_str(head);
    let mut chars = replacement.chars();
    if let Some(c) = chars.next() {
        if tail_first_upper {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        out.extend(chars);
    }
    out
}

fn irregular(
    word: &str,
    pick: impl Fn(&(&'static str, &'static str)) -> (&'static str, &'static str),
) -> Option<String> {
    IRREGULAR.iter().find_map(|pair| {
        let (from, to) = pick(pair);
        ends_with_ci(word, from).then(|| replace_suffix(word, from.len(), to))
    })
}

fn apply_rules(word: &str, rules: &[(&str, &str)]) -> Option<String> {
    rules
        .iter()
        .find(|(suffix, _)| ends_with_ci(word, suffix))
        .map(|(suffix, replacement)| replace_suffix(word, suffix.len(), replacement))
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

// "category" -> "categories", "query" -> "queries", but "day" -> "days".
fn consonant_y(word: &str) -> Option<String> {
    if !ends_with_ci(word, "y") {
        return None;
    }
    let head = &word[..word.len() - 1];
    let prev = head.chars().last()?;
    let qu = ends_with_ci(head, "qu");
    (qu || !(is_vowel(prev) || prev.eq_ignore_ascii_case(&'y')))
        .then(|| replace_suffix(word, 1, "ies"))
}

fn ies_to_y(word: &str) -> Option<String> {
    if !ends_with_ci(word, "ies") {
        return None;
    }
    let head = &word[..word.len() - 3];
    let prev = head.chars().last()?;
    let qu = ends_with_ci(head, "qu");
    (qu || !is_vowel(prev)).then(|| replace_suffix(word, 3, "y"))
}

// "wife" -> "wives", "half" -> "halves", "wolf" -> "wolves".
fn f_to_ves(word: &str) -> Option<String> {
    if ends_with_ci(word, "fe") && !ends_with_ci(word, "ffe") {
        return Some(replace_suffix(word, 2, "ves"));
    }
    if ends_with_ci(word, "lf") || ends_with_ci(word, "rf") {
        return Some(replace_suffix(word, 1, "ves"));
    }
    None
}

fn ves_to_f(word: &str) -> Option<String> {
    if !ends_with_ci(word, "ves") || ends_with_ci(word, "hives") {
        return None;
    }
    let head = &word[..word.len() - 3];
    let prev = head.chars().last()?;
    match prev.to_ascii_lowercase() {
        'l' | 'r' => Some(replace_suffix(word, 3, "f")),
        'i' => Some(replace_suffix(word, 3, "fe")),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Tests
