use lazy_static::lazy_static;
use regex::Regex;

use super::alias::apply_family_alias;
use super::catalog::FontCatalog;
use super::weight::is_equal_weight;
use crate::models::{FontDescriptor, FontQuery};

lazy_static! {
    static ref CAPITAL_BOUNDARY: Regex = Regex::new(r"([A-Z])").unwrap();
}

/// Split a concatenated multi-word family name on internal capitals and
/// return all consecutive-token prefixes, longest first.
///
/// "TimesNewRoman" yields ["Times New Roman", "Times New", "Times"].
/// Single-token input yields an empty sequence; the resolver skips the
/// decomposition phase entirely in that case.
pub fn pascal_case_to_array(family: &str) -> Vec<String> {
    let spaced = CAPITAL_BOUNDARY.replace_all(family, " $1");
    let words: Vec<&str> = spaced.trim().split_whitespace().collect();
    if words.len() < 2 {
        return Vec::new();
    }
    (1..=words.len())
        .rev()
        .map(|i| words[..i].join(" "))
        .collect()
}

fn matches(descriptor: &FontDescriptor, family: &str, query: &FontQuery) -> bool {
    let family_match = descriptor.family == family;
    let style_match = match &query.style {
        None => true,
        Some(style) => style.eq_ignore_ascii_case(descriptor.style.as_str()),
    };
    let weight_match = match &query.weight {
        None => true,
        Some(weight) => is_equal_weight(weight, descriptor.weight),
    };
    family_match && style_match && weight_match
}

/// Resolve a requested font against the catalog.
///
/// Applies the typeface alias map, attempts a direct match, then retries
/// against each pascal-case prefix of the family. Returns None when
/// nothing matches; never errors, so callers can run their own fallback
/// chain.
pub fn resolve<'a>(catalog: &'a FontCatalog, query: &FontQuery) -> Option<&'a FontDescriptor> {
    log::debug!(
        "resolving font: family={}, style={:?}, weight={:?}",
        query.family,
        query.style,
        query.weight
    );

    let mut family = query.family.as_str();
    if let Some(substitute) = apply_family_alias(family) {
        log::info!("using family alias: {} -> {}", family, substitute);
        family = substitute;
    }

    if let Some(found) = catalog.iter().find(|f| matches(f, family, query)) {
        return Some(found);
    }

    for candidate in pascal_case_to_array(family) {
        if let Some(found) = catalog.iter().find(|f| matches(f, &candidate, query)) {
            log::debug!("font found via decomposition: {}", candidate);
            return Some(found);
        }
    }

    log::debug!("no font found for {}", query.family);
    None
}
