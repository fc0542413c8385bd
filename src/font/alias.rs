use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Common system families substituted by catalog-available families.
    /// Exact-match keys; applied once before decomposition, never chained.
    pub static ref TYPEFACE_ALIAS_MAP: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("Helvetica", "Roboto");
        m.insert("Times New Roman", "Tinos");
        m.insert("Arial", "Arimo");
        m.insert("Georgia", "Tinos");
        m.insert("Garamond", "EB Garamond");
        m.insert("Futura", "Raleway");
        m.insert("Comic Sans MS", "Comic Neue");
        m
    };
}

/// Substitute a requested family if an alias exists for it
pub fn apply_family_alias(family: &str) -> Option<&'static str> {
    TYPEFACE_ALIAS_MAP.get(family).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_is_exact_match_only() {
        assert_eq!(apply_family_alias("Helvetica"), Some("Roboto"));
        assert_eq!(apply_family_alias("helvetica"), None);
        assert_eq!(apply_family_alias("Helvetica Neue"), None);
    }

    #[test]
    fn aliases_are_never_chained() {
        // Tinos is a substitution target, never a key
        assert_eq!(apply_family_alias("Tinos"), None);
        assert_eq!(apply_family_alias("Roboto"), None);
    }
}
