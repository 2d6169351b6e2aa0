/// Canonicalize an element symbol: "h" -> "H", "he" -> "He", " nA " -> "Na".
///
/// Anything else is passed through in the same shape (first char upper,
/// rest lower), so lookups of garbage simply miss.
pub fn normalize_symbol(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.extend(chars.flat_map(char::to_lowercase));
            out
        }
    }
}

/// Order-independent key for a reactant pair.
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    let a = normalize_symbol(a);
    let b = normalize_symbol(b);
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters_upper() {
        assert_eq!(normalize_symbol("h"), "H");
        assert_eq!(normalize_symbol("O"), "O");
    }

    #[test]
    fn two_letters_title_case() {
        assert_eq!(normalize_symbol("he"), "He");
        assert_eq!(normalize_symbol("NA"), "Na");
        assert_eq!(normalize_symbol("  cL "), "Cl");
    }

    #[test]
    fn empty_passes_through() {
        assert_eq!(normalize_symbol("   "), "");
    }

    #[test]
    fn pair_key_is_symmetric() {
        assert_eq!(pair_key("He", "h"), pair_key("H", "he"));
        assert_eq!(pair_key("c", "HE"), ("C".to_string(), "He".to_string()));
    }
}
