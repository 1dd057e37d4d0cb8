//! Text normalization helpers
//!
//! Language names are compared case-insensitively. The comparison key is the
//! full Unicode lowercase form, so "Русский" and "русский" collide even
//! though SQLite's own `LOWER()` only folds ASCII.

/// Capitalize a value: first character uppercase, the rest lowercase
///
/// # Examples
/// ```
/// use lexi_common::text::capitalize;
///
/// assert_eq!(capitalize("bus"), "Bus");
/// assert_eq!(capitalize("ENGLISH"), "English");
/// assert_eq!(capitalize("автобус"), "Автобус");
/// ```
pub fn capitalize(value: &str) -> String {
    let Some(first) = value.chars().next() else {
        return String::new();
    };

    // Lowercase the whole value so context rules (final sigma) match `name_key`
    let lower = value.to_lowercase();
    let first_lower_len: usize = first.to_lowercase().map(char::len_utf8).sum();

    let mut out: String = first.to_uppercase().collect();
    out.push_str(lower.get(first_lower_len..).unwrap_or_default());
    out
}

/// Case-insensitive lookup key for a language name
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_ascii() {
        assert_eq!(capitalize("big red"), "Big red");
        assert_eq!(capitalize("A VEHICLE"), "A vehicle");
    }

    #[test]
    fn test_capitalize_cyrillic() {
        assert_eq!(capitalize("русский"), "Русский");
        assert_eq!(capitalize("АВТОБУС"), "Автобус");
    }

    #[test]
    fn test_capitalize_greek_final_sigma() {
        assert_eq!(capitalize("ΑΓΓΛΙΚΟΣ"), "Αγγλικος");
        assert_eq!(capitalize("ΑΣ"), "Ας");
        assert_eq!(name_key(&capitalize("ΑΓΓΛΙΚΟΣ")), name_key("ΑΓΓΛΙΚΟΣ"));
    }

    #[test]
    fn test_capitalize_empty() {
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_capitalize_single_char() {
        assert_eq!(capitalize("x"), "X");
    }

    #[test]
    fn test_name_key_folds_case_and_whitespace() {
        assert_eq!(name_key("  English "), "english");
        assert_eq!(name_key("РУССКИЙ"), name_key("русский"));
    }
}
