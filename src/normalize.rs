//! Name normalization.
//!
//! The normalized form is both the cache key and the query parameter sent to
//! the inference services, so two inputs that differ only in surrounding
//! whitespace or a lowercase initial share one cache entry.

/// Trim surrounding whitespace and uppercase a lowercase first character.
///
/// ```rust
/// use nameinfo::normalize::normalize;
///
/// assert_eq!(normalize(" bob "), "Bob");
/// assert_eq!(normalize("Alice"), "Alice");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    capitalize_first(raw.trim())
}

/// Uppercase the first character if it is lowercase; the rest is unchanged.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            let mut out = String::with_capacity(s.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_capitalizes() {
        assert_eq!(normalize(" bob "), "Bob");
        assert_eq!(normalize("\tjacob\n"), "Jacob");
    }

    #[test]
    fn leaves_capitalized_alone() {
        assert_eq!(normalize("Alice"), "Alice");
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn keeps_rest_of_name() {
        assert_eq!(normalize("mcDonald"), "McDonald");
        assert_eq!(normalize("anne marie"), "Anne marie");
    }

    #[test]
    fn unicode_initial() {
        assert_eq!(normalize("élodie"), "Élodie");
        assert_eq!(normalize("ßtrasse"), "SStrasse");
    }

    #[test]
    fn non_letter_initial() {
        assert_eq!(normalize("1bob"), "1bob");
    }
}
