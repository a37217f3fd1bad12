//! Text normalization helpers shared by the cleaners.

/// First run of ASCII digits, as capture group 1
pub const DIGIT_RUN: &str = r"([0-9]+)";

/// First run of ASCII letters, as capture group 1
pub const LETTER_RUN: &str = r"([a-zA-Z]+)";

/// Title-case a string: a cased letter following an uncased character is
/// upper-cased, every other cased letter lower-cased.
///
/// Letters without case (CJK, for instance) are kept as they are and end
/// the current word.
///
/// # Examples
///
/// ```
/// use catalog_etl::parsing::text::title_case;
///
/// assert_eq!(title_case("united states, india"), "United States, India");
/// assert_eq!(title_case("TV SHOW"), "Tv Show");
/// assert_eq!(title_case("3d movie"), "3D Movie");
/// ```
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_cased = false;
    for ch in input.chars() {
        if ch.is_uppercase() || ch.is_lowercase() {
            if previous_is_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_cased = true;
        } else {
            out.push(ch);
            previous_is_cased = false;
        }
    }
    out
}

/// First comma-separated component, trimmed.
pub fn first_component(input: &str) -> &str {
    input.split(',').next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_matches_python_semantics() {
        assert_eq!(title_case("movie"), "Movie");
        assert_eq!(title_case("  tv show "), "  Tv Show ");
        assert_eq!(title_case("côte d'ivoire"), "Côte D'Ivoire");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_uncased_letters_end_words() {
        assert_eq!(title_case("日本abc"), "日本Abc");
        assert_eq!(title_case("日本 tv"), "日本 Tv");
    }

    #[test]
    fn test_first_component() {
        assert_eq!(first_component("United States, India"), "United States");
        assert_eq!(first_component(", France"), "");
        assert_eq!(first_component(" Japan "), "Japan");
    }
}
