use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating email addresses (`local@domain.tld` shape)
    /// - Valid: "adjutant@example.org", "first.last@unit.example.com"
    /// - Invalid: "no-at-sign", "two@@signs", "spaces in@local.part"
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Regex for validating squadron numbers (digits only)
    pub static ref SQUADRON_NUMBER_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Check whether a district number belongs to the valid set.
///
/// Districts run 1 through 17; district 10 is a reserved value that was never
/// chartered and is excluded from the list.
pub fn is_valid_district(district: u8) -> bool {
    (1..=17).contains(&district) && district != 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_regex_valid() {
        assert!(EMAIL_REGEX.is_match("adjutant@example.org"));
        assert!(EMAIL_REGEX.is_match("first.last@unit.example.com"));
        assert!(EMAIL_REGEX.is_match("a@b.co"));
    }

    #[test]
    fn test_email_regex_invalid() {
        assert!(!EMAIL_REGEX.is_match("no-at-sign"));
        assert!(!EMAIL_REGEX.is_match("missing@tld"));
        assert!(!EMAIL_REGEX.is_match("spaces in@local.part"));
        assert!(!EMAIL_REGEX.is_match("@example.org"));
        assert!(!EMAIL_REGEX.is_match(""));
    }

    #[test]
    fn test_squadron_number_regex() {
        assert!(SQUADRON_NUMBER_REGEX.is_match("42"));
        assert!(SQUADRON_NUMBER_REGEX.is_match("0163"));
        assert!(!SQUADRON_NUMBER_REGEX.is_match("42A"));
        assert!(!SQUADRON_NUMBER_REGEX.is_match("4 2"));
        assert!(!SQUADRON_NUMBER_REGEX.is_match(""));
    }

    #[test]
    fn test_district_set() {
        assert!(is_valid_district(1));
        assert!(is_valid_district(9));
        assert!(is_valid_district(11));
        assert!(is_valid_district(17));
        assert!(!is_valid_district(0));
        assert!(!is_valid_district(10));
        assert!(!is_valid_district(18));
    }
}
