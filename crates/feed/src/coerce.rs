// ABOUTME: Lenient text-to-value coercion for element and attribute content.
// ABOUTME: Failed coercion yields None so the field is treated as absent.

/// Parses a yes/no style flag. Case-insensitive "yes"/"true" and "no"/"false";
/// anything else is None.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "yes" | "true" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

/// Strict flag conversion used for guid `isPermaLink`: only "true"
/// (case-insensitive) is true, every other value is false.
pub fn parse_strict_bool(s: &str) -> bool {
    s.eq_ignore_ascii_case("true")
}

/// Base-10 32-bit integer; surrounding whitespace is ignored.
pub fn parse_int(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

/// Base-10 64-bit integer; surrounding whitespace is ignored.
pub fn parse_long(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("clean"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_parse_strict_bool() {
        assert!(parse_strict_bool("true"));
        assert!(parse_strict_bool("True"));
        assert!(!parse_strict_bool("yes"));
        assert!(!parse_strict_bool("false"));
        assert!(!parse_strict_bool(""));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("60"), Some(60));
        assert_eq!(parse_int(" 7\n"), Some(7));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int("2147483648"), None);
    }

    #[test]
    fn test_parse_long() {
        assert_eq!(parse_long("12345"), Some(12345));
        assert_eq!(parse_long("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_long("9223372036854775808"), None);
        assert_eq!(parse_long("abc"), None);
    }
}
