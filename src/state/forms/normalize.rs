//! Input normalizers applied before a value is stored

/// Digits a mobile number keeps (010-1234-5678)
pub const PHONE_MAX_DIGITS: usize = 11;

/// Digits a business registration number keeps (123-45-67890)
pub const BUSINESS_NUMBER_MAX_DIGITS: usize = 10;

/// Strip everything that is not an ASCII digit
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Group digits as 3-4-4 while they are typed
pub fn format_phone_number(value: &str) -> String {
    group_digits(value, &[3, 4], PHONE_MAX_DIGITS)
}

/// Group digits as 3-2-5 while they are typed
pub fn format_business_number(value: &str) -> String {
    group_digits(value, &[3, 2], BUSINESS_NUMBER_MAX_DIGITS)
}

/// Cut `value` to at most `max` characters (not bytes)
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

/// Insert a separator after each leading group once the digits run past it.
///
/// The tail after the last fixed group takes whatever is left up to `max_digits`.
fn group_digits(value: &str, groups: &[usize], max_digits: usize) -> String {
    let mut digits = digits_only(value);
    digits.truncate(max_digits);

    let mut out = String::with_capacity(digits.len() + groups.len());
    let mut rest = digits.as_str();
    for &size in groups {
        if rest.len() <= size {
            break;
        }
        let (head, tail) = rest.split_at(size);
        out.push_str(head);
        out.push('-');
        rest = tail;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    mod phone {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_keystroke_sequence() {
            let full = "01012345678";
            let expected = [
                "0",
                "01",
                "010",
                "010-1",
                "010-12",
                "010-123",
                "010-1234",
                "010-1234-5",
                "010-1234-56",
                "010-1234-567",
                "010-1234-5678",
            ];
            for (len, want) in (1..=full.len()).zip(expected) {
                assert_eq!(format_phone_number(&full[..len]), want);
            }
        }

        #[test]
        fn test_strips_non_digits() {
            assert_eq!(format_phone_number("(010) 1234-5678"), "010-1234-5678");
        }

        #[test]
        fn test_extra_digits_dropped() {
            assert_eq!(format_phone_number("0101234567899"), "010-1234-5678");
        }

        #[test]
        fn test_reformatting_is_stable() {
            let once = format_phone_number("01012345678");
            assert_eq!(format_phone_number(&once), once);
        }

        #[test]
        fn test_ten_digit_number() {
            assert_eq!(format_phone_number("0212345678"), "021-2345-678");
        }

        #[test]
        fn test_empty() {
            assert_eq!(format_phone_number(""), "");
            assert_eq!(format_phone_number("abc"), "");
        }

        #[test]
        fn test_backspace_over_separator_collapses() {
            assert_eq!(format_phone_number("010-"), "010");
        }
    }

    mod business_number {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_partial_grouping() {
            assert_eq!(format_business_number("123"), "123");
            assert_eq!(format_business_number("1234"), "123-4");
            assert_eq!(format_business_number("12345"), "123-45");
            assert_eq!(format_business_number("123456"), "123-45-6");
        }

        #[test]
        fn test_full_number() {
            assert_eq!(format_business_number("1234567890"), "123-45-67890");
            assert_eq!(format_business_number("123-45-678901"), "123-45-67890");
        }
    }

    mod truncate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_counts_characters_not_bytes() {
            assert_eq!(truncate_chars("상담신청", 2), "상담");
        }

        #[test]
        fn test_short_value_untouched() {
            assert_eq!(truncate_chars("abc", 600), "abc");
            assert_eq!(truncate_chars("", 0), "");
        }

        #[test]
        fn test_exact_length_untouched() {
            assert_eq!(truncate_chars("abc", 3), "abc");
        }
    }
}
