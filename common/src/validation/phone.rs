//! Mobile phone number check used by the `phone_number` rule.

use std::sync::LazyLock;

use regex::RegexSet;

/// Predicate deciding whether a string is a usable mobile phone number.
///
/// The schema only knows this trait; swap the implementation with
/// [`super::RegistrationSchema::with_phone_check`].
pub trait PhoneNumberCheck {
    fn is_mobile_phone(&self, value: &str) -> bool;
}

impl<F> PhoneNumberCheck for F
where
    F: Fn(&str) -> bool,
{
    fn is_mobile_phone(&self, value: &str) -> bool {
        self(value)
    }
}

static MOBILE_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // Nigeria: 0803..., 234803..., +234803...
        r"^(\+?234|0)?[789]\d{9}$",
        // United States / Canada, with optional separators.
        r"^((\+1|1)?( |-)?)?(\([2-9][0-9]{2}\)|[2-9][0-9]{2})( |-)?([2-9][0-9]{2}( |-)?[0-9]{4})$",
        // United Kingdom.
        r"^(\+?44|0)7\d{9}$",
        // Anything in E.164 form.
        r"^\+[1-9]\d{7,14}$",
    ])
    .unwrap()
});

/// Default check: matches the mobile formats of the locales the form serves.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilePhonePatterns;

impl PhoneNumberCheck for MobilePhonePatterns {
    fn is_mobile_phone(&self, value: &str) -> bool {
        MOBILE_PATTERNS.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_mobile_formats() {
        let check = MobilePhonePatterns;
        for number in [
            "08031234567",
            "+2348031234567",
            "2349031234567",
            "(234) 523-4567",
            "+1 234-523-4567",
            "07911123456",
            "+447911123456",
            "+33612345678",
        ] {
            assert!(check.is_mobile_phone(number), "{number} should be valid");
        }
    }

    #[test]
    fn rejects_garbage() {
        let check = MobilePhonePatterns;
        for number in ["", "abc", "1234", "0803123456", "+0 123", "08031234567x"] {
            assert!(!check.is_mobile_phone(number), "{number} should be invalid");
        }
    }

    #[test]
    fn closures_are_checks() {
        let only_zeros = |value: &str| value.chars().all(|c| c == '0');
        assert!(only_zeros.is_mobile_phone("000"));
        assert!(!only_zeros.is_mobile_phone("010"));
    }
}
