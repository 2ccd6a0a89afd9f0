//! Text sanitizer and format validators.
//!
//! All functions here are pure. `None` is the absence marker for optional
//! fields and is never conflated with an empty string.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{RecordsError, RecordsResult};

/// Default truncation limit for free text, in code points.
pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Smallest configurable limit; the longest generated ID (`DR-NNNNNN-NNNNNN`)
/// fits within it.
pub const MIN_MAX_LENGTH: usize = 16;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("valid email pattern"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{7,15}$").expect("valid phone pattern"));

/// Trim and truncate to [`DEFAULT_MAX_LENGTH`] code points.
pub fn sanitize(text: Option<&str>) -> Option<String> {
    sanitize_with_limit(text, DEFAULT_MAX_LENGTH)
}

/// Trim and truncate to `max_length` code points.
///
/// Trailing whitespace exposed by the cut is trimmed as well, so the
/// function stays idempotent.
pub fn sanitize_with_limit(text: Option<&str>, max_length: usize) -> Option<String> {
    let trimmed = text?.trim();
    if trimmed.chars().count() <= max_length {
        return Some(trimmed.to_string());
    }
    let cut: String = trimmed.chars().take(max_length).collect();
    Some(cut.trim_end().to_string())
}

/// Syntactic `local@domain.tld` check. Absent is valid.
pub fn validate_email(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(email) => EMAIL_RE.is_match(email),
    }
}

/// Optional `+` then 7 to 15 digits. Absent or blank is valid.
pub fn validate_phone(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => true,
        Some(phone) => PHONE_RE.is_match(phone),
    }
}

/// `<prefix>-NN-NNNNNN`. Absent is invalid.
///
/// This is the documented ID shape, not the one generators emit; stored IDs
/// are matched with [`crate::ids::is_generated_id`] and targets are checked by
/// existence.
pub fn validate_id_format(value: Option<&str>, prefix: &str) -> bool {
    let Some(id) = value else {
        return false;
    };
    let pattern = format!(r"^{}-\d{{2}}-\d{{6}}$", regex::escape(prefix));
    Regex::new(&pattern)
        .map(|re| re.is_match(id.trim()))
        .unwrap_or(false)
}

/// Sanitization rules applied by services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRules {
    pub max_length: usize,
}

impl Default for TextRules {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl TextRules {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Sanitized text; blank stays blank.
    pub fn text(&self, value: &str) -> String {
        sanitize_with_limit(Some(value), self.max_length).unwrap_or_default()
    }

    /// Sanitized record ID. Always cut at [`DEFAULT_MAX_LENGTH`], never at the
    /// configured limit, so a typed ID is compared whole.
    pub fn id(&self, value: &str) -> String {
        sanitize(Some(value)).unwrap_or_default()
    }

    /// Sanitized optional record ID; blank becomes the absence marker.
    pub fn optional_id(&self, value: &str) -> Option<String> {
        Some(self.id(value)).filter(|s| !s.is_empty())
    }

    /// Sanitized optional text; blank becomes the absence marker.
    pub fn optional(&self, value: &str) -> Option<String> {
        sanitize_with_limit(Some(value), self.max_length).filter(|s| !s.is_empty())
    }

    /// Sanitized required text.
    pub fn required(&self, field: &'static str, value: &str) -> RecordsResult<String> {
        self.optional(value).ok_or(RecordsError::MissingField(field))
    }

    /// Sanitized optional email, validated when present.
    pub fn email(&self, field: &'static str, value: &str) -> RecordsResult<Option<String>> {
        let email = self.optional(value);
        if validate_email(email.as_deref()) {
            Ok(email)
        } else {
            Err(RecordsError::InvalidFormat { field })
        }
    }

    /// Sanitized phone number, validated when present.
    pub fn phone(&self, field: &'static str, value: &str) -> RecordsResult<String> {
        let phone = self.text(value);
        if validate_phone(Some(&phone)) {
            Ok(phone)
        } else {
            Err(RecordsError::InvalidFormat { field })
        }
    }

    /// Sanitized optional phone number; blank becomes the absence marker.
    pub fn optional_phone(
        &self,
        field: &'static str,
        value: &str,
    ) -> RecordsResult<Option<String>> {
        let phone = self.optional(value);
        if validate_phone(phone.as_deref()) {
            Ok(phone)
        } else {
            Err(RecordsError::InvalidFormat { field })
        }
    }
}

/// Reject a bounded number outside `min..=max`.
pub fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> RecordsResult<u32> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(RecordsError::OutOfRange { field, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize_absent() {
        assert_eq!(sanitize(None), None);
    }

    #[test]
    fn test_sanitize_trims() {
        assert_eq!(sanitize(Some("  Cardiology \n")), Some("Cardiology".into()));
        assert_eq!(sanitize(Some("   ")), Some(String::new()));
    }

    #[test]
    fn test_sanitize_truncates_code_points() {
        let long = "é".repeat(300);
        let out = sanitize(Some(&long)).unwrap();
        assert_eq!(out.chars().count(), 255);

        assert_eq!(sanitize_with_limit(Some("abcdef"), 3), Some("abc".into()));
    }

    #[test]
    fn test_sanitize_cut_on_whitespace_stays_idempotent() {
        let out = sanitize_with_limit(Some("abc   def"), 5).unwrap();
        assert_eq!(out, "abc");
        assert_eq!(sanitize_with_limit(Some(&out), 5).unwrap(), out);
    }

    #[test]
    fn test_sanitize_whitespace_cut_drops_trailing_spaces() {
        // A plain prefix cut would keep 254 spaces after "a" and change again
        // on a second pass.
        let text = format!("a{}b", " ".repeat(300));
        let out = sanitize(Some(&text)).unwrap();
        assert_eq!(out, "a");
        assert_eq!(sanitize(Some(&out)), Some(out.clone()));
    }

    #[test]
    fn test_ids_ignore_configured_limit() {
        let rules = TextRules::new(MIN_MAX_LENGTH);
        assert_eq!(rules.text(" Department of medicine "), "Department of me");
        assert_eq!(rules.id(" DR-153009-240101 "), "DR-153009-240101");

        let tight = TextRules::new(4);
        assert_eq!(tight.id("D-153009-240101"), "D-153009-240101");
        assert_eq!(tight.optional_id("   "), None);
        assert_eq!(tight.optional_id(" T-1 "), Some("T-1".into()));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email(None));
        assert!(validate_email(Some("a@b.co")));
        assert!(validate_email(Some("first.last-x@mail.example.org")));
        assert!(!validate_email(Some("not-an-email")));
        assert!(!validate_email(Some("a@b")));
        assert!(!validate_email(Some("a b@c.de")));
        assert!(!validate_email(Some("")));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone(None));
        assert!(validate_phone(Some("")));
        assert!(validate_phone(Some("   ")));
        assert!(validate_phone(Some("+911234567890")));
        assert!(validate_phone(Some(" 1234567 ")));
        assert!(!validate_phone(Some("123")));
        assert!(!validate_phone(Some("12345678901234567")));
        assert!(!validate_phone(Some("12-345-6789")));
        assert!(!validate_phone(Some("++1234567")));
    }

    #[test]
    fn test_validate_id_format() {
        assert!(validate_id_format(Some("D-12-240101"), "D"));
        assert!(validate_id_format(Some(" D-12-240101 "), "D"));
        assert!(!validate_id_format(Some("D-1-240101"), "D"));
        assert!(!validate_id_format(Some("DR-12-240101"), "D"));
        assert!(!validate_id_format(None, "D"));
        assert!(validate_id_format(Some("DR-99-000000"), "DR"));
    }

    #[test]
    fn test_text_rules_optional_is_absence_marker() {
        let rules = TextRules::default();
        assert_eq!(rules.optional("  "), None);
        assert_eq!(rules.optional(" x "), Some("x".into()));
        assert_eq!(rules.text("  "), "");
    }

    #[test]
    fn test_text_rules_required() {
        let rules = TextRules::default();
        assert!(matches!(
            rules.required("Name", " "),
            Err(RecordsError::MissingField("Name"))
        ));
        assert_eq!(rules.required("Name", " Ana ").unwrap(), "Ana");
    }

    #[test]
    fn test_text_rules_contact_fields() {
        let rules = TextRules::default();
        assert_eq!(rules.email("email", "").unwrap(), None);
        assert!(rules.email("email", "nope").is_err());
        assert_eq!(rules.optional_phone("phone", " ").unwrap(), None);
        assert!(rules.phone("phone", "12").is_err());
        assert_eq!(rules.phone("phone", "").unwrap(), "");
    }

    #[test]
    fn test_check_range() {
        assert_eq!(check_range("cost", 10, 0, 10).unwrap(), 10);
        assert!(matches!(
            check_range("cost", 11, 0, 10),
            Err(RecordsError::OutOfRange { max: 10, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_sanitize_short_equals_trim(s in "\\PC{0,255}") {
            prop_assert_eq!(sanitize(Some(&s)), Some(s.trim().to_string()));
        }

        #[test]
        fn prop_sanitize_long_equals_trimmed_prefix(s in "[a-zA-Z0-9]{256,400}") {
            let expected: String = s.chars().take(255).collect();
            prop_assert_eq!(sanitize(Some(&s)), Some(expected));
        }

        #[test]
        fn prop_sanitize_idempotent(s in "\\PC{0,400}") {
            let once = sanitize(Some(&s));
            let twice = sanitize(once.as_deref());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_phone_digit_lengths(n in 1usize..20) {
            let phone = "9".repeat(n);
            prop_assert_eq!(validate_phone(Some(&phone)), (7..=15).contains(&n));
        }
    }
}
