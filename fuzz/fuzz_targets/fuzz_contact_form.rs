//! Fuzz target: contact form validation
//!
//! Splits the input into four fields on `\0` and verifies:
//! - No panics on arbitrary UTF-8 (multi-byte whitespace included)
//! - An accepted form has four non-empty, already-trimmed fields
//! - An accepted email passes `is_valid_email` on its own
//!
//! cargo fuzz run fuzz_contact_form

#![no_main]

use folio::widgets::form::{ContactForm, ValidationError, is_valid_email};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut fields = text.splitn(4, '\0');
    let mut next = || fields.next().unwrap_or("");
    let raw = ContactForm::new(next(), next(), next(), next());

    match raw.validate() {
        Ok(form) => {
            for field in [&form.name, &form.email, &form.subject, &form.message] {
                assert!(!field.is_empty());
                assert_eq!(field.trim(), field.as_str());
            }
            assert!(is_valid_email(&form.email));
            assert_eq!(form, raw.trimmed());
        }
        Err(ValidationError::MissingFields) => {
            let t = raw.trimmed();
            assert!(
                t.name.is_empty() || t.email.is_empty() || t.subject.is_empty() || t.message.is_empty()
            );
        }
        Err(ValidationError::InvalidEmail) => {
            assert!(!is_valid_email(raw.email.trim()));
        }
    }
});
