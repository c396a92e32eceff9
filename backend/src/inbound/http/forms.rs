//! Explicit decoders from urlencoded form bodies to domain forms.
//!
//! Bodies are extracted as ordered key/value pairs and each form picks the
//! fields it knows. Missing text fields decode as empty strings so the
//! validator reports them; a missing or non-integer `expires` is a malformed
//! request.

use std::collections::HashMap;

use crate::domain::{Error, SnippetCreateForm, UserLoginForm, UserSignupForm};

/// Raw form fields keyed by name; the first occurrence of a name wins.
#[derive(Debug, Default)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Collect decoded pairs, ignoring repeated names after the first.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut fields = HashMap::with_capacity(pairs.len());
        for (name, value) in pairs {
            fields.entry(name).or_insert(value);
        }
        Self(fields)
    }

    fn text(&self, name: &str) -> String {
        self.0.get(name).cloned().unwrap_or_default()
    }

    fn integer(&self, name: &str) -> Result<i32, Error> {
        let raw = self
            .0
            .get(name)
            .ok_or_else(|| Error::invalid_request(format!("missing form field: {name}")))?;
        raw.trim()
            .parse()
            .map_err(|_| Error::invalid_request(format!("form field {name} must be an integer")))
    }
}

/// Decode the snippet creation form.
pub fn decode_snippet_create(fields: &FormFields) -> Result<SnippetCreateForm, Error> {
    Ok(SnippetCreateForm::new(
        fields.text("title"),
        fields.text("content"),
        fields.integer("expires")?,
    ))
}

/// Decode the signup form.
pub fn decode_signup(fields: &FormFields) -> UserSignupForm {
    UserSignupForm::new(
        fields.text("name"),
        fields.text("email"),
        fields.text("password"),
    )
}

/// Decode the login form.
pub fn decode_login(fields: &FormFields) -> UserLoginForm {
    UserLoginForm::new(fields.text("email"), fields.text("password"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::from_pairs(
            pairs
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
        )
    }

    #[rstest]
    fn snippet_form_reads_all_fields() {
        let form = decode_snippet_create(&fields(&[
            ("title", "O snail"),
            ("content", "Climb Mount Fuji"),
            ("expires", "7"),
        ]))
        .expect("well formed");

        assert_eq!(form.title, "O snail");
        assert_eq!(form.content, "Climb Mount Fuji");
        assert_eq!(form.expires, 7);
        assert!(form.validator.is_valid());
    }

    #[rstest]
    fn missing_text_fields_decode_as_empty() {
        let form = decode_snippet_create(&fields(&[("expires", "1")])).expect("well formed");
        assert_eq!(form.title, "");
        assert_eq!(form.content, "");
    }

    #[rstest]
    #[case(&[("title", "t"), ("content", "c")])]
    #[case(&[("title", "t"), ("content", "c"), ("expires", "seven")])]
    #[case(&[("title", "t"), ("content", "c"), ("expires", "")])]
    #[case(&[("title", "t"), ("content", "c"), ("expires", "99999999999")])]
    fn malformed_expires_is_a_bad_request(#[case] pairs: &[(&str, &str)]) {
        let err = decode_snippet_create(&fields(pairs)).expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn out_of_range_expiry_is_left_to_validation() {
        let form = decode_snippet_create(&fields(&[("expires", "30")])).expect("integer");
        assert_eq!(form.expires, 30);
    }

    #[rstest]
    fn first_occurrence_of_a_field_wins() {
        let form = decode_login(&fields(&[
            ("email", "first@example.com"),
            ("email", "second@example.com"),
        ]));
        assert_eq!(form.email, "first@example.com");
    }

    #[rstest]
    fn signup_form_ignores_unknown_fields() {
        let form = decode_signup(&fields(&[
            ("name", "Alice"),
            ("email", "alice@example.com"),
            ("password", "pa55word"),
            ("is_admin", "true"),
        ]));
        assert_eq!(form.name, "Alice");
        assert_eq!(form.to_registration().password(), "pa55word");
    }
}
