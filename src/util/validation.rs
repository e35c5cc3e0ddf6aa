//! Credential validation rules for the login form.
//!
//! DESIGN
//! ======
//! Rules are a static ordered table of `(field, predicate, message)`. For each
//! field the first failing rule wins, so "required" rules sit ahead of shape
//! rules. Validation is pure and runs before any network call.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::net::types::Credentials;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const MIN_PASSWORD_LEN: usize = 8;

/// WHATWG `input[type=email]` grammar.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("Invalid regex pattern for email address")
});

/// A login form input that can carry an inline error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Identifier,
    Secret,
}

impl Field {
    /// Form input name the error is rendered under.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Identifier => "email",
            Self::Secret => "password",
        }
    }

    fn value(self, credentials: &Credentials) -> &str {
        match self {
            Self::Identifier => &credentials.identifier,
            Self::Secret => &credentials.secret,
        }
    }
}

struct Rule {
    field: Field,
    check: fn(&str) -> bool,
    message: &'static str,
}

const RULES: &[Rule] = &[
    Rule { field: Field::Identifier, check: is_present, message: EMAIL_REQUIRED },
    Rule { field: Field::Identifier, check: is_email, message: EMAIL_INVALID },
    Rule { field: Field::Secret, check: is_present, message: PASSWORD_REQUIRED },
    Rule { field: Field::Secret, check: is_long_enough, message: PASSWORD_TOO_SHORT },
];

fn is_present(value: &str) -> bool {
    !value.is_empty()
}

fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Length in UTF-16 code units, as a browser string reports it.
fn is_long_enough(value: &str) -> bool {
    value.encode_utf16().count() >= MIN_PASSWORD_LEN
}

/// Field-keyed validation messages. Empty means the credentials are well-formed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Look up an error by form input name (`"email"`, `"password"`).
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(field, _)| field.name() == name)
            .map(|(_, message)| *message)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Check credentials against the rule table.
#[must_use]
pub fn validate(credentials: &Credentials) -> ValidationErrors {
    let mut errors = BTreeMap::new();
    for rule in RULES {
        if errors.contains_key(&rule.field) {
            continue;
        }
        if !(rule.check)(rule.field.value(credentials)) {
            errors.insert(rule.field, rule.message);
        }
    }
    ValidationErrors(errors)
}
