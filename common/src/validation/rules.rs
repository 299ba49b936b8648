use validator::ValidateEmail;

use super::phone::PhoneNumberCheck;

/// One predicate + message pair of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must not be empty.
    Required { message: &'static str },
    /// Value must have at least `min` characters.
    MinLength { min: usize, message: &'static str },
    /// Value must be exactly one of `allowed`.
    OneOf {
        allowed: &'static [&'static str],
        message: &'static str,
    },
    /// Value must pass the schema's [`PhoneNumberCheck`].
    MobilePhone { message: &'static str },
    /// Value must be a syntactically valid email address with a dotted
    /// domain.
    Email { message: &'static str },
}

impl Rule {
    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::OneOf { message, .. }
            | Rule::MobilePhone { message }
            | Rule::Email { message } => message,
        }
    }

    pub fn passes(&self, value: &str, phone: &dyn PhoneNumberCheck) -> bool {
        match self {
            Rule::Required { .. } => !value.is_empty(),
            Rule::MinLength { min, .. } => value.chars().count() >= *min,
            Rule::OneOf { allowed, .. } => allowed.contains(&value),
            Rule::MobilePhone { .. } => phone.is_mobile_phone(value),
            Rule::Email { .. } => value.validate_email() && has_dotted_domain(value),
        }
    }
}

/// `validator` accepts bare hosts such as `john@uni`; registrations need a
/// domain with at least one inner dot.
fn has_dotted_domain(value: &str) -> bool {
    value.rsplit_once('@').is_some_and(|(_, domain)| {
        domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    })
}

/// Ordered rules of one field, evaluated first-failing-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    /// Optional fields skip every rule while empty.
    pub optional: bool,
    pub rules: &'static [Rule],
}

impl FieldRules {
    pub const fn required(rules: &'static [Rule]) -> Self {
        Self {
            optional: false,
            rules,
        }
    }

    pub const fn optional(rules: &'static [Rule]) -> Self {
        Self {
            optional: true,
            rules,
        }
    }

    /// Message of the first failing rule, if any.
    pub fn check(&self, value: &str, phone: &dyn PhoneNumberCheck) -> Option<&'static str> {
        if self.optional && value.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| !rule.passes(value, phone))
            .map(Rule::message)
    }
}
