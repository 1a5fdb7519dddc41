// formguard-core/src/source.rs
//! Defines the `RuleSource` trait: where field and form validation look up
//! the rules and sanitizers for a field name.
//!
//! The trait decouples the validators from where bindings come from, so the
//! compiled-in contact-form rules and a schema loaded from YAML can be used
//! interchangeably.
//!
//! License: MIT OR APACHE 2.0

use crate::field::Field;
use crate::rules::Rule;
use crate::sanitizers::Sanitizer;

pub trait RuleSource: Send + Sync {
    /// Rules bound to `field`, in evaluation order. Unknown fields have none.
    fn rules_for(&self, field: &str) -> &[Rule];

    /// Sanitizers applied to `field` before validation, in order.
    fn sanitizers_for(&self, _field: &str) -> &[Sanitizer] {
        &[]
    }

    /// Names of every field this source has bindings for.
    fn field_names(&self) -> Vec<&str>;
}

/// The compiled-in contact-form bindings.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinRules;

impl RuleSource for BuiltinRules {
    fn rules_for(&self, field: &str) -> &[Rule] {
        Field::from_name(field).map(|f| f.rules()).unwrap_or(&[])
    }

    fn sanitizers_for(&self, field: &str) -> &[Sanitizer] {
        Field::from_name(field).map(|f| f.default_sanitizers()).unwrap_or(&[])
    }

    fn field_names(&self) -> Vec<&str> {
        Field::ALL.iter().map(|f| f.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_lookup() {
        assert_eq!(BuiltinRules.rules_for("email").len(), 2);
        assert_eq!(BuiltinRules.rules_for("firstName").len(), 3);
        assert!(BuiltinRules.rules_for("unknown").is_empty());
        assert!(BuiltinRules.sanitizers_for("unknown").is_empty());
        assert_eq!(BuiltinRules.sanitizers_for("notes"), &[Sanitizer::Html]);
        assert_eq!(BuiltinRules.field_names().len(), Field::ALL.len());
    }
}
