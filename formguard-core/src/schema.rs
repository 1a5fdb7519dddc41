// formguard-core/src/schema.rs
//! A compiled, user-configurable set of field bindings.

use std::collections::HashMap;

use crate::rules::Rule;
use crate::sanitizers::Sanitizer;
use crate::source::RuleSource;

/// Rules and sanitizers for one field, ready to evaluate.
#[derive(Debug, Clone, Default)]
pub struct CompiledField {
    pub rules: Vec<Rule>,
    pub sanitizers: Vec<Sanitizer>,
}

/// The compiled form of a `SchemaConfig`.
///
/// Built by [`crate::rules::compiler::compile_schema`]; field order follows
/// the source config.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    order: Vec<String>,
    fields: HashMap<String, CompiledField>,
}

impl FormSchema {
    pub(crate) fn insert(&mut self, name: String, field: CompiledField) {
        if !self.fields.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.fields.insert(name, field);
    }

    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl RuleSource for FormSchema {
    fn rules_for(&self, field: &str) -> &[Rule] {
        self.fields.get(field).map(|f| f.rules.as_slice()).unwrap_or(&[])
    }

    fn sanitizers_for(&self, field: &str) -> &[Sanitizer] {
        self.fields.get(field).map(|f| f.sanitizers.as_slice()).unwrap_or(&[])
    }

    fn field_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }
}
