use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::{ActionLogDraft, NewActionLog};

pub const CONTEXT_MAX_LENGTH: usize = 255;

/// Field-level validation failures, keyed `field -> rule -> message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(BTreeMap<&'static str, BTreeMap<&'static str, String>>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, rule: &'static str, message: impl Into<String>) -> Self {
        let mut violations = Self::new();
        violations.add(field, rule, message);
        violations
    }

    pub fn add(&mut self, field: &'static str, rule: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().insert(rule, message.into());
    }

    pub fn merge(&mut self, other: Violations) {
        for (field, rules) in other.0 {
            self.0.entry(field).or_default().extend(rules);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn has_rule(&self, field: &str, rule: &str) -> bool {
        self.0.get(field).is_some_and(|rules| rules.contains_key(rule))
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, rules) in &self.0 {
            for message in rules.values() {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Check a draft against the action log rules. On success the draft is turned
/// into a record ready for insertion; a missing id gets a time-ordered one.
pub fn validate(draft: &ActionLogDraft) -> Result<NewActionLog, Violations> {
    let mut violations = check_without_action(draft);

    match draft.action_id {
        None => violations.add("action_id", "_required", "An action_id is required"),
        Some(id) if id.is_nil() => violations.add("action_id", "uuid", "action_id should be a uuid"),
        Some(_) => {}
    }

    let (Some(user_id), Some(action_id), Some(context), Some(status)) = (
        draft.user_id,
        draft.action_id,
        draft.context.as_ref(),
        draft.status,
    ) else {
        return Err(violations);
    };
    violations.into_result()?;

    Ok(NewActionLog {
        id: draft.id.unwrap_or_else(Uuid::now_v7),
        user_id,
        action_id,
        context: context.clone(),
        status,
    })
}

/// Every rule that does not depend on the resolved action type, so it can run
/// before storage is touched.
pub fn check_without_action(draft: &ActionLogDraft) -> Violations {
    let mut violations = Violations::new();

    if draft.id.is_some_and(|id| id.is_nil()) {
        violations.add("id", "uuid", "id should be a uuid");
    }

    match draft.user_id {
        None => violations.add("user_id", "_required", "A user_id is required"),
        Some(id) if id.is_nil() => violations.add("user_id", "_empty", "user_id should not be empty"),
        Some(_) => {}
    }

    match draft.context.as_deref() {
        None => violations.add("context", "_required", "A context is required"),
        Some(context) => violations.merge(check_context(context)),
    }

    if draft.status.is_none() {
        violations.add("status", "_required", "A status is required");
    }

    violations
}

fn check_context(context: &str) -> Violations {
    let mut violations = Violations::new();
    // NUL is ASCII but cannot be stored in a text column.
    if !context.is_ascii() || context.contains('\0') {
        violations.add("context", "ascii", "context should be ascii");
    }
    if context.len() > CONTEXT_MAX_LENGTH {
        violations.add(
            "context",
            "maxLength",
            format!("context should not exceed {CONTEXT_MAX_LENGTH} characters"),
        );
    }
    violations
}

/// Parse an optional textual uuid. Blank input counts as absent.
pub fn parse_uuid(
    field: &'static str,
    raw: Option<&str>,
    violations: &mut Violations,
) -> Option<Uuid> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match Uuid::parse_str(raw) {
        Ok(id) if !id.is_nil() => Some(id),
        _ => {
            violations.add(field, "uuid", format!("{field} should be a uuid"));
            None
        }
    }
}

/// Accepts `true`/`false`, `1`/`0` and their string forms.
pub fn parse_boolean(
    field: &'static str,
    raw: Option<&Value>,
    violations: &mut Violations,
) -> Option<bool> {
    let parsed = match raw? {
        Value::Null => return None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    };
    if parsed.is_none() {
        violations.add(field, "boolean", format!("{field} should be boolean"));
    }
    parsed
}
