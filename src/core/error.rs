use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during invoice construction.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// A single business rule failed (fail-fast mode and leaf constructors).
    #[error("business rule violated: {0}")]
    Rule(RuleViolation),

    /// Several business rules failed (collect-all mode).
    #[error("{} business rules violated: {}", .0.len(), join_violations(.0))]
    Rules(Vec<RuleViolation>),

    /// Builder encountered a missing mandatory input.
    #[error("builder error: {0}")]
    Builder(String),
}

impl InvoiceError {
    /// All rule violations carried by this error (empty for builder errors).
    pub fn violations(&self) -> &[RuleViolation] {
        match self {
            Self::Rule(violation) => std::slice::from_ref(violation),
            Self::Rules(violations) => violations,
            Self::Builder(_) => &[],
        }
    }

    /// Rule identifier of the first violation, e.g. `"BR-CO-15"`.
    pub fn first_rule(&self) -> Option<&str> {
        self.violations().first().map(|v| v.rule.as_str())
    }

    /// Kind of the first violation.
    pub fn kind(&self) -> Option<ViolationKind> {
        self.violations().first().map(|v| v.kind)
    }

    /// True if any carried violation has the given rule identifier.
    pub fn has_rule(&self, rule: &str) -> bool {
        self.violations().iter().any(|v| v.rule == rule)
    }
}

impl From<RuleViolation> for InvoiceError {
    fn from(violation: RuleViolation) -> Self {
        Self::Rule(violation)
    }
}

fn join_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Class of invariant a [`RuleViolation`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    /// A leaf value fails its own format or range check.
    MalformedValue,
    /// An "A or B, or both" requirement is unmet.
    MissingRequiredAlternative,
    /// A cross-entity arithmetic identity does not hold after rounding.
    AmountMismatch,
    /// A VAT category rate, identifier or exclusivity requirement is violated.
    CategoryConstraintViolation,
    /// A cardinality requirement is unmet.
    StructuralViolation,
}

/// A single violated business rule with field path and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleViolation {
    /// Which class of invariant was broken.
    pub kind: ViolationKind,
    /// EN 16931 business rule ID (e.g. "BR-CO-15").
    pub rule: String,
    /// Dot-separated path to the offending business term (e.g. "totals.amount_due").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.field, self.message)
    }
}

impl RuleViolation {
    pub fn new(
        kind: ViolationKind,
        rule: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            rule: rule.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn malformed(
        rule: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ViolationKind::MalformedValue, rule, field, message)
    }

    pub fn missing_alternative(
        rule: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ViolationKind::MissingRequiredAlternative, rule, field, message)
    }

    pub fn amount_mismatch(
        rule: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ViolationKind::AmountMismatch, rule, field, message)
    }

    pub fn category(
        rule: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ViolationKind::CategoryConstraintViolation, rule, field, message)
    }

    pub fn structural(
        rule: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ViolationKind::StructuralViolation, rule, field, message)
    }
}

/// Fail with `violation` unless `condition` holds.
pub(crate) fn ensure(
    condition: bool,
    violation: impl FnOnce() -> RuleViolation,
) -> Result<(), InvoiceError> {
    if condition {
        Ok(())
    } else {
        Err(InvoiceError::Rule(violation()))
    }
}

/// Trimmed, non-empty text or a malformed-value failure.
pub(crate) fn non_empty(
    value: impl Into<String>,
    rule: &str,
    field: &str,
) -> Result<String, InvoiceError> {
    let value = value.into();
    ensure(!value.trim().is_empty(), || {
        RuleViolation::malformed(rule, field, "must not be empty")
    })?;
    Ok(value)
}

/// Drops blank optional text so "present" always means "non-empty".
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
