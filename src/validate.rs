use crate::prelude::*;
use crate::types::CalendarDate;
use std::fmt;

/// Whether a failing rule blocks submission or merely annotates the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Severity {
    #[display(fmt = "error")]
    Error,
    #[display(fmt = "warning")]
    Warning,
}

/// Tag identifying where a rule came from. The engine treats all kinds
/// identically at evaluation time except `Required`, which is consulted on
/// the empty-input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RuleKind {
    #[display(fmt = "required")]
    Required,
    #[display(fmt = "minDate")]
    MinDate,
    #[display(fmt = "maxDate")]
    MaxDate,
    #[display(fmt = "notAfter")]
    NotAfter,
    #[display(fmt = "notBefore")]
    NotBefore,
    #[display(fmt = "notWeekend")]
    NotWeekend,
    #[display(fmt = "custom")]
    Custom,
}

/// A declarative validation rule: a predicate over a parsed date plus the
/// message emitted when the predicate fails.
///
/// Rules are owned by the consuming form component; the engine only evaluates
/// them. How a host resolves its own rule-description format into predicates
/// is its business; the built-in constructors cover the shapes the
/// surrounding form components use.
pub struct Rule {
    kind: RuleKind,
    predicate: Box<dyn Fn(CalendarDate) -> bool>,
    message: String,
    severity: Severity,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// Creates a rule from an arbitrary predicate
    pub fn new(
        kind: RuleKind,
        predicate: impl Fn(CalendarDate) -> bool + 'static,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            predicate: Box::new(predicate),
            message: message.into(),
            severity,
        }
    }

    /// A value must be present. Satisfied trivially once a date exists; its
    /// message is emitted by [`validate_missing`] when the input was empty.
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Required, |_| true, message, Severity::Error)
    }

    /// The date must not precede `min`
    pub fn min_date(min: CalendarDate, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MinDate, move |date| date >= min, message, Severity::Error)
    }

    /// The date must not exceed `max`
    pub fn max_date(max: CalendarDate, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MaxDate, move |date| date <= max, message, Severity::Error)
    }

    /// The date must not fall after `reference`. The caller supplies the
    /// reference date (typically "today"); the engine has no clock.
    pub fn not_after(reference: CalendarDate, message: impl Into<String>) -> Self {
        Self::new(
            RuleKind::NotAfter,
            move |date| date <= reference,
            message,
            Severity::Error,
        )
    }

    /// The date must not fall before `reference`
    pub fn not_before(reference: CalendarDate, message: impl Into<String>) -> Self {
        Self::new(
            RuleKind::NotBefore,
            move |date| date >= reference,
            message,
            Severity::Error,
        )
    }

    /// The date must not fall on a Saturday or Sunday
    pub fn not_weekend(message: impl Into<String>) -> Self {
        Self::new(
            RuleKind::NotWeekend,
            |date| !date.is_weekend(),
            message,
            Severity::Error,
        )
    }

    /// A caller-supplied predicate
    pub fn custom(predicate: impl Fn(CalendarDate) -> bool + 'static, message: impl Into<String>) -> Self {
        Self::new(RuleKind::Custom, predicate, message, Severity::Error)
    }

    /// Downgrades this rule so a failure lands in `warnings` instead of
    /// `errors` and never blocks
    pub fn as_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn severity(&self) -> Severity {
        self.severity
    }
}

/// Accumulated validation outcome: human-readable messages, split by
/// severity, in evaluation order. Warnings never block; the caller decides
/// what any non-empty `errors` means for submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when no blocking error accumulated (warnings allowed)
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validates a parsed date: calendar correctness first, then every supplied
/// rule in list order.
///
/// Evaluation never short-circuits; all applicable messages accumulate, so a
/// single invalid date can carry several simultaneous errors and warnings in
/// a deterministic order.
pub fn validate(date: CalendarDate, rules: &[Rule]) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !date.is_calendar_valid() {
        report.errors.push(format!(
            "Invalid day {} for month {}-{:02}",
            date.day(),
            date.year(),
            date.month()
        ));
    }

    for rule in rules {
        if !(rule.predicate)(date) {
            let bucket = match rule.severity {
                Severity::Error => &mut report.errors,
                Severity::Warning => &mut report.warnings,
            };
            bucket.push(rule.message.clone());
        }
    }

    report
}

/// Validation path for an empty input: a `required` rule emits its message
/// without invoking any other rule (there is no date to evaluate them
/// against). Absent a `required` rule, an empty value is simply valid.
pub fn validate_missing(rules: &[Rule]) -> ValidationReport {
    let mut report = ValidationReport::default();
    if let Some(rule) = rules.iter().find(|r| r.kind == RuleKind::Required) {
        report.errors.push(rule.message.clone());
    }
    report
}
