//! Validation engine
//!
//! Evaluates an ordered list of pattern rules against a field's text. Each
//! pattern must match the *whole* text. The first failing rule decides the
//! reported message; later rules are not evaluated.
//!
//! Malformed patterns fail closed: [`RuleSet::new`] keeps them and every
//! evaluation of such a rule fails with the rule's own message.
//! [`RuleSet::try_new`] rejects them up-front instead.

use regex::Regex;

use crate::error::FieldError;
use crate::state::ValidationState;

/// A pattern the text must match, and the message shown when it doesn't
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationRule {
    pub pattern: String,
    pub message: String,
}

impl ValidationRule {
    pub fn new(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Result of one evaluation pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub passed: bool,
    /// Message of the first failing rule
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: Some(message.into()),
        }
    }
}

impl From<ValidationOutcome> for ValidationState {
    fn from(outcome: ValidationOutcome) -> Self {
        match outcome {
            ValidationOutcome { passed: true, .. } => ValidationState::Passed,
            ValidationOutcome { message, .. } => ValidationState::Failed {
                message: message.unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug)]
struct CompiledRule {
    rule: ValidationRule,
    /// `None` when the pattern failed to compile
    regex: Option<Regex>,
}

impl CompiledRule {
    fn matches(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// Anchor a pattern so it only matches the entire input.
///
/// Malformed patterns are detected on the raw text, before anchoring.
fn whole_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)?;
    let close = if ends_in_verbose_mode(pattern) { "\n)" } else { ")" };
    Regex::new(&format!(r"\A(?:{pattern}{close}\z"))
}

/// Whether `x` mode is still on at the end of a valid pattern, where a
/// trailing `#` would open a comment
fn ends_in_verbose_mode(pattern: &str) -> bool {
    Regex::new(&format!("{pattern}#)")).is_ok()
}

/// An ordered, compiled list of rules
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile rules, keeping malformed patterns as always-failing rules
    pub fn new(rules: impl IntoIterator<Item = ValidationRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let regex = match whole_match(&rule.pattern) {
                    Ok(regex) => Some(regex),
                    Err(err) => {
                        tracing::warn!(
                            pattern = %rule.pattern,
                            error = %err,
                            "malformed validation pattern; rule will always fail"
                        );
                        None
                    }
                };
                CompiledRule { rule, regex }
            })
            .collect();
        Self { rules }
    }

    /// Compile rules, rejecting the first malformed pattern
    pub fn try_new(rules: impl IntoIterator<Item = ValidationRule>) -> Result<Self, FieldError> {
        let rules = rules
            .into_iter()
            .map(|rule| match whole_match(&rule.pattern) {
                Ok(regex) => Ok(CompiledRule {
                    rule,
                    regex: Some(regex),
                }),
                Err(source) => Err(FieldError::InvalidPattern {
                    pattern: rule.pattern,
                    source,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &ValidationRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Evaluate in order, stopping at the first failing rule
    pub fn evaluate(&self, text: &str) -> ValidationOutcome {
        self.rules
            .iter()
            .find(|compiled| !compiled.matches(text))
            .map_or_else(ValidationOutcome::pass, |failed| {
                ValidationOutcome::fail(failed.rule.message.clone())
            })
    }
}

/// Evaluate `rules` against `text` at the end of an edit session.
///
/// Missing text is validated as the empty string; missing rules pass.
pub fn validate_on_edit_end(text: Option<&str>, rules: Option<&RuleSet>) -> ValidationOutcome {
    match rules {
        Some(rules) => rules.evaluate(text.unwrap_or_default()),
        None => ValidationOutcome::pass(),
    }
}
