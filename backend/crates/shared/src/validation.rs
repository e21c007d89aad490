//! Cross-cutting Validation Rules
//!
//! Per-field validation violations collected across an entire request
//! payload, so a client sees every broken constraint at once instead of
//! the first one only.

use serde::Serialize;
use std::fmt;

/// 単一フィールドの制約違反
///
/// ## Fields
/// * `field` - 違反したリクエストフィールド名（camelCase）
/// * `message` - ユーザー向けの violation メッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// フィールド違反のコレクター
///
/// リクエスト検証中に見つかった違反を蓄積します。
///
/// ## Examples
/// ```rust
/// use kernel::validation::Violations;
///
/// let mut violations = Violations::new();
/// violations.add("email", "Invalid email format");
/// assert!(!violations.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a violation for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    /// Record the error's display form as the violation message for `field`.
    pub fn add_error(&mut self, field: impl Into<String>, error: impl fmt::Display) {
        self.add(field, error.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<FieldViolation> {
        self.0
    }

    /// Convert into `Err(build(self))` when any violation was recorded.
    pub fn into_result<E>(self, build: impl FnOnce(Self) -> E) -> Result<(), E> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(build(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl IntoIterator for Violations {
    type Item = FieldViolation;
    type IntoIter = std::vec::IntoIter<FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
