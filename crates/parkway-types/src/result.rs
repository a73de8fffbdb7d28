//! The value returned by every command's Query and Execute pass.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coords::CoordsXYZ;
use crate::enums::{ExpenditureType, Status};
use crate::strings::{FormatArg, StringId, format_string};

/// Park money. Fixed-point so every peer computes identical costs.
pub type Money = Decimal;

/// Outcome of a command pass.
///
/// Produced fresh by every Query/Execute call and never mutated by the
/// caller afterwards. A failed nested command's result is returned by the
/// parent unchanged, so `error_title` always names the command that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Outcome status.
    pub status: Status,
    /// Catalog title shown for a failure.
    pub error_title: Option<StringId>,
    /// Catalog detail message for a failure.
    pub error_message: Option<StringId>,
    /// Arguments for `error_message`.
    pub error_message_args: Vec<FormatArg>,
    /// World position the command affected.
    pub position: Option<CoordsXYZ>,
    /// Finance category for `cost`.
    pub expenditure: ExpenditureType,
    /// Construction cost, when one was computed.
    pub cost: Option<Money>,
}

impl ActionResult {
    /// A successful result with no position or cost yet.
    pub const fn ok() -> Self {
        Self {
            status: Status::Ok,
            error_title: None,
            error_message: None,
            error_message_args: Vec::new(),
            position: None,
            expenditure: ExpenditureType::Unspecified,
            cost: None,
        }
    }

    /// A failed result with a title and no detail.
    pub const fn error(status: Status, title: StringId) -> Self {
        Self {
            status,
            error_title: Some(title),
            error_message: None,
            error_message_args: Vec::new(),
            position: None,
            expenditure: ExpenditureType::Unspecified,
            cost: None,
        }
    }

    /// A failed result with a title and a detail message.
    pub const fn error_with_message(status: Status, title: StringId, message: StringId) -> Self {
        Self {
            status,
            error_title: Some(title),
            error_message: Some(message),
            error_message_args: Vec::new(),
            position: None,
            expenditure: ExpenditureType::Unspecified,
            cost: None,
        }
    }

    /// Attach arguments for the detail message.
    #[must_use]
    pub fn with_args(mut self, args: Vec<FormatArg>) -> Self {
        self.error_message_args = args;
        self
    }

    /// Set the affected position.
    #[must_use]
    pub fn at(mut self, position: Option<CoordsXYZ>) -> Self {
        self.position = position;
        self
    }

    /// Set the finance category.
    #[must_use]
    pub fn with_expenditure(mut self, expenditure: ExpenditureType) -> Self {
        self.expenditure = expenditure;
        self
    }

    /// Set the cost.
    #[must_use]
    pub fn with_cost(mut self, cost: Money) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Whether the status is [`Status::Ok`].
    pub const fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// Split into `Ok(self)` for success and `Err(self)` otherwise, so that
    /// `?` returns a failing result to the caller untouched.
    pub fn into_outcome(self) -> Result<Self, Self> {
        if self.status.is_ok() { Ok(self) } else { Err(self) }
    }

    /// Render the user-visible failure text: the title, then the detail
    /// message if there is one. `None` on success.
    pub fn error_text(&self) -> Option<String> {
        if self.is_ok() {
            return None;
        }
        let title = self.error_title.map(|id| format_string(id, &[]));
        let message = self
            .error_message
            .map(|id| format_string(id, &self.error_message_args));
        match (title, message) {
            (Some(t), Some(m)) => Some(format!("{t}\n{m}")),
            (Some(t), None) => Some(t),
            (None, Some(m)) => Some(m),
            (None, None) => Some(format!("{:?}", self.status)),
        }
    }
}

impl Default for ActionResult {
    fn default() -> Self {
        Self::ok()
    }
}
