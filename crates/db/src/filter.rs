//! Composable `WHERE` clause builder for list and count queries.
//!
//! Each optional constraint is appended only when its value is present, so
//! one builder covers every combination of filters. Placeholders are
//! numbered in push order and the bind list is kept in the same order.
//!
//! ```ignore
//! let filter = FilterBuilder::new()
//!     .eq_text("device_id", Some("dev-1"))
//!     .at_or_after("timestamp", since);
//! let sql = format!(
//!     "SELECT {COLUMNS} FROM health_metrics {} LIMIT ${} OFFSET ${}",
//!     filter.where_clause(),
//!     filter.next_param(),
//!     filter.next_param() + 1,
//! );
//! filter.bind_as(sqlx::query_as::<_, HealthMetric>(&sql)).bind(limit).bind(offset)
//! ```

use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;
use vitals_core::types::Timestamp;

/// A value waiting to be bound to a numbered placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Bool(bool),
    Timestamp(Timestamp),
}

/// Conjunction of optional constraints.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    values: Vec<BindValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, column: &str, op: &str, value: BindValue) {
        let idx = self.values.len() + 1;
        self.conditions.push(format!("{column} {op} ${idx}"));
        self.values.push(value);
    }

    /// `column = $n` when `value` is present.
    pub fn eq_text(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.push(column, "=", BindValue::Text(v.to_string()));
        }
        self
    }

    /// `column = $n` when `value` is present.
    pub fn eq_bool(mut self, column: &str, value: Option<bool>) -> Self {
        if let Some(v) = value {
            self.push(column, "=", BindValue::Bool(v));
        }
        self
    }

    /// `column >= $n` when `since` is present.
    pub fn at_or_after(mut self, column: &str, since: Option<Timestamp>) -> Self {
        if let Some(ts) = since {
            self.push(column, ">=", BindValue::Timestamp(ts));
        }
        self
    }

    /// `column <= $n` when `until` is present.
    pub fn at_or_before(mut self, column: &str, until: Option<Timestamp>) -> Self {
        if let Some(ts) = until {
            self.push(column, "<=", BindValue::Timestamp(ts));
        }
        self
    }

    /// A fixed condition with no bind parameters.
    pub fn raw(mut self, condition: &str) -> Self {
        self.conditions.push(condition.to_string());
        self
    }

    /// `WHERE a AND b ...`, or an empty string when unconstrained.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Number of the first placeholder free for the caller (e.g. `LIMIT`).
    pub fn next_param(&self) -> usize {
        self.values.len() + 1
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    /// Bind every collected value to a `query_as`.
    pub fn bind_as<'q, O>(
        &'q self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for val in &self.values {
            q = match val {
                BindValue::Text(v) => q.bind(v.as_str()),
                BindValue::Bool(v) => q.bind(*v),
                BindValue::Timestamp(v) => q.bind(*v),
            };
        }
        q
    }

    /// Bind every collected value to a `query_scalar`.
    pub fn bind_scalar<'q, O>(
        &'q self,
        mut q: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> QueryScalar<'q, Postgres, O, PgArguments> {
        for val in &self.values {
            q = match val {
                BindValue::Text(v) => q.bind(v.as_str()),
                BindValue::Bool(v) => q.bind(*v),
                BindValue::Timestamp(v) => q.bind(*v),
            };
        }
        q
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
