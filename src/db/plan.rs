//! Query plan assembly for dynamically filtered statements
//!
//! A `QueryPlan` carries the accumulated SQL text and its positional bind
//! values together. A `{}` slot in a fragment is numbered at the moment its
//! value is pushed, so the Nth bind always lines up with `$N` no matter
//! which predicates a caller skips.

use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

/// A value destined for a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accumulated query text plus its ordered bind list.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    sql: String,
    values: Vec<SqlValue>,
    needs_where: bool,
}

impl QueryPlan {
    /// Start a plan from a base SELECT with no predicates.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            sql: base.into(),
            values: Vec::new(),
            needs_where: true,
        }
    }

    /// Append a fragment that binds nothing.
    pub fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    /// Append a predicate, prefixed with `WHERE` for the first one and
    /// `AND` for every one after it.
    ///
    /// Each `{}` slot in `template` is replaced by the placeholder for the
    /// value pushed at that position.
    pub fn filter<I>(&mut self, template: &str, values: I)
    where
        I: IntoIterator<Item = SqlValue>,
    {
        if self.needs_where {
            self.sql.push_str(" WHERE ");
            self.needs_where = false;
        } else {
            self.sql.push_str(" AND ");
        }
        self.splice(template, values);
    }

    /// Append a placeholder-consuming fragment without the WHERE/AND
    /// prefix (HAVING, LIMIT).
    pub fn append<I>(&mut self, template: &str, values: I)
    where
        I: IntoIterator<Item = SqlValue>,
    {
        self.splice(template, values);
    }

    /// The assembled statement text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bind values, in placeholder order.
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Bind the accumulated values, in order, onto an executable query.
    pub fn build(&self) -> Query<'_, Postgres, PgArguments> {
        self.values
            .iter()
            .fold(sqlx::query(&self.sql), |query, value| match value {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Float(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.as_str()),
            })
    }

    fn splice<I>(&mut self, template: &str, values: I)
    where
        I: IntoIterator<Item = SqlValue>,
    {
        let mut values = values.into_iter();
        let mut segments = template.split("{}");
        self.sql.push_str(segments.next().unwrap_or_default());
        for segment in segments {
            let value = values
                .next()
                .expect("fragment has more slots than bind values");
            self.values.push(value);
            self.sql.push('$');
            self.sql.push_str(&self.values.len().to_string());
            self.sql.push_str(segment);
        }
        assert!(
            values.next().is_none(),
            "fragment has fewer slots than bind values"
        );
    }
}

/// Test double for the driver: resolves each `$N` in the text against the
/// bind list, in the order the placeholders appear.
#[cfg(test)]
pub(crate) fn echo_binds(plan: &QueryPlan) -> Vec<(usize, SqlValue)> {
    plan.sql()
        .split('$')
        .skip(1)
        .map(|chunk| {
            let digits: String = chunk.chars().take_while(|c| c.is_ascii_digit()).collect();
            let index: usize = digits.parse().expect("placeholder without an index");
            (index, plan.values()[index - 1].clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_filter_opens_where() {
        let mut plan = QueryPlan::new("SELECT * FROM properties");
        plan.filter("owner_id = {}", [SqlValue::Int(3)]);

        assert_eq!(plan.sql(), "SELECT * FROM properties WHERE owner_id = $1");
        assert_eq!(plan.values(), &[SqlValue::Int(3)]);
    }

    #[test]
    fn later_filters_join_with_and() {
        let mut plan = QueryPlan::new("SELECT * FROM properties");
        plan.filter("owner_id = {}", [SqlValue::Int(3)]);
        plan.filter("city = {}", [SqlValue::Text("austin".to_string())]);

        assert_eq!(
            plan.sql(),
            "SELECT * FROM properties WHERE owner_id = $1 AND city = $2"
        );
    }

    #[test]
    fn multi_slot_fragment_numbers_in_push_order() {
        let mut plan = QueryPlan::new("SELECT * FROM properties");
        plan.filter("cost > {} AND cost < {}", [SqlValue::Int(50), SqlValue::Int(150)]);

        assert_eq!(
            plan.sql(),
            "SELECT * FROM properties WHERE cost > $1 AND cost < $2"
        );
        assert_eq!(plan.values(), &[SqlValue::Int(50), SqlValue::Int(150)]);
    }

    #[test]
    fn append_skips_where_bookkeeping() {
        let mut plan = QueryPlan::new("SELECT * FROM properties");
        plan.append(" LIMIT {}", [SqlValue::Int(10)]);
        plan.filter("city = {}", [SqlValue::Text("austin".to_string())]);

        // append must not count as an opened clause
        assert_eq!(
            plan.sql(),
            "SELECT * FROM properties LIMIT $1 WHERE city = $2"
        );
    }

    #[test]
    fn push_adds_raw_text_only() {
        let mut plan = QueryPlan::new("SELECT * FROM properties");
        plan.push(" GROUP BY id");

        assert_eq!(plan.sql(), "SELECT * FROM properties GROUP BY id");
        assert!(plan.values().is_empty());
    }

    #[test]
    fn echoed_placeholders_resolve_in_text_order() {
        let mut plan = QueryPlan::new("SELECT * FROM properties");
        plan.filter("owner_id = {}", [SqlValue::Int(7)]);
        plan.filter("cost > {} AND cost < {}", [SqlValue::Int(50), SqlValue::Int(150)]);
        plan.append(" LIMIT {}", [SqlValue::Int(10)]);

        let echoed = echo_binds(&plan);
        assert_eq!(
            echoed,
            vec![
                (1, SqlValue::Int(7)),
                (2, SqlValue::Int(50)),
                (3, SqlValue::Int(150)),
                (4, SqlValue::Int(10)),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "more slots than bind values")]
    fn slot_without_value_panics() {
        let mut plan = QueryPlan::new("SELECT * FROM properties");
        plan.filter("owner_id = {}", std::iter::empty::<SqlValue>());
    }
}
