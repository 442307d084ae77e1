//! Attribute queries shared by the SQLite repositories

use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqliteRow};

use hbnb::{attribute_matches, DomainError, Entity};

/// Scalar JSON value in the shape SQLite stores it
enum SqlValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl SqlValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Integer(i64::from(*b))),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Self::Integer(i)),
                None => n.as_f64().map(Self::Real),
            },
            _ => None,
        }
    }
}

/// Rows of `table` whose `column` equals `value`, ordered like `get_all`.
///
/// `column` must already be checked against `Entity::ATTRIBUTES`.
pub(super) async fn fetch_matching<R>(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    value: &Value,
) -> Result<Vec<R>, DomainError>
where
    R: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
{
    // Stored attributes are never NULL
    let Some(bound) = SqlValue::from_json(value) else {
        return Ok(Vec::new());
    };

    let sql = format!(
        "SELECT * FROM {} WHERE {} = ? ORDER BY created_at, id",
        table, column
    );
    let query = sqlx::query_as::<_, R>(&sql);
    let query = match bound {
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Integer(i) => query.bind(i),
        SqlValue::Real(f) => query.bind(f),
    };

    query
        .fetch_all(pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))
}

/// Drop rows SQLite matched only through type affinity ("5" against 5,
/// 1 against true) so results agree with the in-memory store.
pub(super) fn keep_exact<E: Entity>(entities: Vec<E>, name: &str, value: &Value) -> Vec<E> {
    entities
        .into_iter()
        .filter(|entity| {
            entity
                .attribute(name)
                .is_some_and(|stored| attribute_matches(&stored, value))
        })
        .collect()
}
