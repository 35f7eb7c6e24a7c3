//! Shared Diesel error mapping for the retreat and booking repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    debug!(error = %error, "connection pool checkout failed");
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map Diesel errors with no repository-specific meaning into query or
/// connection errors, keeping the driver message for diagnostics.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: DieselError,
    operation: &'static str,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %operation,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(format!("{operation}: {}", info.message()))
        }
        other => query(format!("{operation}: {other}")),
    }
}

/// Convert a page offset or limit to the `BIGINT` Diesel expects.
pub(crate) fn to_sql_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert a `COUNT(*)` result back to a page total.
pub(crate) fn from_sql_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(error, "load retreats", Mapped::Query, Mapped::Connection)
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_string()),
        );

        assert_eq!(
            map(error),
            Mapped::Connection("load retreats: server closed the connection".into())
        );
    }

    #[rstest]
    fn other_errors_map_to_query_with_context() {
        let Mapped::Query(message) = map(DieselError::NotFound) else {
            panic!("expected query error");
        };
        assert!(message.starts_with("load retreats: "));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".into()));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(25, 25)]
    #[case(u64::MAX, i64::MAX)]
    fn bigint_conversion_saturates(#[case] value: u64, #[case] expected: i64) {
        assert_eq!(to_sql_bigint(value), expected);
    }

    #[rstest]
    fn negative_counts_become_zero() {
        assert_eq!(from_sql_count(-1), 0);
        assert_eq!(from_sql_count(3), 3);
    }
}
