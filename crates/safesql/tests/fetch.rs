use safesql::{
    CollectingReporter, ErrorKind, QueryExecutor, Row, SafeSql, SqlError, SqlResult, Value, args,
};
use std::sync::{Arc, Mutex};

/// Returns canned rows and records every statement it is given.
#[derive(Default)]
struct MemoryExecutor {
    rows: Vec<Row>,
    affected: u64,
    fail: bool,
    seen: Mutex<Vec<String>>,
}

impl MemoryExecutor {
    fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    fn record(&self, sql: &str) -> SqlResult<()> {
        self.seen.lock().unwrap().push(sql.to_string());
        if self.fail {
            return Err(SqlError::connection("server has gone away"));
        }
        Ok(())
    }
}

impl QueryExecutor for MemoryExecutor {
    async fn query(&self, sql: &str) -> SqlResult<Vec<Row>> {
        self.record(sql)?;
        Ok(self.rows.clone())
    }

    async fn execute(&self, sql: &str) -> SqlResult<u64> {
        self.record(sql)?;
        Ok(self.affected)
    }
}

fn row(cols: &[(&str, Value)]) -> Row {
    cols.iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn users() -> MemoryExecutor {
    MemoryExecutor::with_rows(vec![
        row(&[("id", Value::Int(1)), ("name", Value::from("ann"))]),
        row(&[("id", Value::Int(2)), ("name", Value::from("bob"))]),
    ])
}

#[tokio::test]
async fn query_returns_affected_rows() {
    let exec = MemoryExecutor {
        affected: 3,
        ..MemoryExecutor::default()
    };
    let n = SafeSql::new()
        .query(&exec, "DELETE FROM ?n WHERE id IN ?a", &args!["t", vec![1, 2, 3]])
        .await
        .unwrap();
    assert_eq!(n, 3);
    assert_eq!(exec.seen(), vec!["DELETE FROM `t` WHERE id IN ('1', '2', '3')"]);
}

#[tokio::test]
async fn get_all_and_get_row() {
    let exec = users();
    let db = SafeSql::new();

    let rows = db.get_all(&exec, "SELECT * FROM users", &[]).await.unwrap();
    assert_eq!(rows.len(), 2);

    let first = db
        .get_row(&exec, "SELECT * FROM users WHERE id = ?i", &args![1])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first["name"], Value::from("ann"));
    assert_eq!(exec.seen()[1], "SELECT * FROM users WHERE id = 1");
}

#[tokio::test]
async fn empty_results() {
    let exec = MemoryExecutor::default();
    let db = SafeSql::new();
    assert!(db.get_row(&exec, "SELECT 1", &[]).await.unwrap().is_none());
    assert!(db.get_one(&exec, "SELECT 1", &[]).await.unwrap().is_none());
    assert!(db.get_col(&exec, "SELECT 1", &[]).await.unwrap().is_empty());
    assert!(db.get_ind(&exec, "id", "SELECT 1", &[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn get_one_and_get_col() {
    let exec = users();
    let db = SafeSql::new();
    assert_eq!(
        db.get_one(&exec, "SELECT id FROM users", &[]).await.unwrap(),
        Some(Value::Int(1))
    );
    assert_eq!(
        db.get_col(&exec, "SELECT id FROM users", &[]).await.unwrap(),
        vec![Value::Int(1), Value::Int(2)]
    );
}

#[tokio::test]
async fn get_ind_keys_rows_by_column() {
    let exec = users();
    let db = SafeSql::new();

    let by_name = db
        .get_ind(&exec, "name", "SELECT * FROM users", &[])
        .await
        .unwrap();
    assert_eq!(by_name.keys().collect::<Vec<_>>(), vec!["ann", "bob"]);
    assert_eq!(by_name["bob"]["id"], Value::Int(2));

    let names = db
        .get_ind_col(&exec, "id", "SELECT id, name FROM users", &[])
        .await
        .unwrap();
    assert_eq!(names["1"], Value::from("ann"));
    assert_eq!(names["2"], Value::from("bob"));
}

#[tokio::test]
async fn get_ind_missing_column() {
    let exec = users();
    let err = SafeSql::new()
        .get_ind(&exec, "email", "SELECT * FROM users", &[])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn executor_errors_are_reported_with_sql() {
    let reporter = Arc::new(CollectingReporter::new());
    let db = SafeSql::new().reporter_arc(reporter.clone());
    let exec = MemoryExecutor::failing();

    let err = db
        .get_all(&exec, "SELECT * FROM ?n", &args!["users"])
        .await
        .unwrap_err();
    assert_eq!(err, SqlError::connection("server has gone away"));

    let reports = reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, ErrorKind::ConnectionError);
    assert_eq!(reports[0].sql.as_deref(), Some("SELECT * FROM `users`"));
}

#[tokio::test]
async fn template_errors_never_reach_the_executor() {
    let exec = users();
    let err = SafeSql::strict()
        .reporter(CollectingReporter::new())
        .get_all(&exec, "SELECT * FROM t WHERE id = ?i", &[])
        .await
        .unwrap_err();
    assert!(err.is_argument_count_mismatch());
    assert!(exec.seen().is_empty());
}
