//! # safesql
//!
//! Safe SQL text for MySQL-style dialects, built two ways.
//!
//! ## Features
//!
//! - **Typed placeholders**: every value in a template is marked with its kind
//!   (`?n` identifier, `?s` string, `?i` integer, `?f`/`?2f` float, `?a` set,
//!   `?u` field map, `?p` raw) and formatted for it
//! - **Statement assemblers**: INSERT/UPDATE/DELETE/SELECT from declarative,
//!   `serde`-loadable descriptions
//! - **Lenient or strict**: coerce bad input to a safe default and report it,
//!   or fail the call
//! - **Injected collaborators**: the driver's string escaper, an error
//!   reporter (logs through `tracing` by default) and an async query executor
//!
//! ## Templates
//!
//! ```ignore
//! use safesql::{SafeSql, args};
//!
//! let db = SafeSql::new();
//! let sql = db.substitute(
//!     "SELECT * FROM ?n WHERE id IN ?a AND price > ?2f",
//!     &args!["goods", vec![1, 2, 3], 9.5],
//! )?;
//! // SELECT * FROM `goods` WHERE id IN ('1', '2', '3') AND price > 9.50
//! ```
//!
//! ## Statement descriptions
//!
//! ```ignore
//! use safesql::{Field, SafeSql, SelectQuery};
//!
//! let db = SafeSql::strict();
//! let q = SelectQuery::new("users")
//!     .fields(["id", "name"])
//!     .and_where(Field::int("age", 21));
//! assert_eq!(db.select(&q)?, "SELECT `id`, `name` FROM `users` WHERE `age` = 21");
//!
//! let sql = db.update("t", &[Field::float("price", 9.999, 2)], &[])?;
//! assert_eq!(sql, "UPDATE `t` SET `price` = 10.00");
//! ```
//!
//! ## Fetching
//!
//! ```ignore
//! let name = db
//!     .get_one(&conn, "SELECT name FROM ?n WHERE id = ?i", &args!["users", 5])
//!     .await?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod escape;
pub mod executor;
pub mod fetch;
pub mod filter;
pub mod format;
pub mod ident;
pub mod placeholder;
pub mod report;
pub mod safe_sql;
pub mod substitute;
pub mod value;

pub use builder::{
    Condition, ConditionEntry, Conditions, Connector, Direction, Field, Join, JoinKind, OrderBy,
    SelectQuery, Statement,
};
pub use config::BuilderConfig;
pub use error::{ErrorKind, SqlError, SqlResult};
pub use escape::{Escaper, MysqlEscaper};
pub use executor::{QueryExecutor, Row};
pub use filter::{filter_map, white_list};
pub use format::DeclaredType;
pub use ident::Name;
pub use placeholder::{Placeholder, Token, count_placeholders, tokenize};
pub use report::{CollectingReporter, ErrorReporter, NoopReporter, Report, TracingReporter};
pub use safe_sql::SafeSql;
pub use value::Value;
