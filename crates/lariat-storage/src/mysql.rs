use async_trait::async_trait;
use lariat_core::error::Result;
use lariat_core::{ReadRepository, Repository, ShortCode, StorageError, UrlMapping, UrlRecord};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySqlPool, Row};
use std::time::Duration;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// MySQL implementation of the repository contract.
///
/// Insert-if-absent rides on the primary key: the expected schema is
///
/// ```sql
/// CREATE TABLE urls (
///     short_code   VARCHAR(32)  NOT NULL PRIMARY KEY,
///     original_url TEXT         NOT NULL,
///     tag          VARCHAR(255) NULL
/// );
/// ```
///
/// so a duplicate insert fails with a unique violation, which maps to
/// `StorageError::Conflict`. No read-then-write is involved.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    ///
    /// Connection acquisition is bounded so a saturated pool surfaces
    /// as `StorageError::Timeout` instead of hanging the request.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

/// Escapes LIKE wildcards so a user-supplied tag filter matches
/// literally. '!' is the ESCAPE character in the listing query.
fn escape_like_pattern(filter: &str) -> String {
    filter
        .replace('!', "!!")
        .replace('%', "!%")
        .replace('_', "!_")
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn mapping_from_row(row: &sqlx::mysql::MySqlRow) -> Result<UrlMapping> {
    let short_code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
    let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
    let tag: Option<String> = row.try_get("tag").map_err(map_sqlx_error)?;

    Ok(UrlMapping {
        code: ShortCode::new_unchecked(short_code),
        original_url,
        tag,
    })
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT original_url, tag
            FROM urls
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
        let tag: Option<String> = row.try_get("tag").map_err(map_sqlx_error)?;

        Ok(Some(UrlRecord { original_url, tag }))
    }

    async fn list(&self, tag_filter: Option<&str>, limit: usize) -> Result<Vec<UrlMapping>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = match tag_filter {
            Some(filter) => {
                sqlx::query(
                    r#"
                    SELECT short_code, original_url, tag
                    FROM urls
                    WHERE tag IS NOT NULL
                      AND LOWER(tag) LIKE CONCAT('%', LOWER(?), '%') ESCAPE '!'
                    ORDER BY short_code
                    LIMIT ?
                    "#,
                )
                .bind(escape_like_pattern(filter))
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT short_code, original_url, tag
                    FROM urls
                    ORDER BY short_code
                    LIMIT ?
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx_error)?;

        rows.iter().map(mapping_from_row).collect()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (short_code, original_url, tag)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(record.original_url)
        .bind(record.tag)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(code.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
