use crate::errors::{AppError, ResultExt};
use crate::models::Insured;
use crate::validation::id_matches_fragment;
use sqlx::PgPool;

/// Postgres SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Data access for the `insureds` table. All SQL lives here; callers get
/// domain values or an `AppError` back, never raw rows.
pub struct InsuredRepository {
    pool: PgPool,
}

impl InsuredRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches one page ordered by identification number ascending, plus
    /// the total row count. Paging parameters are clamped by the service
    /// before they reach this layer.
    pub async fn list_page(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> Result<(Vec<Insured>, i64), AppError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM insureds")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count insureds")?;

        let items = sqlx::query_as::<_, Insured>(
            r#"
            SELECT * FROM insureds
            ORDER BY identification_number ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind((page_number - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Insured>, AppError> {
        let insured =
            sqlx::query_as::<_, Insured>("SELECT * FROM insureds WHERE identification_number = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(insured)
    }

    /// Records whose identification number's decimal string contains
    /// `fragment`, ordered ascending.
    ///
    /// The substring match happens application-side on the stringified id;
    /// a SQL prefix or numeric-range query would miss interior matches.
    pub async fn search_by_id_fragment(&self, fragment: &str) -> Result<Vec<Insured>, AppError> {
        let all = sqlx::query_as::<_, Insured>(
            "SELECT * FROM insureds ORDER BY identification_number ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(all
            .into_iter()
            .filter(|i| id_matches_fragment(i.identification_number, fragment))
            .collect())
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM insureds WHERE identification_number = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Whether `email` is already taken, optionally excluding one record
    /// (so an update can keep its own email).
    pub async fn exists_by_email(
        &self,
        email: &str,
        excluding_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM insureds
                WHERE email = $1
                  AND ($2::BIGINT IS NULL OR identification_number <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(excluding_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Inserts a new record and returns the persisted row.
    ///
    /// The unique constraints are the real arbiter of the check-then-act
    /// race: a violation surfacing here is mapped to the same conflict
    /// error the service's pre-checks would have produced.
    pub async fn create(&self, insured: &Insured) -> Result<Insured, AppError> {
        let created = sqlx::query_as::<_, Insured>(
            r#"
            INSERT INTO insureds (
                identification_number, first_name, middle_name,
                first_last_name, second_last_name, contact_phone, email,
                birth_date, estimated_request_value, observations,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(insured.identification_number)
        .bind(&insured.first_name)
        .bind(&insured.middle_name)
        .bind(&insured.first_last_name)
        .bind(&insured.second_last_name)
        .bind(&insured.contact_phone)
        .bind(&insured.email)
        .bind(insured.birth_date)
        .bind(&insured.estimated_request_value)
        .bind(&insured.observations)
        .bind(insured.created_at)
        .bind(insured.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, insured))?;

        Ok(created)
    }

    /// Overwrites every mutable column; returns the number of rows
    /// affected. Zero rows means the record was deleted concurrently and
    /// the service reports that as not-found.
    pub async fn update(&self, insured: &Insured) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE insureds
            SET first_name = $2,
                middle_name = $3,
                first_last_name = $4,
                second_last_name = $5,
                contact_phone = $6,
                email = $7,
                birth_date = $8,
                estimated_request_value = $9,
                observations = $10,
                updated_at = $11
            WHERE identification_number = $1
            "#,
        )
        .bind(insured.identification_number)
        .bind(&insured.first_name)
        .bind(&insured.middle_name)
        .bind(&insured.first_last_name)
        .bind(&insured.second_last_name)
        .bind(&insured.contact_phone)
        .bind(&insured.email)
        .bind(insured.birth_date)
        .bind(&insured.estimated_request_value)
        .bind(&insured.observations)
        .bind(insured.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, insured))?;

        Ok(result.rows_affected())
    }

    /// Hard delete; returns the number of rows affected.
    pub async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM insureds WHERE identification_number = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Translates Postgres unique violations into the conflict errors the
/// pre-checks would have raised; everything else stays a database error.
fn map_unique_violation(err: sqlx::Error, insured: &Insured) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or_default();
            return if constraint.contains("email") {
                AppError::Conflict(format!(
                    "An insured with email {} already exists",
                    insured.email
                ))
            } else {
                AppError::Conflict(format!(
                    "An insured with identification number {} already exists",
                    insured.identification_number
                ))
            };
        }
    }
    AppError::DatabaseError(err)
}
