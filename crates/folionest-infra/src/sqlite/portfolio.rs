//! SQLite portfolio repository implementation.
//!
//! Implements `PortfolioRepository` from `folionest-core` using sqlx with
//! split read/write pools. Published-slug uniqueness is enforced by the
//! partial unique index `idx_portfolios_published_slug`, so a losing
//! publish fails atomically at commit time with a constraint violation
//! rather than relying on a pre-check.

use chrono::{DateTime, Utc};
use sqlx::Row;

use folionest_core::repository::SortOrder;
use folionest_core::repository::portfolio::{PortfolioFilter, PortfolioRepository};
use folionest_types::error::RepositoryError;
use folionest_types::portfolio::{
    Portfolio, PortfolioData, PortfolioId, PortfolioStatus, SeoMeta, TemplateId,
};
use folionest_types::user::UserId;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `PortfolioRepository`.
pub struct SqlitePortfolioRepository {
    pool: DatabasePool,
}

impl SqlitePortfolioRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to the domain aggregate.
struct PortfolioRow {
    id: String,
    owner_id: String,
    template: String,
    slug: String,
    status: String,
    data: String,
    seo_title: String,
    seo_description: String,
    view_count: i64,
    created_at: String,
    updated_at: String,
    published_at: Option<String>,
}

impl PortfolioRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            template: row.try_get("template")?,
            slug: row.try_get("slug")?,
            status: row.try_get("status")?,
            data: row.try_get("data")?,
            seo_title: row.try_get("seo_title")?,
            seo_description: row.try_get("seo_description")?,
            view_count: row.try_get("view_count")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            published_at: row.try_get("published_at")?,
        })
    }

    fn into_portfolio(self) -> Result<Portfolio, RepositoryError> {
        let id = self
            .id
            .parse::<PortfolioId>()
            .map_err(|e| RepositoryError::Query(format!("invalid portfolio id: {e}")))?;
        let owner_id = self
            .owner_id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid owner id: {e}")))?;
        let status: PortfolioStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let data: PortfolioData = serde_json::from_str(&self.data)
            .map_err(|e| RepositoryError::Query(format!("invalid portfolio data JSON: {e}")))?;

        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;
        let published_at = self
            .published_at
            .as_deref()
            .map(parse_datetime)
            .transpose()?;

        Ok(Portfolio {
            id,
            owner_id,
            template: TemplateId::new(self.template),
            slug: self.slug,
            status,
            data,
            seo: SeoMeta {
                title: self.seo_title,
                description: self.seo_description,
            },
            view_count: self.view_count,
            created_at,
            updated_at,
            published_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn slug_conflict(slug: &str) -> RepositoryError {
    RepositoryError::Conflict(format!("slug '{slug}' already published"))
}

impl PortfolioRepository for SqlitePortfolioRepository {
    async fn create(&self, portfolio: &Portfolio) -> Result<Portfolio, RepositoryError> {
        let data_json = serde_json::to_string(&portfolio.data)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO portfolios (id, owner_id, template, slug, status, data, seo_title, seo_description, view_count, created_at, updated_at, published_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(portfolio.id.to_string())
        .bind(portfolio.owner_id.to_string())
        .bind(portfolio.template.as_str())
        .bind(&portfolio.slug)
        .bind(portfolio.status.to_string())
        .bind(&data_json)
        .bind(&portfolio.seo.title)
        .bind(&portfolio.seo.description)
        .bind(portfolio.view_count)
        .bind(format_datetime(&portfolio.created_at))
        .bind(format_datetime(&portfolio.updated_at))
        .bind(portfolio.published_at.as_ref().map(format_datetime))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(portfolio.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(slug_conflict(&portfolio.slug))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &PortfolioId) -> Result<Option<Portfolio>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM portfolios WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            PortfolioRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_portfolio()
        })
        .transpose()
    }

    async fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Portfolio>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM portfolios WHERE slug = ? AND status = 'published'")
            .bind(slug)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            PortfolioRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_portfolio()
        })
        .transpose()
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        filter: Option<PortfolioFilter>,
    ) -> Result<Vec<Portfolio>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut sql = String::from("SELECT * FROM portfolios WHERE owner_id = ?");

        if let Some(status) = filter.status {
            sql.push_str(&format!(" AND status = '{status}'"));
        }

        // Whitelist allowed sort fields to prevent SQL injection
        let sort_field = filter.sort_by.as_deref().unwrap_or("created_at");
        let safe_sort = match sort_field {
            "slug" | "status" | "view_count" | "created_at" | "updated_at" | "published_at" => {
                sort_field
            }
            _ => "created_at",
        };
        let order = match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        sql.push_str(&format!(" ORDER BY {safe_sort} {order}"));

        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = filter.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let rows = sqlx::query(&sql)
            .bind(owner_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut portfolios = Vec::with_capacity(rows.len());
        for row in &rows {
            let portfolio_row =
                PortfolioRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            portfolios.push(portfolio_row.into_portfolio()?);
        }

        Ok(portfolios)
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM portfolios WHERE owner_id = ?")
            .bind(owner_id.to_string())
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(count.0)
    }

    async fn update(&self, portfolio: &Portfolio) -> Result<Portfolio, RepositoryError> {
        let data_json = serde_json::to_string(&portfolio.data)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE portfolios SET template = ?, slug = ?, status = ?, data = ?, seo_title = ?, seo_description = ?, updated_at = ?, published_at = ?
             WHERE id = ?",
        )
        .bind(portfolio.template.as_str())
        .bind(&portfolio.slug)
        .bind(portfolio.status.to_string())
        .bind(&data_json)
        .bind(&portfolio.seo.title)
        .bind(&portfolio.seo.description)
        .bind(format_datetime(&portfolio.updated_at))
        .bind(portfolio.published_at.as_ref().map(format_datetime))
        .bind(portfolio.id.to_string())
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(RepositoryError::NotFound),
            Ok(_) => Ok(portfolio.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(slug_conflict(&portfolio.slug))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn delete(&self, id: &PortfolioId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portfolios WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn increment_views(&self, id: &PortfolioId) -> Result<(), RepositoryError> {
        // Single arithmetic UPDATE: the database serializes concurrent
        // increments, so no count is ever lost to a read-modify-write race.
        let result = sqlx::query(
            "UPDATE portfolios SET view_count = view_count + 1 WHERE id = ?",
        )
        .bind(id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
