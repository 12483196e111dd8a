//! Visits repository: page-view rows and analytics aggregates

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::AppResult,
    models::visit::{CountryCount, DateCount, RecentVisit, RegionCount},
};

#[derive(Clone)]
pub struct VisitsRepository {
    pool: Pool<Postgres>,
}

impl VisitsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        path: &str,
        country: &str,
        region: Option<&str>,
        city: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query("INSERT INTO visits (path, country, region, city) VALUES ($1, $2, $3, $4)")
            .bind(path)
            .bind(country)
            .bind(region)
            .bind(city)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn total(&self) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn count_on(&self, date: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE timestamp::date = $1")
            .bind(date)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Top countries by visit count
    pub async fn by_country(&self, limit: i64) -> AppResult<Vec<CountryCount>> {
        let rows = sqlx::query(
            r#"
            SELECT country, COUNT(*) AS count
            FROM visits
            WHERE country IS NOT NULL AND country != ''
            GROUP BY country
            ORDER BY count DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| CountryCount {
                country: row.get("country"),
                count: row.get("count"),
            })
            .collect())
    }

    /// Top country/region pairs by visit count
    pub async fn by_region(&self, limit: i64) -> AppResult<Vec<RegionCount>> {
        let rows = sqlx::query(
            r#"
            SELECT country, region, COUNT(*) AS count
            FROM visits
            WHERE country IS NOT NULL AND region IS NOT NULL AND region != ''
            GROUP BY country, region
            ORDER BY count DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| RegionCount {
                country: row.get("country"),
                region: row.get("region"),
                count: row.get("count"),
            })
            .collect())
    }

    /// Daily visit counts over the trailing window
    pub async fn by_date(&self, days: i32) -> AppResult<Vec<DateCount>> {
        let rows = sqlx::query(
            r#"
            SELECT timestamp::date AS date, COUNT(*) AS count
            FROM visits
            WHERE timestamp >= (CURRENT_DATE - make_interval(days => $1))
            GROUP BY timestamp::date
            ORDER BY date ASC
            "#,
        )
        .bind(days)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| DateCount {
                date: row.get::<NaiveDate, _>("date").format("%Y-%m-%d").to_string(),
                count: row.get("count"),
            })
            .collect())
    }

    /// Most recent visits, newest first
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<RecentVisit>> {
        let rows = sqlx::query(
            r#"
            SELECT path, country, region, city, timestamp
            FROM visits
            ORDER BY timestamp DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| RecentVisit {
                path: row.get("path"),
                country: row.get("country"),
                region: row.get("region"),
                city: row.get("city"),
                timestamp: row.get("timestamp"),
            })
            .collect())
    }
}
