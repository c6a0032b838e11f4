use crate::item_repo::parse_timestamp;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use thrift_pricing::models::{Comparable, ListingStatus};
use thrift_pricing::ComparableRepository;
use uuid::Uuid;

pub struct SqliteComparableRepository {
    pool: Pool<Sqlite>,
}

impl SqliteComparableRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComparableRepository for SqliteComparableRepository {
    async fn save_comparable(
        &self,
        comparable: &Comparable,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO comparables (
                id, search_term, category, brand, condition, title, price,
                shipping_cost, total_price, platform, listing_url, listing_status, scraped_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(comparable.id.to_string())
        .bind(&comparable.search_term)
        .bind(&comparable.category)
        .bind(&comparable.brand)
        .bind(&comparable.condition)
        .bind(&comparable.title)
        .bind(comparable.price)
        .bind(comparable.shipping_cost)
        .bind(comparable.total_price)
        .bind(&comparable.platform)
        .bind(&comparable.listing_url)
        .bind(comparable.listing_status.as_str())
        .bind(comparable.scraped_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(comparable.id)
    }

    async fn find_by_term(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<Comparable>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT id, search_term, category, brand, condition, title, price,
                   shipping_cost, total_price, platform, listing_url, listing_status, scraped_at
            FROM comparables
            WHERE search_term LIKE '%' || ? || '%'
            ORDER BY scraped_at DESC
            LIMIT ?
            "#,
        )
        .bind(term)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(comparable_from_row).collect()
    }
}

fn comparable_from_row(
    row: &SqliteRow,
) -> Result<Comparable, Box<dyn std::error::Error + Send + Sync>> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("listing_status")?;

    Ok(Comparable {
        id: Uuid::parse_str(&id)?,
        search_term: row.try_get("search_term")?,
        category: row.try_get("category")?,
        brand: row.try_get("brand")?,
        condition: row.try_get("condition")?,
        title: row.try_get("title")?,
        price: row.try_get("price")?,
        shipping_cost: row.try_get("shipping_cost")?,
        total_price: row.try_get("total_price")?,
        platform: row.try_get("platform")?,
        listing_url: row.try_get("listing_url")?,
        listing_status: status.parse::<ListingStatus>()?,
        scraped_at: parse_timestamp(&row.try_get::<String, _>("scraped_at")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbClient;

    async fn repo() -> SqliteComparableRepository {
        let db = DbClient::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        SqliteComparableRepository::new(db.pool)
    }

    fn comparable(term: &str, price: f64) -> Comparable {
        Comparable::new(
            term.to_string(),
            "Clothing".to_string(),
            format!("{} listing at {}", term, price),
            price,
            None,
            "ebay".to_string(),
        )
    }

    #[tokio::test]
    async fn test_save_and_substring_lookup() {
        let repo = repo().await;
        repo.save_comparable(&comparable("patagonia better sweater", 45.99))
            .await
            .unwrap();
        repo.save_comparable(&comparable("patagonia nano puff", 52.00))
            .await
            .unwrap();
        repo.save_comparable(&comparable("levi 501 jeans", 28.99))
            .await
            .unwrap();

        let patagonia = repo.find_by_term("patagonia", 10).await.unwrap();
        assert_eq!(patagonia.len(), 2);

        let exact = repo.find_by_term("patagonia better sweater", 10).await.unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].total_price, 45.99);

        let none = repo.find_by_term("carhartt", 10).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_limit_caps_results() {
        let repo = repo().await;
        for price in [10.0, 12.0, 14.0, 16.0, 18.0] {
            repo.save_comparable(&comparable("nike hoodie", price))
                .await
                .unwrap();
        }
        let capped = repo.find_by_term("nike", 3).await.unwrap();
        assert_eq!(capped.len(), 3);
    }
}
