use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use thrift_catalog::repository::{ItemFilter, ItemRepository};
use thrift_catalog::{Condition, InventoryItem, ItemStatus};
use uuid::Uuid;

const ITEM_COLUMNS: &str = "id, sku, category, brand, name, size, color, condition, cost, \
     suggested_price, listed_price, sold_price, listing_fee, final_value_fee, processing_fee, \
     total_fees, gross_profit, net_profit, roi_percentage, status, photo_paths, \
     processed_photos, ebay_listing_id, created_at, updated_at, listed_at, sold_at";

pub struct SqliteItemRepository {
    pool: Pool<Sqlite>,
}

impl SqliteItemRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn insert_item(
        &self,
        item: &InventoryItem,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO items (
                id, sku, category, brand, name, size, color, condition, cost,
                suggested_price, listed_price, sold_price, listing_fee, final_value_fee,
                processing_fee, total_fees, gross_profit, net_profit, roi_percentage,
                status, photo_paths, processed_photos, ebay_listing_id,
                created_at, updated_at, listed_at, sold_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.id.to_string())
        .bind(&item.sku)
        .bind(&item.category)
        .bind(&item.brand)
        .bind(&item.name)
        .bind(&item.size)
        .bind(&item.color)
        .bind(item.condition.label())
        .bind(item.cost)
        .bind(item.suggested_price)
        .bind(item.listed_price)
        .bind(item.sold_price)
        .bind(item.listing_fee)
        .bind(item.final_value_fee)
        .bind(item.processing_fee)
        .bind(item.total_fees)
        .bind(item.gross_profit)
        .bind(item.net_profit)
        .bind(item.roi_percentage)
        .bind(item.status.as_str())
        .bind(serde_json::to_string(&item.photo_paths)?)
        .bind(serde_json::to_string(&item.processed_photos)?)
        .bind(&item.ebay_listing_id)
        .bind(item.created_at.to_rfc3339())
        .bind(item.updated_at.to_rfc3339())
        .bind(item.listed_at.map(|t| t.to_rfc3339()))
        .bind(item.sold_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        Ok(item.id)
    }

    async fn get_item_by_sku(
        &self,
        sku: &str,
    ) -> Result<Option<InventoryItem>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query(&format!("SELECT {} FROM items WHERE sku = ?", ITEM_COLUMNS))
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| item_from_row(&row)).transpose()
    }

    async fn list_items(
        &self,
        filter: &ItemFilter,
    ) -> Result<Vec<InventoryItem>, Box<dyn std::error::Error + Send + Sync>> {
        let mut sql = format!("SELECT {} FROM items", ITEM_COLUMNS);
        let mut clauses = Vec::new();
        if filter.status.is_some() {
            clauses.push("status = ?");
        }
        if filter.category.is_some() {
            clauses.push("category = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at");

        let mut query = sqlx::query(&sql);
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }
        if let Some(category) = &filter.category {
            query = query.bind(category.clone());
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(item_from_row).collect()
    }

    async fn update_item(
        &self,
        item: &InventoryItem,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            UPDATE items SET
                category = ?, brand = ?, name = ?, size = ?, color = ?, condition = ?,
                cost = ?, suggested_price = ?, listed_price = ?, sold_price = ?,
                listing_fee = ?, final_value_fee = ?, processing_fee = ?, total_fees = ?,
                gross_profit = ?, net_profit = ?, roi_percentage = ?, status = ?,
                photo_paths = ?, processed_photos = ?, ebay_listing_id = ?,
                updated_at = ?, listed_at = ?, sold_at = ?
            WHERE sku = ?
            "#,
        )
        .bind(&item.category)
        .bind(&item.brand)
        .bind(&item.name)
        .bind(&item.size)
        .bind(&item.color)
        .bind(item.condition.label())
        .bind(item.cost)
        .bind(item.suggested_price)
        .bind(item.listed_price)
        .bind(item.sold_price)
        .bind(item.listing_fee)
        .bind(item.final_value_fee)
        .bind(item.processing_fee)
        .bind(item.total_fees)
        .bind(item.gross_profit)
        .bind(item.net_profit)
        .bind(item.roi_percentage)
        .bind(item.status.as_str())
        .bind(serde_json::to_string(&item.photo_paths)?)
        .bind(serde_json::to_string(&item.processed_photos)?)
        .bind(&item.ebay_listing_id)
        .bind(Utc::now().to_rfc3339())
        .bind(item.listed_at.map(|t| t.to_rfc3339()))
        .bind(item.sold_at.map(|t| t.to_rfc3339()))
        .bind(&item.sku)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn item_from_row(row: &SqliteRow) -> Result<InventoryItem, Box<dyn std::error::Error + Send + Sync>> {
    let condition: String = row.try_get("condition")?;
    let status: String = row.try_get("status")?;
    let photo_paths: String = row.try_get("photo_paths")?;
    let processed_photos: String = row.try_get("processed_photos")?;
    let id: String = row.try_get("id")?;

    Ok(InventoryItem {
        id: Uuid::parse_str(&id)?,
        sku: row.try_get("sku")?,
        category: row.try_get("category")?,
        brand: row.try_get("brand")?,
        name: row.try_get("name")?,
        size: row.try_get("size")?,
        color: row.try_get("color")?,
        condition: condition.parse::<Condition>()?,
        cost: row.try_get("cost")?,
        suggested_price: row.try_get("suggested_price")?,
        listed_price: row.try_get("listed_price")?,
        sold_price: row.try_get("sold_price")?,
        listing_fee: row.try_get("listing_fee")?,
        final_value_fee: row.try_get("final_value_fee")?,
        processing_fee: row.try_get("processing_fee")?,
        total_fees: row.try_get("total_fees")?,
        gross_profit: row.try_get("gross_profit")?,
        net_profit: row.try_get("net_profit")?,
        roi_percentage: row.try_get("roi_percentage")?,
        status: status.parse::<ItemStatus>()?,
        photo_paths: serde_json::from_str(&photo_paths)?,
        processed_photos: serde_json::from_str(&processed_photos)?,
        ebay_listing_id: row.try_get("ebay_listing_id")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
        listed_at: parse_optional_timestamp(row.try_get("listed_at")?)?,
        sold_at: parse_optional_timestamp(row.try_get("sold_at")?)?,
    })
}

pub(crate) fn parse_timestamp(
    raw: &str,
) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

pub(crate) fn parse_optional_timestamp(
    raw: Option<String>,
) -> Result<Option<DateTime<Utc>>, Box<dyn std::error::Error + Send + Sync>> {
    raw.as_deref().map(parse_timestamp).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbClient;
    use thrift_catalog::SaleRecord;

    async fn repo() -> SqliteItemRepository {
        let db = DbClient::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        SqliteItemRepository::new(db.pool)
    }

    fn sample_item(sku: &str) -> InventoryItem {
        let mut item = InventoryItem::new(
            sku.to_string(),
            "Clothing".to_string(),
            "Patagonia".to_string(),
            "Better Sweater".to_string(),
            8.50,
            Condition::VeryGood,
        );
        item.size = Some("M".to_string());
        item.photo_paths = vec!["photos/25-0001_front.jpg".to_string()];
        item
    }

    #[tokio::test]
    async fn test_insert_and_fetch_round_trip() {
        let repo = repo().await;
        let item = sample_item("25-0001");
        repo.insert_item(&item).await.unwrap();

        let fetched = repo.get_item_by_sku("25-0001").await.unwrap().unwrap();
        assert_eq!(fetched.id, item.id);
        assert_eq!(fetched.condition, Condition::VeryGood);
        assert_eq!(fetched.cost, 8.50);
        assert_eq!(fetched.photo_paths, item.photo_paths);
        assert_eq!(
            fetched.created_at.timestamp(),
            item.created_at.timestamp()
        );

        assert!(repo.get_item_by_sku("99-9999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let repo = repo().await;
        repo.insert_item(&sample_item("25-0001")).await.unwrap();

        let mut listed = sample_item("25-0002");
        listed.mark_listed(24.99).unwrap();
        repo.insert_item(&listed).await.unwrap();

        let mut other_category = sample_item("25-0003");
        other_category.category = "Electronics".to_string();
        repo.insert_item(&other_category).await.unwrap();

        let all = repo.list_items(&ItemFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let listed_only = repo
            .list_items(&ItemFilter {
                status: Some(ItemStatus::Listed),
                category: None,
            })
            .await
            .unwrap();
        assert_eq!(listed_only.len(), 1);
        assert_eq!(listed_only[0].sku, "25-0002");

        let clothing = repo
            .list_items(&ItemFilter {
                status: None,
                category: Some("Clothing".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(clothing.len(), 2);
    }

    #[tokio::test]
    async fn test_update_persists_sale() {
        let repo = repo().await;
        let mut item = sample_item("25-0001");
        repo.insert_item(&item).await.unwrap();

        item.mark_listed(24.99).unwrap();
        item.record_sale(SaleRecord {
            sold_price: 24.99,
            listing_fee: 0.0,
            final_value_fee: 2.50,
            processing_fee: 1.02,
            total_fees: 3.52,
            gross_profit: 16.49,
            net_profit: 12.97,
            roi_percentage: 152.6,
        })
        .unwrap();
        repo.update_item(&item).await.unwrap();

        let fetched = repo.get_item_by_sku("25-0001").await.unwrap().unwrap();
        assert_eq!(fetched.status, ItemStatus::Sold);
        assert_eq!(fetched.sold_price, Some(24.99));
        assert_eq!(fetched.net_profit, Some(12.97));
        assert!(fetched.sold_at.is_some());
    }
}
