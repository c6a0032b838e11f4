//! Inventory exporters: eBay bulk-upload CSV and JSON (standard and
//! browser-automation layouts).

use crate::generator::truncate_title;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use thrift_catalog::{InventoryItem, ItemStatus};

/// Flat-rate shipping defaults baked into draft exports; sellers adjust
/// per-listing on upload.
const SHIPPING_SERVICE: &str = "USPSPriority";
const SHIPPING_COST: &str = "12.99";
const DISPATCH_DAYS: &str = "1";
const LOCATION: &str = "United States";

const EBAY_CSV_HEADERS: [&str; 27] = [
    "Action(SiteID=US|Country=US|Currency=USD|Version=1193)",
    "Category",
    "Title",
    "Description",
    "PicURL",
    "Quantity",
    "Format",
    "Duration",
    "StartPrice",
    "BuyItNowPrice",
    "ReservePrice",
    "ImmediatePayRequired",
    "PayPalEmailAddress",
    "ShippingType",
    "ShipToLocations",
    "ShippingService-1:Option",
    "ShippingService-1:Cost",
    "DispatchTimeMax",
    "Location",
    "ConditionID",
    "ConditionDescription",
    "Brand",
    "Size",
    "Color",
    "ReturnPolicy.ReturnsAcceptedOption",
    "ReturnPolicy.ReturnsWithinOption",
    "ReturnPolicy.ShippingCostPaidByOption",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("export serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Filters applied before exporting.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub include_sold: bool,
    pub category: Option<String>,
}

/// What an export run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub count: usize,
    pub path: PathBuf,
    pub exported_at: String,
}

/// Export inventory to eBay's bulk-upload CSV format.
pub fn export_ebay_csv(
    items: &[InventoryItem],
    path: &Path,
    opts: &ExportOptions,
) -> Result<ExportReport, ExportError> {
    let selected = select_items(items, opts);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = fs::File::create(path)?;
    writeln!(file, "{}", csv_line(&EBAY_CSV_HEADERS.map(String::from)))?;
    for item in &selected {
        writeln!(file, "{}", csv_line(&ebay_csv_row(item)))?;
    }

    Ok(ExportReport {
        count: selected.len(),
        path: path.to_path_buf(),
        exported_at: Utc::now().to_rfc3339(),
    })
}

/// Export inventory as JSON; `automation` selects the layout consumed by
/// the browser-automation flow instead of the plain dump.
pub fn export_json(
    items: &[InventoryItem],
    path: &Path,
    opts: &ExportOptions,
    automation: bool,
) -> Result<ExportReport, ExportError> {
    let selected = select_items(items, opts);
    let exported_at = Utc::now().to_rfc3339();

    let payload = if automation {
        json!({
            "export_metadata": {
                "created_at": exported_at,
                "total_items": selected.len(),
                "purpose": "browser_automation",
            },
            "listings": selected.iter().map(|item| automation_listing(item)).collect::<Vec<_>>(),
        })
    } else {
        json!({
            "export_metadata": {
                "created_at": exported_at,
                "total_items": selected.len(),
            },
            "items": selected,
        })
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(&payload)?)?;

    Ok(ExportReport {
        count: selected.len(),
        path: path.to_path_buf(),
        exported_at,
    })
}

fn select_items<'a>(items: &'a [InventoryItem], opts: &ExportOptions) -> Vec<&'a InventoryItem> {
    items
        .iter()
        .filter(|item| opts.include_sold || item.status != ItemStatus::Sold)
        .filter(|item| match &opts.category {
            Some(category) => item.category.eq_ignore_ascii_case(category),
            None => true,
        })
        .collect()
}

/// Brand, name, size, color. No condition; that goes into its own column.
fn export_title(item: &InventoryItem) -> String {
    let mut title = item.display_name();
    if let Some(size) = &item.size {
        title.push_str(&format!(" Size {}", size));
    }
    if let Some(color) = &item.color {
        title.push_str(&format!(" {}", color));
    }
    truncate_title(&title, 80)
}

fn export_price(item: &InventoryItem) -> String {
    item.listed_price
        .or(item.suggested_price)
        .map(|price| format!("{:.2}", price))
        .unwrap_or_default()
}

fn export_description(item: &InventoryItem) -> String {
    let mut description = format!(
        "<p><strong>Brand:</strong> {}</p>\
         <p><strong>Item:</strong> {}</p>\
         <p><strong>Condition:</strong> {}</p>",
        item.brand, item.name, item.condition
    );
    if let Some(size) = &item.size {
        description.push_str(&format!("<p><strong>Size:</strong> {}</p>", size));
    }
    if let Some(color) = &item.color {
        description.push_str(&format!("<p><strong>Color:</strong> {}</p>", color));
    }
    description.push_str(
        "<p>Please see photos for exact condition and details.</p>\
         <p>Fast shipping! We ship within 1 business day.</p>\
         <p>Returns accepted within 30 days.</p>",
    );
    description
}

fn ebay_csv_row(item: &InventoryItem) -> [String; 27] {
    [
        "Add".to_string(),
        String::new(), // category resolved by the marketplace
        export_title(item),
        export_description(item),
        String::new(), // photos uploaded separately
        "1".to_string(),
        "FixedPrice".to_string(),
        "GTC".to_string(),
        String::new(),
        export_price(item),
        String::new(),
        "1".to_string(),
        String::new(),
        "Flat".to_string(),
        "US".to_string(),
        SHIPPING_SERVICE.to_string(),
        SHIPPING_COST.to_string(),
        DISPATCH_DAYS.to_string(),
        LOCATION.to_string(),
        item.condition.ebay_condition_id().to_string(),
        item.condition.to_string(),
        item.brand.clone(),
        item.size.clone().unwrap_or_default(),
        item.color.clone().unwrap_or_default(),
        "ReturnsAccepted".to_string(),
        "Days_30".to_string(),
        "Buyer".to_string(),
    ]
}

fn automation_listing(item: &InventoryItem) -> serde_json::Value {
    json!({
        "sku": item.sku,
        "title": export_title(item),
        "category": item.category,
        "brand": item.brand,
        "condition": item.condition.to_string(),
        "price": item.listed_price.or(item.suggested_price),
        "description": {
            "brand": item.brand,
            "name": item.name,
            "size": item.size,
            "color": item.color,
            "condition": item.condition.to_string(),
        },
        "shipping": {
            "method": "USPS Priority Mail",
            "cost": 12.99,
            "handling_time": 1,
        },
        "return_policy": {
            "returns_accepted": true,
            "return_period": 30,
            "return_shipping_paid_by": "Buyer",
        },
        "photos": {
            "paths": item.processed_photos,
            "upload_required": true,
        },
    })
}

/// Quote fields that contain separators, quotes, or newlines; double any
/// embedded quotes.
fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| {
            if field.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
