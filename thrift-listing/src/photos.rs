//! Photo set planning for listings.
//!
//! The actual pixel work (background removal, enhancement, resizing) is an
//! external service; this module owns the pure parts: locating an item's
//! photos, grouping a directory by SKU, and laying out output names.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thrift_core::sku;

/// File extensions accepted as photos (lowercase, no dot).
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "bmp", "tiff"];

/// Output variants planned for every source photo.
pub const OUTPUT_VARIANTS: [&str; 3] = ["main", "square", "thumb"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Find all photos for one SKU under `dir` (recursive). A photo belongs to
/// the SKU when its filename contains the SKU, case-insensitively.
pub fn find_item_photos(item_sku: &str, dir: &Path) -> io::Result<Vec<PathBuf>> {
    let needle = item_sku.to_uppercase();
    let mut photos = Vec::new();
    walk(dir, &mut |path| {
        if is_supported(path) {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_uppercase();
            if name.contains(&needle) {
                photos.push(path.to_path_buf());
            }
        }
    })?;
    photos.sort();
    Ok(photos)
}

/// Result of scanning a photo directory for recognizable SKUs.
#[derive(Debug, Clone, Serialize)]
pub struct BatchScan {
    pub total_photos: usize,
    pub by_sku: BTreeMap<String, Vec<PathBuf>>,
    pub unmatched: usize,
}

/// Group every photo under `dir` by the SKU embedded in its filename.
pub fn scan_directory(dir: &Path) -> io::Result<BatchScan> {
    let mut by_sku: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    let mut total = 0usize;
    let mut unmatched = 0usize;

    walk(dir, &mut |path| {
        if !is_supported(path) {
            return;
        }
        total += 1;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        match sku::extract_from_filename(name) {
            Some(found) => by_sku.entry(found).or_default().push(path.to_path_buf()),
            None => unmatched += 1,
        }
    })?;

    for photos in by_sku.values_mut() {
        photos.sort();
    }

    Ok(BatchScan {
        total_photos: total,
        by_sku,
        unmatched,
    })
}

/// Planned output files for one source photo.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedOutput {
    pub source: PathBuf,
    /// `{sku}_{nn}` naming keeps outputs sorted by shot order.
    pub base_name: String,
    pub variants: Vec<String>,
}

/// The full processing plan handed to the photo pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoPlan {
    pub sku: String,
    pub output_dir: PathBuf,
    pub outputs: Vec<PlannedOutput>,
}

/// Lay out output names for an item's photos under `output_dir/{sku}/`.
pub fn plan_processing(item_sku: &str, photos: &[PathBuf], output_dir: &Path) -> PhotoPlan {
    let outputs = photos
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let base_name = format!("{}_{:02}", item_sku, index + 1);
            PlannedOutput {
                source: source.clone(),
                variants: OUTPUT_VARIANTS
                    .iter()
                    .map(|variant| format!("{}_{}.jpg", base_name, variant))
                    .collect(),
                base_name,
            }
        })
        .collect();

    PhotoPlan {
        sku: item_sku.to_string(),
        output_dir: output_dir.join(item_sku),
        outputs,
    }
}

/// Shot checklist shown before photographing an item.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoGuide {
    pub category: String,
    pub shots: Vec<&'static str>,
    pub general_tips: Vec<&'static str>,
}

/// Category-specific photo checklists; unknown categories get the generic
/// set.
pub fn shot_checklist(category: &str) -> PhotoGuide {
    let shots: &[&str] = match category.to_lowercase().as_str() {
        "clothing" => &[
            "Front view on flat surface or hanger",
            "Back view showing any patterns or details",
            "Close-up of brand label/tag",
            "Close-up of any flaws or wear",
            "Detail shots of unique features (buttons, zippers, etc.)",
        ],
        "electronics" => &[
            "Overall product view",
            "Screen/display (if applicable)",
            "All included accessories",
            "Brand label/model number",
            "Any ports, buttons, or controls",
            "Signs of wear or damage",
        ],
        "home" => &[
            "Overall product view",
            "Close-up of brand/maker marks",
            "Detail of materials/textures",
            "Any flaws or damage",
            "Size reference (with ruler/coin)",
        ],
        "books" => &[
            "Front cover",
            "Back cover",
            "Spine showing title",
            "Copyright page",
            "Any damage to pages or binding",
        ],
        "toys" => &[
            "Overall toy view",
            "All included pieces",
            "Brand markings/labels",
            "Moving parts or features",
            "Any wear or missing pieces",
        ],
        _ => &[
            "Overall product view",
            "Close-up of brand markings",
            "Any flaws or damage",
            "Size reference",
        ],
    };

    PhotoGuide {
        category: category.to_lowercase(),
        shots: shots.to_vec(),
        general_tips: vec![
            "Use natural, indirect lighting",
            "Shoot against a clean, neutral background",
            "Fill the frame with the item",
            "Take more photos than you plan to use",
        ],
    }
}

fn walk(dir: &Path, visit: &mut impl FnMut(&Path)) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, visit)?;
        } else {
            visit(&path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn temp_photo_dir(files: &[&str]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "thrift-photos-test-{}",
            uuid::Uuid::new_v4().simple()
        ));
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            File::create(dir.join(file)).unwrap();
        }
        dir
    }

    #[test]
    fn test_find_item_photos_filters_by_sku_and_extension() {
        let dir = temp_photo_dir(&[
            "25-0001_front.jpg",
            "25-0001_back.PNG",
            "25-0002_front.jpg",
            "25-0001_notes.txt",
        ]);
        let photos = find_item_photos("25-0001", &dir).unwrap();
        assert_eq!(photos.len(), 2);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_scan_directory_groups_by_sku() {
        let dir = temp_photo_dir(&[
            "25-0001_front.jpg",
            "25-0001_back.jpg",
            "ab-123_main.jpg",
            "IMG_2032.jpg",
        ]);
        let scan = scan_directory(&dir).unwrap();
        assert_eq!(scan.total_photos, 4);
        assert_eq!(scan.by_sku.get("25-0001").map(Vec::len), Some(2));
        assert_eq!(scan.by_sku.get("AB-123").map(Vec::len), Some(1));
        assert_eq!(scan.unmatched, 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_plan_processing_layout() {
        let photos = vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")];
        let plan = plan_processing("25-0001", &photos, Path::new("processed"));
        assert_eq!(plan.output_dir, Path::new("processed/25-0001"));
        assert_eq!(plan.outputs.len(), 2);
        assert_eq!(plan.outputs[0].base_name, "25-0001_01");
        assert_eq!(plan.outputs[1].variants[2], "25-0001_02_thumb.jpg");
    }

    #[test]
    fn test_shot_checklist_tables() {
        assert_eq!(shot_checklist("Books").shots.len(), 5);
        assert_eq!(shot_checklist("electronics").shots.len(), 6);
        assert_eq!(shot_checklist("Garden Tools").shots.len(), 4);
        assert!(!shot_checklist("clothing").general_tips.is_empty());
    }
}
