use serde::{Deserialize, Serialize};
use std::fmt;

// Fixed linkage fields tying each result to the rectangle-labeling interface
pub const FROM_NAME: &str = "label";
pub const TO_NAME: &str = "image";
pub const RESULT_TYPE: &str = "rectanglelabels";
pub const ORIGIN: &str = "manual";

// Image dimensions in pixels, as read from the `size` node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub height: u32,
    pub width: u32,
}

// A bounding box expressed in percent of the image width and height
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
}

/// What the extractor found in one annotation record.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// No `size` node, so nothing can be normalized.
    MissingSize { filename: Option<String> },
    /// Size is known but the record has no `object` entries.
    MissingBoxes {
        filename: Option<String>,
        size: ImageSize,
    },
    /// Boxes were read but `filename` is absent or empty.
    MissingFilename {
        size: ImageSize,
        boxes: Vec<NormalizedBox>,
    },
    Ready {
        filename: String,
        size: ImageSize,
        boxes: Vec<NormalizedBox>,
    },
}

// Why a file produced no output document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyFile,
    MissingSize,
    MissingBoxes,
    MissingFilename,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::EmptyFile => "file is empty",
            SkipReason::MissingSize => "image size is missing",
            SkipReason::MissingBoxes => "no object entries",
            SkipReason::MissingFilename => "file name is missing",
        };
        f.write_str(reason)
    }
}

/// Label Studio task document, one per image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub data: ImageData,
    pub annotations: Vec<AnnotationGroup>,
    pub predictions: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationGroup {
    pub result: Vec<ResultRecord>,
}

// One labeled rectangle inside an annotation group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub original_width: u32,
    pub original_height: u32,
    pub image_rotation: u32,
    pub value: RectangleValue,
    pub id: String,
    pub from_name: String,
    pub to_name: String,
    #[serde(rename = "type")]
    pub result_type: String,
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleValue {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: u32,
    pub rectanglelabels: Vec<String>,
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total_files_processed: usize,
    pub successful_conversions: usize,
    pub skipped_empty_file: usize,
    pub skipped_missing_size: usize,
    pub skipped_missing_boxes: usize,
    pub skipped_missing_filename: usize,
    pub failed_conversions: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_total(&mut self) {
        self.total_files_processed += 1;
    }

    pub fn increment_successful(&mut self) {
        self.successful_conversions += 1;
    }

    pub fn increment_skipped(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::EmptyFile => self.skipped_empty_file += 1,
            SkipReason::MissingSize => self.skipped_missing_size += 1,
            SkipReason::MissingBoxes => self.skipped_missing_boxes += 1,
            SkipReason::MissingFilename => self.skipped_missing_filename += 1,
        }
    }

    pub fn increment_failed(&mut self) {
        self.failed_conversions += 1;
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped_empty_file
            + self.skipped_missing_size
            + self.skipped_missing_boxes
            + self.skipped_missing_filename
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Total files processed: {}", self.total_files_processed);
        log::info!("Successful conversions: {}", self.successful_conversions);
        log::info!("Failed conversions: {}", self.failed_conversions);

        let total_skipped = self.total_skipped();
        if total_skipped > 0 {
            log::warn!(
                "Total skipped files: {} (empty: {}, missing size: {}, no objects: {}, missing file name: {})",
                total_skipped,
                self.skipped_empty_file,
                self.skipped_missing_size,
                self.skipped_missing_boxes,
                self.skipped_missing_filename
            );
        }
    }
}
