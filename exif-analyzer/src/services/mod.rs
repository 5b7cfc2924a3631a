//! Service modules for RAW metadata analysis
//!
//! - `file_scanner`: RAW file discovery
//! - `exiftool_client`: runs the external ExifTool binary
//! - `metadata_extractor`: ExifTool output → `FileRecord`
//! - `lens_normalizer`: merges lens name spellings
//! - `statistics`: ranked frequency tables

pub mod exiftool_client;
pub mod file_scanner;
pub mod lens_normalizer;
pub mod metadata_extractor;
pub mod statistics;

pub use exiftool_client::{ExifToolClient, ExifToolError};
pub use file_scanner::{FileScanner, ScanError, ScanResult};
pub use lens_normalizer::{normalize_lens_name, LensNormalizer};
pub use metadata_extractor::{parse_exif_output, ExifTag, MetadataExtractor};
pub use statistics::{FrequencyTable, GroupedFrequencyTable, PhotoStatistics, RankedEntry, TOP_N};
