use lazy_static::lazy_static;
use std::collections::HashMap;

/// Maximum size for a single uploaded file in bytes (50MB, videos included)
pub const MAX_UPLOAD_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Files larger than this are plausibly video when MIME and extension say nothing
pub const VIDEO_SIZE_HEURISTIC_BYTES: usize = 1024 * 1024;

/// Multipart field name carrying the JSON record payload
pub const RECORD_FIELD_NAME: &str = "data";

lazy_static! {
    /// Region name -> known sub-region names used by the location filter.
    ///
    /// A filter value equal to a region key matches any record whose location
    /// contains one of the listed sub-regions as a comma-segment. Static
    /// configuration, not user data.
    pub static ref REGION_SUBREGIONS: HashMap<&'static str, &'static [&'static str]> = {
        let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        m.insert(
            "uttarakhand",
            &[
                "bhimtal",
                "nainital",
                "bhowali",
                "sattal",
                "naukuchiatal",
                "mukteshwar",
                "ramgarh",
                "haldwani",
                "almora",
                "ranikhet",
                "dehradun",
                "mussoorie",
                "rishikesh",
                "haridwar",
                "pangot",
            ][..],
        );
        m
    };
}
