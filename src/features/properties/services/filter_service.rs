use crate::features::properties::models::{Property, PropertyCategory};
use crate::shared::constants::REGION_SUBREGIONS;

/// Sparse search criteria; absent fields impose no constraint, present
/// fields AND together.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub category: Option<PropertyCategory>,
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub bhk_option: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
}

/// Evaluate every record against the criteria, preserving original relative
/// order. Sorting is the caller's business, never this function's.
pub fn apply(records: &[Property], criteria: &FilterCriteria) -> Vec<Property> {
    records
        .iter()
        .filter(|r| matches(r, criteria))
        .cloned()
        .collect()
}

fn matches(record: &Property, criteria: &FilterCriteria) -> bool {
    if let Some(category) = criteria.category {
        if record.category != category {
            return false;
        }
    }

    if let Some(location) = criteria.location.as_deref() {
        if !location.trim().is_empty() && !location_matches(&record.location, location) {
            return false;
        }
    }

    if let Some(property_type) = criteria.property_type.as_deref() {
        let want = property_type.trim();
        if !want.is_empty() && !record.property_type.trim().eq_ignore_ascii_case(want) {
            return false;
        }
    }

    if let Some(bhk) = criteria.bhk_option.as_deref() {
        let want = bhk.trim();
        if !want.is_empty() {
            let have = record.bhk_value().trim();
            if have.is_empty() || have != want {
                return false;
            }
        }
    }

    let min = criteria.price_min.as_deref().and_then(parse_price);
    let max = criteria.price_max.as_deref().and_then(parse_price);
    if min.is_some() || max.is_some() {
        match parse_price(&record.price) {
            Some(price) => {
                if let Some(min) = min {
                    if price < min {
                        return false;
                    }
                }
                if let Some(max) = max {
                    if price > max {
                        return false;
                    }
                }
            }
            None => {
                // Unparsable price never matches a range bound. Flagged for
                // product-owner confirmation; see DESIGN.md.
                tracing::debug!(
                    "Excluding property {} from price-bounded search, unparsable price {:?}",
                    record.id,
                    record.price
                );
                return false;
            }
        }
    }

    true
}

/// Match a filter value against the comma-segments of a record location.
///
/// Exact (case-insensitive) segment equality is a hit. A filter value that
/// names a configured region matches any record containing one of that
/// region's sub-regions as a segment.
fn location_matches(record_location: &str, filter: &str) -> bool {
    let needle = filter.trim();
    let segments: Vec<&str> = record_location.split(',').map(str::trim).collect();

    if segments.iter().any(|s| s.eq_ignore_ascii_case(needle)) {
        return true;
    }

    if let Some(subregions) = REGION_SUBREGIONS.get(needle.to_lowercase().as_str()) {
        return segments.iter().any(|segment| {
            let segment = segment.to_lowercase();
            subregions.iter().any(|sub| segment == *sub)
        });
    }

    false
}

/// Normalize a free-form Indian price string to an absolute rupee value.
///
/// Strips the currency symbol and thousands separators; a trailing
/// "Cr"/"Crore" multiplies by 10^7, "L"/"Lakh" by 10^5; bare digits are the
/// absolute value. Returns None when no number can be extracted.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned = raw
        .trim()
        .to_lowercase()
        .replace('₹', "")
        .replace("rs.", "")
        .replace("rs", "")
        .replace(',', "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return None;
    }

    let (number_part, multiplier) = if let Some(p) = cleaned.strip_suffix("crore") {
        (p, 10_000_000.0)
    } else if let Some(p) = cleaned.strip_suffix("cr") {
        (p, 10_000_000.0)
    } else if let Some(p) = cleaned.strip_suffix("lakh") {
        (p, 100_000.0)
    } else if let Some(p) = cleaned.strip_suffix('l') {
        (p, 100_000.0)
    } else {
        (cleaned, 1.0)
    };

    let value: f64 = number_part.trim().parse().ok()?;
    Some(value * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_property;

    fn listing(title: &str, price: &str, location: &str) -> Property {
        sample_property(title, price, location)
    }

    #[test]
    fn parse_price_handles_unit_markers_and_separators() {
        assert_eq!(parse_price("1.2 Cr"), Some(12_000_000.0));
        assert_eq!(parse_price("45 L"), Some(4_500_000.0));
        assert_eq!(parse_price("₹ 1,25,00,000"), Some(12_500_000.0));
        assert_eq!(parse_price("2 Crore"), Some(20_000_000.0));
        assert_eq!(parse_price("95 Lakh"), Some(9_500_000.0));
        assert_eq!(parse_price("8500000"), Some(8_500_000.0));
    }

    #[test]
    fn parse_price_rejects_non_numeric_strings() {
        assert_eq!(parse_price("Price on request"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("₹"), None);
    }

    #[test]
    fn empty_criteria_match_everything_in_order() {
        let records = vec![
            listing("A", "50 L", "Bhimtal, Uttarakhand"),
            listing("B", "1 Cr", "Nainital, Uttarakhand"),
        ];

        let result = apply(&records, &FilterCriteria::default());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "A");
        assert_eq!(result[1].title, "B");
    }

    #[test]
    fn category_filter_is_exact() {
        let mut records = vec![
            listing("Buyable", "50 L", "Bhimtal, Uttarakhand"),
            listing("Leasable", "50 L", "Bhimtal, Uttarakhand"),
        ];
        records[1].category = PropertyCategory::Lease;

        let criteria = FilterCriteria {
            category: Some(PropertyCategory::Lease),
            ..Default::default()
        };

        let result = apply(&records, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Leasable");
    }

    #[test]
    fn location_matches_any_comma_segment_case_insensitively() {
        let records = vec![listing("A", "50 L", "Jones Estate, Bhimtal, Uttarakhand")];

        let hit = FilterCriteria {
            location: Some("bhimtal".to_string()),
            ..Default::default()
        };
        let miss = FilterCriteria {
            location: Some("Nainital".to_string()),
            ..Default::default()
        };

        assert_eq!(apply(&records, &hit).len(), 1);
        assert_eq!(apply(&records, &miss).len(), 0);
    }

    #[test]
    fn region_alias_matches_records_in_any_configured_subregion() {
        let records = vec![
            listing("Hill", "50 L", "Mukteshwar"),
            listing("Lake", "60 L", "Sattal, Nainital district"),
            listing("Plains", "40 L", "Greater Noida"),
        ];

        let criteria = FilterCriteria {
            location: Some("Uttarakhand".to_string()),
            ..Default::default()
        };

        let result = apply(&records, &criteria);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Hill");
        assert_eq!(result[1].title, "Lake");
    }

    #[test]
    fn exact_subregion_filter_does_not_widen_to_the_region() {
        let records = vec![
            listing("A", "50 L", "Bhimtal, Uttarakhand"),
            listing("B", "60 L", "Mukteshwar, Uttarakhand"),
        ];

        let criteria = FilterCriteria {
            location: Some("Bhimtal".to_string()),
            ..Default::default()
        };

        let result = apply(&records, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "A");
    }

    #[test]
    fn property_type_is_case_insensitive_exact_match() {
        let mut records = vec![
            listing("A", "50 L", "Bhimtal, Uttarakhand"),
            listing("B", "60 L", "Bhimtal, Uttarakhand"),
        ];
        records[0].property_type = "Villa".to_string();
        records[1].property_type = "villa plot".to_string();

        let criteria = FilterCriteria {
            property_type: Some("villa".to_string()),
            ..Default::default()
        };

        let result = apply(&records, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "A");
    }

    #[test]
    fn bhk_compares_specs_bedrooms_with_legacy_fallback() {
        let mut records = vec![
            listing("Specs", "50 L", "Bhimtal, Uttarakhand"),
            listing("Legacy", "60 L", "Bhimtal, Uttarakhand"),
            listing("Neither", "70 L", "Bhimtal, Uttarakhand"),
        ];
        records[0].specs.bedrooms = "3".to_string();
        records[1].bedrooms = Some("3 ".to_string());

        let criteria = FilterCriteria {
            bhk_option: Some(" 3".to_string()),
            ..Default::default()
        };

        let result = apply(&records, &criteria);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Specs");
        assert_eq!(result[1].title, "Legacy");
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let records = vec![
            listing("Low", "40 L", "Bhimtal, Uttarakhand"),
            listing("Edge", "50 L", "Bhimtal, Uttarakhand"),
            listing("High", "1.2 Cr", "Bhimtal, Uttarakhand"),
        ];

        let criteria = FilterCriteria {
            price_min: Some("5000000".to_string()),
            price_max: Some("12000000".to_string()),
            ..Default::default()
        };

        let result = apply(&records, &criteria);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Edge");
        assert_eq!(result[1].title, "High");
    }

    #[test]
    fn unparsable_price_is_excluded_only_under_price_bounds() {
        let records = vec![listing("Coy", "Price on request", "Bhimtal, Uttarakhand")];

        let unbounded = FilterCriteria::default();
        let bounded = FilterCriteria {
            price_max: Some("10000000".to_string()),
            ..Default::default()
        };

        assert_eq!(apply(&records, &unbounded).len(), 1);
        assert_eq!(apply(&records, &bounded).len(), 0);
    }

    #[test]
    fn adding_a_criterion_never_grows_the_result() {
        let mut records = vec![
            listing("A", "50 L", "Bhimtal, Uttarakhand"),
            listing("B", "95 L", "Nainital, Uttarakhand"),
            listing("C", "1.5 Cr", "Mukteshwar, Uttarakhand"),
        ];
        records[1].specs.bedrooms = "2".to_string();

        let base = FilterCriteria {
            location: Some("Uttarakhand".to_string()),
            ..Default::default()
        };
        let narrowed = FilterCriteria {
            location: Some("Uttarakhand".to_string()),
            price_max: Some("9500000".to_string()),
            ..Default::default()
        };
        let narrowest = FilterCriteria {
            location: Some("Uttarakhand".to_string()),
            price_max: Some("9500000".to_string()),
            bhk_option: Some("2".to_string()),
            ..Default::default()
        };

        let n0 = apply(&records, &base).len();
        let n1 = apply(&records, &narrowed).len();
        let n2 = apply(&records, &narrowest).len();

        assert!(n1 <= n0);
        assert!(n2 <= n1);
        assert_eq!(n2, 1);
    }

    #[test]
    fn scenario_buy_listing_in_bhimtal() {
        let records = vec![listing("Scenario", "₹ 95,00,000", "Bhimtal, Uttarakhand")];

        let by_budget = FilterCriteria {
            category: Some(PropertyCategory::Buy),
            price_max: Some("10000000".to_string()),
            ..Default::default()
        };
        let too_rich = FilterCriteria {
            price_min: Some("10000000".to_string()),
            ..Default::default()
        };
        let by_region = FilterCriteria {
            location: Some("Uttarakhand".to_string()),
            ..Default::default()
        };

        assert_eq!(apply(&records, &by_budget).len(), 1);
        assert_eq!(apply(&records, &too_rich).len(), 0);
        assert_eq!(apply(&records, &by_region).len(), 1);
    }
}
