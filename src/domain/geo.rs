//! City normalization and tier lookup.
//!
//! The tier lists mirror the training data: membership buckets geographic
//! cost-of-living risk into three tiers. Lookup is exact-match against the
//! normalized (trimmed, title-cased) city name; normalization always runs
//! before lookup, so there are no case-sensitivity edge cases.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Tier-1 metros.
pub const TIER_1_CITIES: [&str; 7] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Hyderabad",
    "Pune",
];

/// Tier-2 secondary cities.
pub const TIER_2_CITIES: [&str; 48] = [
    "Jaipur",
    "Chandigarh",
    "Indore",
    "Lucknow",
    "Patna",
    "Ranchi",
    "Visakhapatnam",
    "Coimbatore",
    "Bhopal",
    "Nagpur",
    "Vadodara",
    "Surat",
    "Rajkot",
    "Jodhpur",
    "Raipur",
    "Amritsar",
    "Varanasi",
    "Agra",
    "Dehradun",
    "Mysore",
    "Jabalpur",
    "Guwahati",
    "Thiruvananthapuram",
    "Ludhiana",
    "Nashik",
    "Allahabad",
    "Udaipur",
    "Aurangabad",
    "Hubli",
    "Belgaum",
    "Salem",
    "Vijayawada",
    "Tiruchirappalli",
    "Bhavnagar",
    "Gwalior",
    "Dhanbad",
    "Bareilly",
    "Aligarh",
    "Gaya",
    "Kozhikode",
    "Warangal",
    "Kolhapur",
    "Bilaspur",
    "Jalandhar",
    "Noida",
    "Guntur",
    "Asansol",
    "Siliguri",
];

static TIER_1_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
static TIER_2_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn tier_1_set() -> &'static HashSet<&'static str> {
    TIER_1_SET.get_or_init(|| TIER_1_CITIES.iter().copied().collect())
}

fn tier_2_set() -> &'static HashSet<&'static str> {
    TIER_2_SET.get_or_init(|| TIER_2_CITIES.iter().copied().collect())
}

/// Normalize a raw city name: trim, collapse whitespace, title-case each word.
///
/// Idempotent: normalizing an already-normalized name is a no-op.
#[must_use]
pub fn normalize_city(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}

/// Tier of a normalized city name: 1 or 2 if listed, 3 otherwise.
#[must_use]
pub fn city_tier(normalized: &str) -> u8 {
    if tier_1_set().contains(normalized) {
        1
    } else if tier_2_set().contains(normalized) {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_title_cases() {
        assert_eq!(normalize_city("  new york  "), "New York");
        assert_eq!(normalize_city("mumbai"), "Mumbai");
        assert_eq!(normalize_city("HYDERABAD"), "Hyderabad");
        assert_eq!(normalize_city(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["  new york  ", "mumbai", "Smalltown", "tHIRUVANANTHAPURAM"] {
            let once = normalize_city(raw);
            assert_eq!(normalize_city(&once), once);
        }
    }

    #[test]
    fn test_tier_lookup() {
        assert_eq!(city_tier(&normalize_city("mumbai")), 1);
        assert_eq!(city_tier(&normalize_city("jaipur")), 2);
        assert_eq!(city_tier(&normalize_city("Smalltown")), 3);
    }

    #[test]
    fn test_every_listed_city_resolves_to_its_tier() {
        for city in TIER_1_CITIES {
            assert_eq!(city_tier(city), 1, "{city}");
            // Listed names must already be in canonical form.
            assert_eq!(normalize_city(city), city);
        }
        for city in TIER_2_CITIES {
            assert_eq!(city_tier(city), 2, "{city}");
            assert_eq!(normalize_city(city), city);
        }
    }

    #[test]
    fn test_unlisted_city_defaults_to_tier_3() {
        assert_eq!(city_tier("Gotham"), 3);
        assert_eq!(city_tier(""), 3);
    }
}
