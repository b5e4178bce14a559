//! Product listing parameter parsing
//!
//! Turns raw query-string items into a [`ProductQuery`]. Parsing never fails:
//! malformed values are coerced to a safe default or dropped.
//!
//! | Parameter            | Effect                                        |
//! |----------------------|-----------------------------------------------|
//! | `limit`              | page size, clamped to `1..=max`               |
//! | `cursor`             | last id of the previous page                  |
//! | `ids`, `categoryId`  | comma-separated ids, malformed entries dropped |
//! | `connectorType`, `code`, `gender` | comma-separated exact matches    |
//! | `degreeOfProtection` | comma-separated IP ratings                    |
//! | `pins`               | comma-separated integers                      |
//! | `inStock`            | `"true"` restricts to stocked products        |
//! | `search`             | case-insensitive partial match                |
//! | `includeTotal`       | `"true"` adds the cursor-independent total    |

use super::filter::{extend_unique, split_list, split_parsed, ProductFilter};
use crate::config::ProductsConfig;
use crate::models::{protection, ProductId};

/// Privilege of the caller, decided from a verified session only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Public,
    Admin,
}

impl ProductsConfig {
    /// Largest page size the caller may request.
    pub fn max_limit_for(&self, access: AccessLevel) -> usize {
        match access {
            AccessLevel::Public => self.public_max_limit,
            AccessLevel::Admin => self.admin_max_limit,
        }
    }
}

/// Validated product listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    /// Page size, always within `1..=max_limit_for(access)`.
    pub limit: usize,
    /// Keyset cursor: only ids strictly greater are returned.
    pub cursor: Option<ProductId>,
    pub include_total: bool,
}

impl ProductQuery {
    /// Parse query-string items.
    ///
    /// Repeated list parameters accumulate; repeated scalar parameters keep the
    /// last occurrence.
    pub fn from_items(
        items: &[(String, String)],
        limits: &ProductsConfig,
        access: AccessLevel,
    ) -> Self {
        let mut filter = ProductFilter::default();
        let mut raw_limit: Option<&str> = None;
        let mut cursor: Option<ProductId> = None;
        let mut include_total = false;
        let mut dropped = 0usize;

        for (name, value) in items {
            match name.as_str() {
                "limit" => raw_limit = Some(value.as_str()),
                "cursor" => {
                    cursor = ProductId::parse(value);
                    if cursor.is_none() && !value.trim().is_empty() {
                        dropped += 1;
                    }
                }
                "ids" => {
                    let (ids, bad) = split_parsed(value, ProductId::parse);
                    extend_unique(&mut filter.ids, ids);
                    dropped += bad;
                }
                "categoryId" => {
                    let (ids, bad) = split_parsed(value, ProductId::parse);
                    extend_unique(&mut filter.category_ids, ids);
                    dropped += bad;
                }
                "connectorType" => extend_unique(&mut filter.connector_types, split_list(value)),
                "code" => extend_unique(&mut filter.codes, split_list(value)),
                "gender" => extend_unique(&mut filter.genders, split_list(value)),
                "degreeOfProtection" => {
                    let ratings = protection::decode_set(value);
                    dropped += split_list(value).len().saturating_sub(ratings.len());
                    extend_unique(&mut filter.degrees_of_protection, ratings);
                }
                "pins" => {
                    let (pins, bad) = split_parsed(value, |s| s.parse::<i32>().ok());
                    extend_unique(&mut filter.pins, pins);
                    dropped += bad;
                }
                "inStock" => filter.in_stock_only = value == "true",
                "search" => {
                    let term = value.trim();
                    filter.search = (!term.is_empty()).then(|| term.to_string());
                }
                "includeTotal" => include_total = value == "true",
                _ => {}
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, "Ignored malformed product filter entries");
        }

        Self {
            filter,
            limit: clamp_limit(raw_limit, limits, access),
            cursor,
            include_total,
        }
    }
}

/// Resolve the requested page size.
///
/// Missing or non-numeric values fall back to the configured default; numeric
/// values are clamped into `1..=max`, never rejected.
pub fn clamp_limit(raw: Option<&str>, limits: &ProductsConfig, access: AccessLevel) -> usize {
    let max = limits.max_limit_for(access).max(1);
    let Some(raw) = raw.map(str::trim) else {
        return limits.default_limit.clamp(1, max);
    };
    match raw.parse::<i64>() {
        Ok(requested) => requested.clamp(1, max as i64) as usize,
        // Integers too large for i64 still clamp instead of falling back.
        Err(_) if is_integer_literal(raw) => {
            if raw.starts_with('-') {
                1
            } else {
                max
            }
        }
        Err(_) => limits.default_limit.clamp(1, max),
    }
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DegreeOfProtection;

    const ID_A: &str = "00000000-0000-0000-0000-00000000000a";
    const ID_B: &str = "00000000-0000-0000-0000-00000000000b";

    fn items(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn parse(pairs: &[(&str, &str)]) -> ProductQuery {
        ProductQuery::from_items(&items(pairs), &ProductsConfig::default(), AccessLevel::Public)
    }

    #[test]
    fn defaults_when_no_parameters() {
        let query = parse(&[]);
        assert_eq!(query.limit, 10);
        assert!(query.cursor.is_none());
        assert!(!query.include_total);
        assert!(query.filter.is_empty());
    }

    #[test]
    fn limit_is_clamped_for_public_callers() {
        assert_eq!(parse(&[("limit", "999999")]).limit, 100);
        assert_eq!(parse(&[("limit", "0")]).limit, 1);
        assert_eq!(parse(&[("limit", "-5")]).limit, 1);
        assert_eq!(parse(&[("limit", "25")]).limit, 25);
        assert_eq!(parse(&[("limit", "abc")]).limit, 10);
        assert_eq!(parse(&[("limit", "")]).limit, 10);
        assert_eq!(parse(&[("limit", "99999999999999999999999")]).limit, 100);
        assert_eq!(parse(&[("limit", "-99999999999999999999999")]).limit, 1);
    }

    #[test]
    fn admin_cap_applies_only_to_admin_access() {
        let limits = ProductsConfig::default();
        assert_eq!(clamp_limit(Some("999999"), &limits, AccessLevel::Admin), 10_000);
        assert_eq!(clamp_limit(Some("5000"), &limits, AccessLevel::Admin), 5000);
        assert_eq!(clamp_limit(Some("5000"), &limits, AccessLevel::Public), 100);
    }

    #[test]
    fn client_supplied_admin_flag_is_ignored() {
        let query = parse(&[("limit", "5000"), ("admin", "true"), ("isAdmin", "1")]);
        assert_eq!(query.limit, 100);
    }

    #[test]
    fn malformed_cursor_is_treated_as_absent() {
        assert!(parse(&[("cursor", "p2")]).cursor.is_none());
        assert!(parse(&[("cursor", "")]).cursor.is_none());
        assert_eq!(
            parse(&[("cursor", ID_A)]).cursor,
            ProductId::parse(ID_A)
        );
    }

    #[test]
    fn malformed_ids_are_dropped() {
        let raw = format!("{ID_A}, not-an-id,{ID_B},{ID_A},,1 OR 1=1");
        let query = parse(&[("ids", raw.as_str())]);
        assert_eq!(
            query.filter.ids,
            vec![ProductId::parse(ID_A).unwrap(), ProductId::parse(ID_B).unwrap()]
        );
    }

    #[test]
    fn all_malformed_ids_leave_no_constraint() {
        let query = parse(&[("ids", "x,y"), ("categoryId", "z")]);
        assert!(query.filter.ids.is_empty());
        assert!(query.filter.category_ids.is_empty());
        assert!(query.filter.is_empty());
    }

    #[test]
    fn list_filters_are_split_and_trimmed() {
        let query = parse(&[
            ("connectorType", "M12, M8,"),
            ("code", "A,,D"),
            ("gender", " female "),
            ("pins", "4,x,8"),
            ("degreeOfProtection", "ip67,IP99,IP68"),
        ]);
        assert_eq!(query.filter.connector_types, vec!["M12", "M8"]);
        assert_eq!(query.filter.codes, vec!["A", "D"]);
        assert_eq!(query.filter.genders, vec!["female"]);
        assert_eq!(query.filter.pins, vec![4, 8]);
        assert_eq!(
            query.filter.degrees_of_protection,
            vec![DegreeOfProtection::Ip67, DegreeOfProtection::Ip68]
        );
    }

    #[test]
    fn empty_list_values_are_neutral() {
        let query = parse(&[("connectorType", ""), ("pins", " , "), ("gender", ",")]);
        assert!(query.filter.is_empty());
    }

    #[test]
    fn repeated_list_parameters_accumulate() {
        let query = parse(&[("connectorType", "M12"), ("connectorType", "M8,M12")]);
        assert_eq!(query.filter.connector_types, vec!["M12", "M8"]);
    }

    #[test]
    fn in_stock_requires_literal_true() {
        assert!(parse(&[("inStock", "true")]).filter.in_stock_only);
        assert!(!parse(&[("inStock", "false")]).filter.in_stock_only);
        assert!(!parse(&[("inStock", "1")]).filter.in_stock_only);
        assert!(!parse(&[("inStock", "TRUE")]).filter.in_stock_only);
    }

    #[test]
    fn search_is_trimmed_and_blank_ignored() {
        assert_eq!(
            parse(&[("search", "  m12 ")]).filter.search.as_deref(),
            Some("m12")
        );
        assert!(parse(&[("search", "   ")]).filter.search.is_none());
    }

    #[test]
    fn include_total_requires_literal_true() {
        assert!(parse(&[("includeTotal", "true")]).include_total);
        assert!(!parse(&[("includeTotal", "yes")]).include_total);
    }
}
