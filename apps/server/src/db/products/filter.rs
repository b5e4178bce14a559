//! Product filter specification.
//!
//! A [`ProductFilter`] is the validated form of the listing filters. Every list
//! is trimmed, stripped of empty entries and deduplicated; typed lists only keep
//! entries that parse. An empty list means "no constraint" for that field.

use crate::models::{DegreeOfProtection, Product, ProductId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Explicit id allow-list (`ids`).
    pub ids: Vec<ProductId>,
    pub category_ids: Vec<ProductId>,
    pub connector_types: Vec<String>,
    pub codes: Vec<String>,
    pub degrees_of_protection: Vec<DegreeOfProtection>,
    pub pins: Vec<i32>,
    pub genders: Vec<String>,
    /// Only products flagged in stock (`inStock=true`).
    pub in_stock_only: bool,
    /// Free-text term, already trimmed and non-empty.
    pub search: Option<String>,
}

impl ProductFilter {
    /// True when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
            && self.category_ids.is_empty()
            && self.connector_types.is_empty()
            && self.codes.is_empty()
            && self.degrees_of_protection.is_empty()
            && self.pins.is_empty()
            && self.genders.is_empty()
            && !self.in_stock_only
            && self.search.is_none()
    }

    /// Number of active constraints, for logging without exposing values.
    pub fn active_constraints(&self) -> usize {
        [
            !self.ids.is_empty(),
            !self.category_ids.is_empty(),
            !self.connector_types.is_empty(),
            !self.codes.is_empty(),
            !self.degrees_of_protection.is_empty(),
            !self.pins.is_empty(),
            !self.genders.is_empty(),
            self.in_stock_only,
            self.search.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Evaluate the filter against an in-memory product.
    ///
    /// Mirrors the SQL produced by the query builder: exact list membership,
    /// rating-set overlap, and case-insensitive substring search where absent
    /// optional fields never match.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.ids.is_empty() && !self.ids.contains(&product.id) {
            return false;
        }
        if !self.category_ids.is_empty()
            && !product
                .category_id
                .is_some_and(|id| self.category_ids.contains(&id))
        {
            return false;
        }
        if !matches_text(&self.connector_types, product.connector_type.as_deref()) {
            return false;
        }
        if !matches_text(&self.codes, product.code.as_deref()) {
            return false;
        }
        if !matches_text(&self.genders, product.gender.as_deref()) {
            return false;
        }
        if !self.pins.is_empty() && !product.pins.is_some_and(|pins| self.pins.contains(&pins)) {
            return false;
        }
        if !self.degrees_of_protection.is_empty()
            && !product
                .degree_of_protection
                .iter()
                .any(|rating| self.degrees_of_protection.contains(rating))
        {
            return false;
        }
        if self.in_stock_only && !product.in_stock {
            return false;
        }
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            let hit = |field: Option<&str>| field.is_some_and(|v| v.to_lowercase().contains(&needle));
            if !(hit(Some(&product.name))
                || hit(Some(&product.sku))
                || hit(product.description.as_deref())
                || hit(product.manufacturer_part_number.as_deref()))
            {
                return false;
            }
        }
        true
    }
}

fn matches_text(allowed: &[String], value: Option<&str>) -> bool {
    allowed.is_empty() || value.is_some_and(|v| allowed.iter().any(|a| a == v))
}

/// Split a comma-separated parameter into trimmed, non-empty, unique entries.
pub fn split_list(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !out.iter().any(|seen| seen == part) {
            out.push(part.to_string());
        }
    }
    out
}

/// Split and parse a comma-separated parameter, dropping entries that fail to parse.
///
/// Returns the parsed values and the number of dropped entries.
pub fn split_parsed<T, F>(raw: &str, parse: F) -> (Vec<T>, usize)
where
    T: PartialEq,
    F: Fn(&str) -> Option<T>,
{
    let mut out = Vec::new();
    let mut dropped = 0;
    for part in split_list(raw) {
        match parse(&part) {
            Some(value) if !out.contains(&value) => out.push(value),
            Some(_) => {}
            None => dropped += 1,
        }
    }
    (out, dropped)
}

/// Merge `extra` into `target`, keeping first-occurrence order and uniqueness.
pub(crate) fn extend_unique<T: PartialEq>(target: &mut Vec<T>, extra: Vec<T>) {
    for value in extra {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}
