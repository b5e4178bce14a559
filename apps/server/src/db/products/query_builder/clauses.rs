//! Predicate constructors, one per filter kind.
//!
//! Each constructor returns `None` when its input would constrain nothing, so
//! empty lists never turn into an always-false clause.

use super::bind::{placeholder_list, text_values};
use super::{BindValue, Predicate};
use crate::models::{protection, DegreeOfProtection, ProductId};

/// `column IN (?, ...)` over product identifiers.
pub(super) fn id_in(column: &str, ids: &[ProductId]) -> Option<Predicate> {
    if ids.is_empty() {
        return None;
    }
    let values = ids.iter().map(|id| BindValue::Uuid(id.as_uuid())).collect();
    Some(Predicate::new(
        format!("{column} IN ({})", placeholder_list(ids.len())),
        values,
    ))
}

/// `column IN (?, ...)` over exact text values.
pub(super) fn text_in(column: &str, values: &[String]) -> Option<Predicate> {
    if values.is_empty() {
        return None;
    }
    Some(Predicate::new(
        format!("{column} IN ({})", placeholder_list(values.len())),
        text_values(values),
    ))
}

pub(super) fn int_in(column: &str, values: &[i32]) -> Option<Predicate> {
    if values.is_empty() {
        return None;
    }
    Some(Predicate::new(
        format!("{column} IN ({})", placeholder_list(values.len())),
        values.iter().copied().map(BindValue::Int).collect(),
    ))
}

/// Ratings are stored comma-joined; a product matches when any stored rating
/// is among the requested ones.
pub(super) fn protection_overlap(
    column: &str,
    ratings: &[DegreeOfProtection],
) -> Option<Predicate> {
    if ratings.is_empty() {
        return None;
    }
    let values = ratings
        .iter()
        .map(|r| BindValue::Text(r.as_str().to_string()))
        .collect();
    Some(Predicate::new(
        format!(
            "({column} IS NOT NULL AND EXISTS (SELECT 1 FROM unnest(string_to_array({column}, '{sep}')) AS dop(rating) WHERE upper(btrim(dop.rating)) IN ({list})))",
            sep = protection::COLUMN_SEPARATOR,
            list = placeholder_list(ratings.len()),
        ),
        values,
    ))
}

pub(super) fn is_true(column: &str) -> Predicate {
    Predicate::new(format!("{column} = ?"), vec![BindValue::Bool(true)])
}

/// Case-insensitive partial match across the searchable columns.
///
/// `nullable` columns are guarded so a NULL never reaches `ILIKE`.
pub(super) fn search_any(
    term: &str,
    required: &[&str],
    nullable: &[&str],
) -> Option<Predicate> {
    let term = term.trim();
    if term.is_empty() || (required.is_empty() && nullable.is_empty()) {
        return None;
    }
    let pattern = format!("%{}%", escape_like(term));

    let mut parts = Vec::with_capacity(required.len() + nullable.len());
    for column in required {
        parts.push(format!("{column} ILIKE ? ESCAPE '\\'"));
    }
    for column in nullable {
        parts.push(format!(
            "({column} IS NOT NULL AND {column} ILIKE ? ESCAPE '\\')"
        ));
    }
    let values = vec![BindValue::Text(pattern); parts.len()];

    Some(Predicate::new(format!("({})", parts.join(" OR ")), values))
}

/// Keyset cursor: rows strictly after the given id.
pub(super) fn after_cursor(column: &str, cursor: ProductId) -> Predicate {
    Predicate::new(
        format!("{column} > ?"),
        vec![BindValue::Uuid(cursor.as_uuid())],
    )
}

/// Escape `LIKE` metacharacters so the term matches literally.
pub(super) fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
        assert_eq!(escape_like("m12"), "m12");
    }

    #[test]
    fn empty_inputs_produce_no_predicate() {
        assert!(id_in("p.id", &[]).is_none());
        assert!(text_in("p.code", &[]).is_none());
        assert!(int_in("p.pins", &[]).is_none());
        assert!(protection_overlap("p.degree_of_protection", &[]).is_none());
        assert!(search_any("  ", &["p.name"], &[]).is_none());
    }

    #[test]
    fn search_guards_nullable_columns() {
        let predicate = search_any("m12", &["p.name"], &["p.description"]).unwrap();
        assert_eq!(
            predicate.fragment(),
            "(p.name ILIKE ? ESCAPE '\\' OR (p.description IS NOT NULL AND p.description ILIKE ? ESCAPE '\\'))"
        );
        assert_eq!(predicate.values().len(), 2);
        assert!(matches!(&predicate.values()[0], BindValue::Text(p) if p == "%m12%"));
    }

    #[test]
    fn protection_overlap_binds_canonical_names() {
        let predicate = protection_overlap(
            "p.degree_of_protection",
            &[DegreeOfProtection::Ip67, DegreeOfProtection::Ip69K],
        )
        .unwrap();
        assert!(predicate.fragment().contains("string_to_array(p.degree_of_protection, ',')"));
        assert!(predicate.fragment().ends_with("IN (?, ?)))"));
        assert!(matches!(&predicate.values()[1], BindValue::Text(v) if v == "IP69K"));
    }
}
