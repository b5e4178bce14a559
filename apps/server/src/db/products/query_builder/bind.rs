use super::BindValue;

/// Marker written into fragments where a positional parameter goes.
pub(super) const PLACEHOLDER: char = '?';

/// Comma-separated placeholder list for `count` values, e.g. `?, ?, ?`.
pub(super) fn placeholder_list(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Number of placeholder markers in a fragment.
pub(super) fn count_placeholders(fragment: &str) -> usize {
    fragment.chars().filter(|c| *c == PLACEHOLDER).count()
}

/// Replace markers with `$n`, numbering from `next_index`.
///
/// Returns the rendered fragment and the next free index.
pub(super) fn render_placeholders(fragment: &str, mut next_index: usize) -> (String, usize) {
    let mut out = String::with_capacity(fragment.len() + 8);
    for c in fragment.chars() {
        if c == PLACEHOLDER {
            out.push('$');
            out.push_str(&next_index.to_string());
            next_index += 1;
        } else {
            out.push(c);
        }
    }
    (out, next_index)
}

pub(super) fn text_values(values: &[String]) -> Vec<BindValue> {
    values.iter().cloned().map(BindValue::Text).collect()
}
