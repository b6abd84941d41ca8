use std::collections::HashSet;

use crate::interpret::extract::DataPoint;

/// Lowercase letters only, so `Food:` and `food` compare equal.
pub fn label_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Order-preserving; the first occurrence wins. Repeated values go first,
/// then repeated labels among the survivors.
pub fn dedup_points(points: Vec<DataPoint>) -> Vec<DataPoint> {
    let mut seen_values = HashSet::new();
    let by_value: Vec<DataPoint> = points
        .into_iter()
        .filter(|p| seen_values.insert(p.value.to_bits()))
        .collect();

    let mut seen_labels = HashSet::new();
    by_value
        .into_iter()
        .filter(|p| seen_labels.insert(label_key(&p.label)))
        .collect()
}
