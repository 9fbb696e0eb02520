//! Duplicate detection over substitution arrays.

/// A repeated value found in an array.
///
/// Reported once per repeat occurrence: an array holding the same value
/// three times yields two records, both pointing back at the first
/// occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplicate {
    /// Position of the repeat occurrence.
    pub position: usize,
    /// The repeated value.
    pub value: usize,
    /// Position where the value first appeared.
    pub first_position: usize,
}

/// Finds every repeated value in `values`.
///
/// # Parameters
/// - `values`: The array to scan.
///
/// # Returns
/// One [`Duplicate`] per repeat occurrence, in position order. An empty
/// result means every value is distinct.
pub fn find_duplicates(values: &[usize]) -> Vec<Duplicate> {
    let mut first_seen: std::collections::HashMap<usize, usize> =
        std::collections::HashMap::with_capacity(values.len());
    let mut found = Vec::new();
    for (position, &value) in values.iter().enumerate() {
        match first_seen.get(&value) {
            Some(&first_position) => found.push(Duplicate {
                position,
                value,
                first_position,
            }),
            None => {
                first_seen.insert(value, position);
            }
        }
    }
    found
}
