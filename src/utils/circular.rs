//! Circular index arithmetic over a ring of `n` contacts.
//!
//! Every rotating component addresses its contacts modulo the number of
//! symbols. These helpers normalize any signed index into `[0, n)` so that
//! negative offsets wrap the same way positive ones do.

/// Normalizes `index` into `[0, n)` (Euclidean modulo).
///
/// # Parameters
/// - `index`: Any signed index, including negatives.
/// - `n`: Ring size. A ring of size 0 maps everything to 0.
///
/// # Returns
/// The wrapped index.
pub fn normalize(index: i64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    index.rem_euclid(n as i64) as usize
}

/// Shifts `index` by a signed `shift` around a ring of size `n`.
///
/// # Parameters
/// - `index`: Contact index (need not be normalized).
/// - `shift`: Signed displacement.
/// - `n`: Ring size.
///
/// # Returns
/// `(index + shift) mod n`, normalized into `[0, n)`.
pub fn offset(index: usize, shift: i64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let base = (index % n) as i64;
    normalize(base + shift.rem_euclid(n as i64), n)
}

/// Moves `index` forward by an unsigned `steps` around a ring of size `n`.
///
/// Both terms are reduced modulo `n` before adding, so any `steps` up to
/// `usize::MAX` wraps without overflow.
pub fn forward(index: usize, steps: usize, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let sum = (index % n) as u128 + (steps % n) as u128;
    (sum % n as u128) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_positive() {
        assert_eq!(normalize(0, 26), 0);
        assert_eq!(normalize(25, 26), 25);
        assert_eq!(normalize(26, 26), 0);
        assert_eq!(normalize(53, 26), 1);
    }

    #[test]
    fn test_normalize_negative() {
        assert_eq!(normalize(-1, 26), 25);
        assert_eq!(normalize(-26, 26), 0);
        assert_eq!(normalize(-27, 26), 25);
        assert_eq!(normalize(-3, 10), 7);
    }

    #[test]
    fn test_normalize_empty_ring() {
        assert_eq!(normalize(5, 0), 0);
        assert_eq!(offset(5, 3, 0), 0);
    }

    #[test]
    fn test_forward_large_steps() {
        assert_eq!(forward(0, usize::MAX, 26), usize::MAX % 26);
        assert_eq!(forward(25, usize::MAX, 26), (25 + usize::MAX % 26) % 26);
        assert_eq!(forward(usize::MAX, usize::MAX, 7), (2 * (usize::MAX % 7)) % 7);
        assert_eq!(forward(4, 30, 26), 8);
        assert_eq!(forward(4, 30, 0), 0);
    }

    #[test]
    fn test_offset_wraps_both_ways() {
        assert_eq!(offset(25, 1, 26), 0);
        assert_eq!(offset(0, -1, 26), 25);
        assert_eq!(offset(30, 0, 26), 4);
        assert_eq!(offset(3, i64::MIN, 26), normalize(3 + i64::MIN.rem_euclid(26), 26));
    }
}
