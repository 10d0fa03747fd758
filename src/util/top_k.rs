//! Top-K selection over a frequency table
//!
//! Keeps a working set of at most `k` keys while walking the table in its
//! insertion order. Once the set is full, a candidate only displaces the
//! current minimum if its value is strictly larger, so among equal values the
//! key seen first stays selected.
//!
//! The result is in working-set order, not sorted by value. A displaced slot is
//! overwritten in place, which is observable in the output.

use indexmap::IndexMap;
use std::hash::Hash;

/// Return up to `k` keys with the largest values
///
/// # Example
///
/// ```
/// use indexmap::IndexMap;
/// use peoplestats::util::top_k::select_top_k;
///
/// let freq: IndexMap<&str, u64> = [("a", 5), ("b", 9), ("c", 1), ("d", 9), ("e", 2)]
///     .into_iter()
///     .collect();
/// assert_eq!(select_top_k(3, &freq), vec!["a", "b", "d"]);
/// ```
pub fn select_top_k<K, V>(k: usize, frequencies: &IndexMap<K, V>) -> Vec<K>
where
    K: Clone + Eq + Hash,
    V: PartialOrd + Copy,
{
    let mut selected: Vec<(&K, V)> = Vec::with_capacity(k.min(frequencies.len()));
    // Position of the smallest selected value, computed lazily once the set is full
    let mut min_pos: Option<usize> = None;

    for (key, &value) in frequencies {
        if selected.len() < k {
            selected.push((key, value));
            continue;
        }
        if selected.is_empty() {
            break;
        }

        let pos = *min_pos.get_or_insert_with(|| position_of_min(&selected));
        if value > selected[pos].1 {
            selected[pos] = (key, value);
            min_pos = Some(position_of_min(&selected));
        }
    }

    selected.into_iter().map(|(key, _)| key.clone()).collect()
}

/// First position holding the smallest value
fn position_of_min<K, V: PartialOrd + Copy>(selected: &[(&K, V)]) -> usize {
    let mut min = 0;
    for (i, (_, value)) in selected.iter().enumerate().skip(1) {
        if *value < selected[min].1 {
            min = i;
        }
    }
    min
}
