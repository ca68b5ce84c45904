//! Sequence utilities: deduplication, grouping, reductions and chunking.
//!
//! Every function borrows its input and returns a new `Vec`; nothing here
//! mutates or aliases the caller's slice.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;
use std::iter::Sum;

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

use crate::error::CommonError;
use crate::mapping::{scalar_key, JsonMap};
use crate::truthy::Truthy;

/// Key used by [`group_by_field`] for items without the field.
pub const MISSING_GROUP_KEY: &str = "null";

/// Arbitrarily nested sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

impl<T> From<T> for Nested<T> {
    fn from(item: T) -> Self {
        Self::Item(item)
    }
}

/// Removes later duplicates, keeping first-seen order.
///
/// # Examples
///
/// ```
/// use snipkit_common::sequence::remove_duplicates;
///
/// assert_eq!(remove_duplicates(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
/// ```
pub fn remove_duplicates<T>(items: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Returns a shuffled copy using the thread-local RNG.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Returns a shuffled copy using the given RNG (uniform Fisher-Yates).
pub fn shuffle_with<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Partitions items by the key returned from `key_fn`.
///
/// Items keep their relative order within each group.
pub fn group_by<T, K, F>(items: &[T], key_fn: F) -> BTreeMap<K, Vec<T>>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(item.clone());
    }
    groups
}

/// Groups JSON objects by the string form of `field`.
///
/// Group keys appear in first-seen order. Items that are not objects, lack
/// the field, or hold a non-scalar value there fall under
/// [`MISSING_GROUP_KEY`].
pub fn group_by_field(items: &[Value], field: &str) -> JsonMap {
    let mut groups = JsonMap::new();
    for item in items {
        let key = item
            .get(field)
            .and_then(|value| scalar_key(value).ok())
            .unwrap_or_else(|| MISSING_GROUP_KEY.to_string());

        let group = groups
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(members) = group {
            members.push(item.clone());
        }
    }
    groups
}

/// Flattens a nested sequence to a single ordered `Vec`, at any depth.
pub fn flatten<T: Clone>(nested: &[Nested<T>]) -> Vec<T> {
    fn walk<T: Clone>(nodes: &[Nested<T>], out: &mut Vec<T>) {
        for node in nodes {
            match node {
                Nested::Item(item) => out.push(item.clone()),
                Nested::List(children) => walk(children, out),
            }
        }
    }

    let mut flat = Vec::new();
    walk(nested, &mut flat);
    flat
}

/// Flattens nested JSON arrays. A non-array value yields itself.
pub fn flatten_json(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.iter().flat_map(flatten_json).collect(),
        other => vec![other.clone()],
    }
}

/// Number of distinct elements.
pub fn count_unique<T: Eq + Hash>(items: &[T]) -> usize {
    items.iter().collect::<HashSet<_>>().len()
}

/// Sum of all elements; zero for an empty slice.
pub fn sum<T>(items: &[T]) -> T
where
    T: Copy + Sum<T>,
{
    items.iter().copied().sum()
}

/// Largest element.
///
/// # Errors
///
/// Returns [`CommonError::EmptyInput`] for an empty slice. Incomparable
/// values (NaN) are skipped unless every element is incomparable.
pub fn max<T: PartialOrd + Copy>(items: &[T]) -> Result<T, CommonError> {
    reduce_by(items, "max", |candidate, best| candidate > best)
}

/// Smallest element.
///
/// # Errors
///
/// Returns [`CommonError::EmptyInput`] for an empty slice.
pub fn min<T: PartialOrd + Copy>(items: &[T]) -> Result<T, CommonError> {
    reduce_by(items, "min", |candidate, best| candidate < best)
}

fn reduce_by<T, F>(items: &[T], op: &'static str, wins: F) -> Result<T, CommonError>
where
    T: PartialOrd + Copy,
    F: Fn(&T, &T) -> bool,
{
    let (first, rest) = items.split_first().ok_or(CommonError::EmptyInput(op))?;
    let mut best = *first;
    for item in rest {
        // Only NaN-like values fail to compare with themselves
        let best_is_incomparable = best.partial_cmp(&best).is_none();
        if wins(item, &best) || best_is_incomparable {
            best = *item;
        }
    }
    Ok(best)
}

/// Numeric types that [`average`] can widen to `f64`.
///
/// 64-bit and pointer-sized integers lose precision above 2^53.
pub trait AsF64: Copy {
    fn as_f64(self) -> f64;
}

macro_rules! impl_as_f64 {
    ($($t:ty),*) => {
        $(impl AsF64 for $t {
            fn as_f64(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_as_f64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Arithmetic mean.
///
/// # Errors
///
/// Returns [`CommonError::EmptyInput`] for an empty slice.
pub fn average<T: AsF64>(items: &[T]) -> Result<f64, CommonError> {
    if items.is_empty() {
        return Err(CommonError::EmptyInput("average"));
    }
    let total: f64 = items.iter().map(|item| item.as_f64()).sum();
    Ok(total / items.len() as f64)
}

/// Splits into consecutive groups of at most `size`; the last may be shorter.
///
/// # Errors
///
/// Returns [`CommonError::InvalidChunkSize`] when `size` is zero.
///
/// # Examples
///
/// ```
/// use snipkit_common::sequence::chunk;
///
/// let chunks = chunk(&[1, 2, 3, 4, 5], 2).unwrap();
/// assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>, CommonError> {
    if size == 0 {
        return Err(CommonError::InvalidChunkSize(size));
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// Drops every falsy element as defined by [`Truthy`].
pub fn remove_falsy<T: Truthy + Clone>(items: &[T]) -> Vec<T> {
    remove_falsy_by(items, Truthy::is_truthy)
}

/// Keeps only the elements for which `keep` returns true.
pub fn remove_falsy_by<T, F>(items: &[T], keep: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    items.iter().filter(|item| keep(item)).cloned().collect()
}

/// Elements of `a` that do not appear in `b`, in `a`'s order.
pub fn difference<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().filter(|item| !b.contains(item)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_remove_duplicates_keeps_first_occurrence() {
        let deduped = remove_duplicates(&["b", "a", "b", "c", "a"]);
        assert_eq!(deduped, vec!["b", "a", "c"]);
        assert_eq!(count_unique(&deduped), deduped.len());
    }

    #[test]
    fn test_remove_duplicates_empty() {
        assert!(remove_duplicates::<i32>(&[]).is_empty());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle(&items);
        assert_eq!(shuffled.len(), items.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_shuffle_with_seed_is_deterministic() {
        let items: Vec<u32> = (0..20).collect();
        let a = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        let b = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        // Input is left untouched
        assert_eq!(items, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_group_by_preserves_order_within_groups() {
        let words = ["apple", "bob", "avocado", "banana", "cherry"];
        let groups = group_by(&words, |w| w.chars().next());
        assert_eq!(groups[&Some('a')], vec!["apple", "avocado"]);
        assert_eq!(groups[&Some('b')], vec!["bob", "banana"]);
        assert_eq!(groups[&Some('c')], vec!["cherry"]);
    }

    #[test]
    fn test_group_by_field() {
        let people = vec![
            json!({"name": "Ana", "city": "Recife"}),
            json!({"name": "Bia", "city": "Natal"}),
            json!({"name": "Caio", "city": "Recife"}),
            json!({"name": "Duda"}),
        ];
        let groups = group_by_field(&people, "city");

        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, vec!["Recife", "Natal", "null"]);
        assert_eq!(groups["Recife"], json!([people[0], people[2]]));
        assert_eq!(groups["null"], json!([people[3]]));
    }

    #[test]
    fn test_group_by_field_numeric_values() {
        let rows = vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 1})];
        let groups = group_by_field(&rows, "n");
        assert_eq!(groups["1"].as_array().map(Vec::len), Some(2));
        assert_eq!(groups["2"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_flatten_unbounded_depth() {
        let nested = vec![
            Nested::Item(1),
            Nested::List(vec![
                Nested::Item(2),
                Nested::List(vec![Nested::List(vec![Nested::Item(3)]), Nested::Item(4)]),
            ]),
            Nested::List(vec![]),
            5.into(),
        ];
        assert_eq!(flatten(&nested), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flatten_json() {
        let value = json!([1, [2, [3, [4]], "x"], {"k": [5]}]);
        assert_eq!(
            flatten_json(&value),
            vec![json!(1), json!(2), json!(3), json!(4), json!("x"), json!({"k": [5]})]
        );
    }

    #[test]
    fn test_reductions() {
        let values = [4, -2, 9, 0];
        assert_eq!(sum(&values), 11);
        assert_eq!(max(&values), Ok(9));
        assert_eq!(min(&values), Ok(-2));
        assert_eq!(average(&values), Ok(2.75));
        assert_eq!(count_unique(&[1, 1, 2, 3, 3]), 3);
    }

    #[test]
    fn test_average_of_wide_integers() {
        assert_eq!(average(&[1i64, 2, 3, 4]), Ok(2.5));
        assert_eq!(average(&[10u64, 20]), Ok(15.0));
        assert_eq!(average(&[3usize, 4, 5]), Ok(4.0));
        assert_eq!(average(&[0.5f32, 1.5]), Ok(1.0));
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        assert_eq!(sum::<i64>(&[]), 0);
        assert_eq!(sum::<f64>(&[]), 0.0);
    }

    #[test]
    fn test_reductions_on_empty_input_fail() {
        assert_eq!(max::<i32>(&[]), Err(CommonError::EmptyInput("max")));
        assert_eq!(min::<f64>(&[]), Err(CommonError::EmptyInput("min")));
        assert_eq!(average::<u8>(&[]), Err(CommonError::EmptyInput("average")));
    }

    #[test]
    fn test_float_reductions_skip_nan() {
        let values = [f64::NAN, 1.5, 3.0, f64::NAN, -1.0];
        assert_eq!(max(&values), Ok(3.0));
        assert_eq!(min(&values), Ok(-1.0));
    }

    #[test]
    fn test_chunk() {
        assert_eq!(
            chunk(&[1, 2, 3, 4, 5], 2),
            Ok(vec![vec![1, 2], vec![3, 4], vec![5]])
        );
        assert_eq!(chunk(&[1, 2], 5), Ok(vec![vec![1, 2]]));
        assert_eq!(chunk::<i32>(&[], 3), Ok(Vec::<Vec<i32>>::new()));
    }

    #[test]
    fn test_chunk_zero_size_fails() {
        assert_eq!(chunk(&[1, 2, 3], 0), Err(CommonError::InvalidChunkSize(0)));
    }

    #[test]
    fn test_remove_falsy() {
        assert_eq!(remove_falsy(&[0, 1, 0, 2]), vec![1, 2]);
        assert_eq!(remove_falsy(&["", "a", ""]), vec!["a"]);
        assert_eq!(remove_falsy(&[Some(3), None, Some(0)]), vec![Some(3)]);

        let mixed = vec![json!(null), json!(0), json!("x"), json!(false), json!([])];
        assert_eq!(remove_falsy(&mixed), vec![json!("x"), json!([])]);
    }

    #[test]
    fn test_remove_falsy_by_predicate() {
        let evens = remove_falsy_by(&[1, 2, 3, 4], |n| n % 2 == 0);
        assert_eq!(evens, vec![2, 4]);
    }

    #[test]
    fn test_difference() {
        assert_eq!(difference(&[1, 2, 3, 4, 2], &[2, 5]), vec![1, 3, 4]);
        assert_eq!(difference(&["a"], &[]), vec!["a"]);
    }
}
