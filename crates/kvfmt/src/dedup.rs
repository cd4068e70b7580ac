//! Key deduplication across layered key/value lists.

use std::collections::HashSet;

use crate::Value;

/// Remove duplicate keys from a group of key/value lists, keeping each item
/// in the list it came from.
///
/// Later lists take precedence over earlier ones, and within a list a later
/// pair takes precedence over an earlier pair with the same key. Lists are
/// walked last to first and pairs end to start; the first occurrence of a key
/// met this way is kept and every other occurrence is dropped. Survivors keep
/// their original forward order.
///
/// A list of odd length ends with a key that has no value. That key is
/// deduplicated like any other and, if it survives, stays unpaired at the end
/// of its output list.
pub fn trim_duplicates<L>(lists: &[L]) -> Vec<Vec<Value>>
where
    L: AsRef<[Value]>,
{
    let mut seen = HashSet::new();
    let mut outs = vec![Vec::new(); lists.len()];
    for (list, out) in lists.iter().zip(outs.iter_mut()).rev() {
        let mut kept = Vec::new();
        for pair in list.as_ref().chunks(2).rev() {
            let Some(key) = pair.first() else { continue };
            if seen.insert(key.identity()) {
                kept.push(pair);
            }
        }
        *out = kept.into_iter().rev().flatten().cloned().collect();
    }
    outs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kvs;

    #[test]
    fn unique_keys_unchanged() {
        let list = kvs!["a", 1, "b", "two", "c", 3.5];
        assert_eq!(trim_duplicates(&[list.clone()]), vec![list]);
    }

    #[test]
    fn later_list_wins() {
        let a = kvs!["x", 1, "y", 2];
        let b = kvs!["x", 3];
        let out = trim_duplicates(&[a, b]);
        assert_eq!(out, vec![kvs!["y", 2], kvs!["x", 3]]);
    }

    #[test]
    fn later_pair_in_same_list_wins() {
        let out = trim_duplicates(&[kvs!["k", 1, "j", 2, "k", 3]]);
        assert_eq!(out, vec![kvs!["j", 2, "k", 3]]);
    }

    #[test]
    fn order_is_preserved() {
        let out = trim_duplicates(&[kvs!["k1", "v1", "k2", "v2", "k3", "v3"]]);
        let keys: Vec<String> = out[0].iter().step_by(2).map(ToString::to_string).collect();
        assert_eq!(keys, ["k1", "k2", "k3"]);
    }

    #[test]
    fn empty_lists() {
        let out = trim_duplicates::<Vec<Value>>(&[vec![], vec![]]);
        assert_eq!(out, vec![Vec::<Value>::new(), Vec::new()]);
        assert!(trim_duplicates::<Vec<Value>>(&[]).is_empty());
    }

    #[test]
    fn all_duplicates_empty_the_earlier_list() {
        let out = trim_duplicates(&[kvs!["a", 1, "b", 2], kvs!["b", 3, "a", 4]]);
        assert_eq!(out, vec![vec![], kvs!["b", 3, "a", 4]]);
    }

    #[test]
    fn three_layers() {
        let out = trim_duplicates(&[
            kvs!["a", 1, "b", 1, "c", 1],
            kvs!["b", 2, "c", 2],
            kvs!["c", 3],
        ]);
        assert_eq!(out, vec![kvs!["a", 1], kvs!["b", 2], kvs!["c", 3]]);
    }

    #[test]
    fn odd_length_keeps_unpaired_key() {
        let out = trim_duplicates(&[kvs!["a", 1, "b"]]);
        assert_eq!(out, vec![kvs!["a", 1, "b"]]);
    }

    #[test]
    fn unpaired_key_dedups_with_paired_key() {
        // The unpaired key in the later list wins.
        let out = trim_duplicates(&[kvs!["b", 2], kvs!["a", 1, "b"]]);
        assert_eq!(out, vec![vec![], kvs!["a", 1, "b"]]);

        // A paired key in the later list suppresses the unpaired one.
        let out = trim_duplicates(&[kvs!["a", 1, "b"], kvs!["b", 2]]);
        assert_eq!(out, vec![kvs!["a", 1], kvs!["b", 2]]);
    }

    #[test]
    fn non_string_keys() {
        let out = trim_duplicates(&[kvs![1, "one", "1", "str"], kvs![1, "uno"]]);
        assert_eq!(out, vec![kvs!["1", "str"], kvs![1, "uno"]]);
    }

    #[test]
    fn slices_are_accepted() {
        let base = kvs!["pod", "nginx"];
        let call = kvs!["pod", "busybox"];
        let out = trim_duplicates(&[base.as_slice(), call.as_slice()]);
        assert!(out[0].is_empty());
        assert_eq!(out[1], call);
    }
}
