//! Greedy facility-name resolution.
//!
//! Administered names are visited in input order and each takes the
//! best-scoring distributed name still in the pool. This is not an optimal
//! assignment: an early name can claim a partner that a later name would
//! have scored higher against.

use rapidfuzz::distance::indel;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Character-level similarity of two canonical names, a whole number from 0 to 100.
///
/// Indel-normalized ratio rounded to the nearest integer before any
/// threshold comparison: `"jimmatown"` vs `"jimatown"` scores 94.
pub fn similarity(a: &str, b: &str) -> f64 {
    (indel::normalized_similarity(a.chars(), b.chars()) * 100.0).round()
}

/// An administered facility key resolved to a distributed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameBinding {
    pub admin_key: String,
    pub dist_key: String,
    pub score: f64,
}

/// Binds each administered key to at most one distributed key.
///
/// Both inputs are distinct keys in first-seen order. Blank keys never bind.
/// Ties keep the earlier pool entry; a best score below `threshold` leaves
/// the administered key unbound and the pool untouched.
pub fn resolve_names(admin_keys: &[String], dist_keys: &[String], threshold: f64) -> Vec<NameBinding> {
    let mut pool: Vec<&str> = dist_keys
        .iter()
        .map(String::as_str)
        .filter(|key| !key.is_empty())
        .collect();
    let mut bindings = Vec::new();

    for admin_key in admin_keys.iter().filter(|key| !key.is_empty()) {
        let mut best: Option<(usize, f64)> = None;
        for (position, candidate) in pool.iter().enumerate() {
            let score = similarity(admin_key, candidate);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((position, score));
            }
        }

        match best {
            Some((position, score)) if score >= threshold => {
                let dist_key = pool.remove(position);
                trace!(admin = %admin_key, dist = %dist_key, score, "bound facility names");
                bindings.push(NameBinding {
                    admin_key: admin_key.clone(),
                    dist_key: dist_key.to_string(),
                    score,
                });
            }
            Some((_, score)) => {
                trace!(admin = %admin_key, best = score, "no candidate above threshold");
            }
            None => {}
        }
    }

    debug!(
        admin = admin_keys.len(),
        dist = dist_keys.len(),
        bound = bindings.len(),
        threshold,
        "resolved facility names"
    );
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn one_character_variant_scores_above_default_threshold() {
        let score = similarity("jimmatown", "jimatown");
        assert!((score - 94.0).abs() < 1e-9, "score was {score}");
        assert!((similarity("bole", "bole") - 100.0).abs() < 1e-9);
        assert!(similarity("bole", "kirkos") < 50.0);
    }

    #[test]
    fn score_is_rounded_before_the_threshold_test() {
        // Raw ratio is 28/33 = 84.85, which rounds up to 85.
        assert!((similarity("abcdefghijklmnopq", "abcdefghijklmnxy") - 85.0).abs() < 1e-9);
        let admin = keys(&["abcdefghijklmnopq"]);
        let dist = keys(&["abcdefghijklmnxy"]);
        let bindings = resolve_names(&admin, &dist, 85.0);
        assert_eq!(bindings.len(), 1);
        assert!((bindings[0].score - 85.0).abs() < 1e-9);
        assert!(resolve_names(&admin, &dist, 86.0).is_empty());
    }

    #[test]
    fn best_candidate_is_claimed_once() {
        let bindings = resolve_names(
            &keys(&["jimmatown", "jimmazuria"]),
            &keys(&["jimatown", "bole"]),
            85.0,
        );
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].admin_key, "jimmatown");
        assert_eq!(bindings[0].dist_key, "jimatown");
    }

    #[test]
    fn greedy_order_can_starve_a_later_better_match() {
        // "abcdx" takes "abcd" first even though "abcd" would score 100 against the second.
        let bindings = resolve_names(&keys(&["abcdx", "abcd"]), &keys(&["abcd"]), 80.0);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].admin_key, "abcdx");
    }

    #[test]
    fn ties_keep_the_first_pool_entry() {
        let bindings = resolve_names(&keys(&["abcx"]), &keys(&["abcy", "abcz"]), 50.0);
        assert_eq!(bindings[0].dist_key, "abcy");
    }

    #[test]
    fn blank_keys_never_bind() {
        let bindings = resolve_names(&keys(&["", "bole"]), &keys(&["", "bole"]), 0.0);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].dist_key, "bole");
    }

    #[test]
    fn threshold_zero_binds_anything_left() {
        let bindings = resolve_names(&keys(&["aaa"]), &keys(&["zzz"]), 0.0);
        assert_eq!(bindings.len(), 1);
        assert!(bindings[0].score.abs() < 1e-9);
    }
}
