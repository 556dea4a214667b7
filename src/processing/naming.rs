//! Constrained resource names.
//!
//! Cloud resource names come with a maximum length, a restricted charset and a
//! start-character rule. [`build_name`] combines a base and a suffix into a name
//! that satisfies all three, shortening the base with a content hash when it
//! has to be cut so that two long names sharing a prefix stay distinct.

use crate::config::{MIN_NAME_LENGTH, NAME_FALLBACK, NAME_PAD};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref INVALID_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_-]").expect("Invalid Regex?");
    static ref SEPARATOR_RUNS: Regex = Regex::new(r"[-_]{2,}").expect("Invalid Regex?");
}

fn is_separator(c: char) -> bool {
    c == '-' || c == '_'
}

/// Replace invalid characters with `-`, collapse separator runs, strip separators at both ends.
pub fn sanitize(input: &str) -> String {
    let replaced = INVALID_CHARS.replace_all(input, "-");
    let collapsed = SEPARATOR_RUNS.replace_all(&replaced, "-");
    collapsed.trim_matches(is_separator).to_string()
}

/// Drop leading non-alphanumerics; fall back to a fixed token if nothing is left.
fn ensure_valid_start(input: &str) -> String {
    let trimmed = input.trim_start_matches(|c: char| !c.is_ascii_alphanumeric());
    if trimmed.is_empty() {
        NAME_FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}

/// First `len` hex characters of the SHA-256 of `input`.
pub fn short_hash(input: &str, len: usize) -> String {
    let digest = hex::encode(Sha256::digest(input.as_bytes()));
    digest[..len.min(digest.len())].to_string()
}

/// Hash length for a base budget: keep more readable prefix on tight budgets.
fn hash_len_for(budget: usize) -> usize {
    if budget >= 16 {
        6
    } else if budget >= 10 {
        4
    } else {
        2
    }
}

/// Cut `base` to `budget` characters, ending in `-<hash of original>`.
fn shrink_with_hash(base: &str, original: &str, budget: usize) -> String {
    if base.len() <= budget {
        return base.to_string();
    }
    let hash_len = hash_len_for(budget);
    if budget < hash_len + 2 {
        return base[..budget].trim_end_matches(is_separator).to_string();
    }
    // sanitized strings are ASCII, byte slicing is safe
    let prefix = base[..budget - hash_len - 1].trim_end_matches(is_separator);
    format!("{prefix}-{}", short_hash(original, hash_len))
}

/// Keep the last `len` characters of a sanitized suffix.
fn suffix_tail(suffix: &str, len: usize) -> String {
    let start = suffix.len().saturating_sub(len);
    suffix[start..].trim_start_matches(is_separator).to_string()
}

/// Build a name of at most `max_length` characters from `base` and `suffix`.
///
/// The result is never empty, starts with an ASCII alphanumeric, contains only
/// `[A-Za-z0-9_-]`, has no doubled or trailing separators and is at least
/// four characters long. `max_length` below four is treated as four.
///
/// # Examples
/// ```
/// use infra_plan::processing::build_name;
/// assert_eq!(build_name("my app", "prod", 32), "my-app-prod");
/// assert!(build_name("a-very-long-application-name", "autoscaling-prod", 32).len() <= 32);
/// ```
pub fn build_name(base: &str, suffix: &str, max_length: usize) -> String {
    let max_length = max_length.max(MIN_NAME_LENGTH);
    let clean_base = ensure_valid_start(&sanitize(base));
    let mut clean_suffix = sanitize(suffix);

    let mut base_budget = max_length;
    if !clean_suffix.is_empty() {
        if max_length >= clean_suffix.len() + 1 + MIN_NAME_LENGTH {
            base_budget = max_length - clean_suffix.len() - 1;
        } else {
            let suffix_budget = max_length.saturating_sub(MIN_NAME_LENGTH + 1);
            clean_suffix = if suffix_budget == 0 {
                String::new()
            } else {
                suffix_tail(&clean_suffix, suffix_budget)
            };
            if !clean_suffix.is_empty() {
                base_budget = max_length - clean_suffix.len() - 1;
            }
            log::trace!("suffix '{suffix}' shrunk to '{clean_suffix}' for max {max_length}");
        }
    }

    let short_base = shrink_with_hash(&clean_base, base, base_budget);
    let joined = if clean_suffix.is_empty() {
        short_base
    } else {
        format!("{short_base}-{clean_suffix}")
    };

    let mut name = ensure_valid_start(&sanitize(&joined));
    if name.len() > max_length {
        name.truncate(max_length);
        let keep = name.trim_end_matches(is_separator).len();
        name.truncate(keep);
    }
    while name.len() < MIN_NAME_LENGTH {
        name.push(NAME_PAD);
    }
    log::trace!("build_name('{base}', '{suffix}', {max_length}) -> '{name}'");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("my app"), "my-app");
        assert_eq!(sanitize("a--b__c-_d"), "a-b-c-d");
        assert_eq!(sanitize("__x__y__"), "x-y");
        assert_eq!(sanitize("app.v2/prod"), "app-v2-prod");
        assert_eq!(sanitize("kafé"), "kaf");
        assert_eq!(sanitize("a_b"), "a_b");
        assert_eq!(sanitize("!!!"), "");
    }

    #[test]
    fn test_ensure_valid_start() {
        assert_eq!(ensure_valid_start("_abc"), "abc");
        assert_eq!(ensure_valid_start("9abc"), "9abc");
        assert_eq!(ensure_valid_start(""), NAME_FALLBACK);
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(short_hash("service", 6), "9df6b0");
        assert_eq!(short_hash("", 4), "e3b0");
        assert_eq!(short_hash("service", 100).len(), 64);
    }

    #[test]
    fn test_build_name_fits() {
        assert_eq!(build_name("my app", "prod", 32), "my-app-prod");
        assert_eq!(build_name("__x__y", "dev", 32), "x-y-dev");
        assert_eq!(build_name("billing", "", 32), "billing");
    }

    #[test]
    fn test_build_name_long_base_with_suffix() {
        let name = build_name(
            "my-very-long-application-name-that-exceeds-limits",
            "autoscaling-prod",
            32,
        );
        assert_eq!(name, "my-very-lo-8f04-autoscaling-prod");
        assert_eq!(name.len(), 32);
    }

    #[test]
    fn test_build_name_long_base_no_suffix() {
        assert_eq!(
            build_name("my-very-long-application-name-that-exceeds-limits", "", 20),
            "my-very-long-8f0430"
        );
    }

    #[test]
    fn test_build_name_hash_disambiguates() {
        let a = build_name("orders-service-with-a-very-long-name-alpha", "", 20);
        let b = build_name("orders-service-with-a-very-long-name-beta", "", 20);
        assert_eq!(a, "orders-servic-d90b18");
        assert_eq!(b, "orders-servic-a2c0f5");
    }

    #[test]
    fn test_build_name_shrinks_suffix_tail() {
        assert_eq!(build_name("service", "autoscaling-prod", 10), "se-9d-prod");
    }

    #[test]
    fn test_build_name_drops_suffix() {
        assert_eq!(build_name("service", "prod", 5), "se-9d");
    }

    #[test]
    fn test_build_name_fallback_and_padding() {
        assert_eq!(build_name("!!!", "", 32), "resource");
        assert_eq!(build_name("a", "", 32), "a000");
        assert_eq!(build_name("", "", 32), "resource");
        assert_eq!(build_name("-", "-", 32), "resource");
    }

    #[test]
    fn test_build_name_tiny_max_length() {
        assert_eq!(build_name("service", "", 2), "s-9d");
        assert_eq!(build_name("ab", "", 0), "ab00");
    }
}
