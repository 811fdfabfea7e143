//! Ordering of completion results
//!
//! Ranking is deliberately simple: candidates that are plain prefix matches come
//! first, everything accepted only by a looser strategy (fuzzy, case split,
//! underscore split) comes after. Within each group the incoming order is kept,
//! which is alphabetical for buffer words and file order for dictionary entries.

/// Stable partition putting plain prefix matches first
pub fn plain_first<T, I, F>(items: I, is_plain: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> bool,
{
    let (mut plain, mut other): (Vec<T>, Vec<T>) = items.into_iter().partition(|item| is_plain(item));
    plain.append(&mut other);
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_first_is_stable() {
        let ranked = plain_first(vec!["b2", "a1", "b1", "a2"], |s| s.starts_with('a'));
        assert_eq!(ranked, vec!["a1", "a2", "b2", "b1"]);
    }

    #[test]
    fn test_plain_first_empty() {
        let ranked: Vec<&str> = plain_first(Vec::new(), |_: &&str| true);
        assert!(ranked.is_empty());
    }
}
