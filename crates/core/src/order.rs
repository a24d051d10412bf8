use std::collections::HashSet;

use crate::config::SortOrder;
use crate::post::ExtractedPost;

/// Sort posts by timestamp
///
/// The sort is stable in both directions: posts sharing a timestamp keep
/// their document order.
pub fn sort_posts(posts: &mut [ExtractedPost], order: SortOrder) {
    match order {
        SortOrder::NewestFirst => posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::OldestFirst => posts.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
    }
}

/// Make every slug unique, in page order
///
/// The first post keeps its slug; later repeats get `-2`, `-3`, ... skipping
/// any suffix another post already uses.
pub fn disambiguate_slugs(posts: &mut [ExtractedPost]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(posts.len());

    for post in posts.iter_mut() {
        if taken.insert(post.slug.clone()) {
            continue;
        }

        let unique = (2..)
            .map(|n| format!("{}-{}", post.slug, n))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_default();
        post.slug = unique.clone();
        taken.insert(unique);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PostKind;
    use crate::normalize::parse_timestamp;

    fn post(timestamp: &str, slug: &str) -> ExtractedPost {
        let timestamp = parse_timestamp(timestamp).unwrap();
        ExtractedPost {
            kind: PostKind::PhotoPost,
            timestamp_raw: String::new(),
            timestamp,
            date: String::new(),
            body_text: String::new(),
            caption_text: String::new(),
            title: String::new(),
            slug: slug.to_string(),
            fragment: String::new(),
        }
    }

    fn slugs(posts: &[ExtractedPost]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    fn sample() -> Vec<ExtractedPost> {
        vec![
            post("Jan 01, 2024 9:00:00 am", "a"),
            post("Mar 01, 2024 9:00:00 am", "b"),
            post("Jan 01, 2024 9:00:00 am", "c"),
            post("Feb 01, 2024 9:00:00 am", "d"),
            post("Mar 01, 2024 9:00:00 am", "e"),
        ]
    }

    #[test]
    fn test_newest_first_is_stable() {
        let mut posts = sample();
        sort_posts(&mut posts, SortOrder::NewestFirst);
        assert_eq!(slugs(&posts), vec!["b", "e", "d", "a", "c"]);
    }

    #[test]
    fn test_oldest_first_is_stable() {
        let mut posts = sample();
        sort_posts(&mut posts, SortOrder::OldestFirst);
        assert_eq!(slugs(&posts), vec!["a", "c", "d", "b", "e"]);
    }

    #[test]
    fn test_sort_is_permutation() {
        let mut posts = sample();
        sort_posts(&mut posts, SortOrder::NewestFirst);

        let mut sorted = slugs(&posts);
        sorted.sort_unstable();
        assert_eq!(sorted, vec!["a", "b", "c", "d", "e"]);
        assert!(posts.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_disambiguate_slugs() {
        let mut posts = vec![
            post("Aug 09, 2025 9:00:00 am", "2025-08-09-Sunset"),
            post("Aug 09, 2025 8:00:00 am", "2025-08-09-Sunset"),
            post("Aug 09, 2025 7:00:00 am", "2025-08-09-Sunset-2"),
            post("Aug 09, 2025 6:00:00 am", "2025-08-09-Sunset"),
            post("Aug 08, 2025 6:00:00 am", "2025-08-08"),
        ];
        disambiguate_slugs(&mut posts);

        assert_eq!(
            slugs(&posts),
            vec!["2025-08-09-Sunset", "2025-08-09-Sunset-2", "2025-08-09-Sunset-2-2", "2025-08-09-Sunset-3", "2025-08-08"]
        );
    }

    #[test]
    fn test_sort_empty() {
        let mut posts: Vec<ExtractedPost> = Vec::new();
        sort_posts(&mut posts, SortOrder::OldestFirst);
        assert!(posts.is_empty());
    }
}
