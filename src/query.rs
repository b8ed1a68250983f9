//! Derived, filtered views over the note collection.

use crate::Note;

/// Returns the notes matching a free-text query, preserving collection order.
///
/// A note matches when the lowercased query is a substring of its lowercased
/// content, or of at least one lowercased tag. The empty query matches every
/// note. Pure function of its inputs: nothing is mutated and nothing is
/// cached; cost is linear in collection size times tag count, which is fine
/// for a single user's collection.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.content.to_lowercase().contains(&needle)
                || note
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoteDraft;

    fn note(id: i64, content: &str, tags: &[&str]) -> Note {
        Note::new(
            id,
            NoteDraft {
                content: content.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn empty_query_is_identity() {
        let notes = vec![note(2, "newer", &[]), note(1, "older", &[])];
        let filtered = filter_notes(&notes, "");
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 2);
        assert_eq!(filtered[1].id, 1);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let notes = vec![note(1, "Hello World", &[])];
        assert_eq!(filter_notes(&notes, "hello").len(), 1);
        assert_eq!(filter_notes(&notes, "WORLD").len(), 1);
        assert!(filter_notes(&notes, "goodbye").is_empty());
    }

    #[test]
    fn tags_match_independently_of_content() {
        let notes = vec![note(1, "completely unrelated text", &["urgent"])];
        assert_eq!(filter_notes(&notes, "urg").len(), 1);
    }

    #[test]
    fn substring_not_token_matching() {
        let notes = vec![note(1, "standalone", &[])];
        assert_eq!(filter_notes(&notes, "dalo").len(), 1);
    }

    #[test]
    fn query_selects_only_matching_notes() {
        let notes = vec![
            note(2, "meeting notes", &["work"]),
            note(1, "grocery list", &["home", "urgent"]),
        ];
        let filtered = filter_notes(&notes, "urgent");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn order_is_preserved_among_matches() {
        let notes = vec![
            note(3, "alpha beta", &[]),
            note(2, "gamma", &[]),
            note(1, "beta gamma", &[]),
        ];
        let filtered = filter_notes(&notes, "beta");
        let ids: Vec<i64> = filtered.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
