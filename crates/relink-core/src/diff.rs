//! Change-set detection between two heading sequences.
//!
//! This is multiset subtraction keyed on heading text alone: each baseline
//! entry can absorb at most one candidate with the same text, so a note
//! holding three identical `## Notes` headings and losing one reports exactly
//! one removal, not three. Level and position are ignored when matching;
//! they travel along on whichever headings are reported as changed.

use crate::Heading;

/// Return every heading in `candidate` that cannot be matched to a
/// still-unconsumed heading of the same text in `baseline`.
///
/// Calling this twice with the arguments swapped yields the added set and the
/// removed set respectively for one note's before/after snapshot.
#[must_use]
pub fn diff(baseline: &[Heading], candidate: &[Heading]) -> Vec<Heading> {
    let mut unconsumed: Vec<&Heading> = baseline.iter().collect();
    let mut changed = Vec::new();
    for cand in candidate {
        if let Some(index) = unconsumed.iter().position(|b| b.text == cand.text) {
            unconsumed.remove(index);
        } else {
            changed.push(cand.clone());
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoteId;
    use proptest::prelude::*;

    fn heading(text: &str, position: usize) -> Heading {
        Heading {
            text: text.to_string(),
            level: 2,
            position,
            note: NoteId::from("A.md"),
        }
    }

    #[test]
    fn test_identical_sequences_diff_empty() {
        let headings = vec![heading("A", 0), heading("B", 2), heading("A", 5)];
        assert!(diff(&headings, &headings).is_empty());
    }

    #[test]
    fn test_multiset_consumption() {
        // baseline [A, A, B], candidate [A, C] -> only C is new
        let baseline = vec![heading("A", 0), heading("A", 3), heading("B", 6)];
        let candidate = vec![heading("A", 0), heading("C", 3)];
        let added = diff(&baseline, &candidate);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].text, "C");
    }

    #[test]
    fn test_rename_among_duplicates_reports_one_each_way() {
        // Three identically-named headings, one renamed.
        let before = vec![heading("Notes", 0), heading("Notes", 4), heading("Notes", 8)];
        let after = vec![heading("Notes", 0), heading("Ideas", 4), heading("Notes", 8)];
        let added = diff(&before, &after);
        let removed = diff(&after, &before);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].text, "Ideas");
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].text, "Notes");
    }

    #[test]
    fn test_position_changes_alone_are_not_changes() {
        let before = vec![heading("A", 0), heading("B", 4)];
        let after = vec![heading("B", 0), heading("A", 4)];
        assert!(diff(&before, &after).is_empty());
        assert!(diff(&after, &before).is_empty());
    }

    #[test]
    fn test_empty_baseline_reports_everything() {
        let after = vec![heading("A", 0), heading("B", 1)];
        assert_eq!(diff(&[], &after), after);
        assert!(diff(&after, &[]).is_empty());
    }

    fn arb_headings() -> impl Strategy<Value = Vec<Heading>> {
        prop::collection::vec("[A-D]", 0..12).prop_map(|texts| {
            texts
                .into_iter()
                .enumerate()
                .map(|(i, t)| heading(&t, i))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn diff_of_sequence_with_itself_is_empty(headings in arb_headings()) {
            prop_assert!(diff(&headings, &headings).is_empty());
        }

        #[test]
        fn diff_never_reports_more_than_candidate_len(
            baseline in arb_headings(),
            candidate in arb_headings(),
        ) {
            prop_assert!(diff(&baseline, &candidate).len() <= candidate.len());
        }

        #[test]
        fn per_text_counts_are_exact(baseline in arb_headings(), candidate in arb_headings()) {
            // For each text, the reported count equals the surplus of that
            // text in candidate over baseline.
            let changed = diff(&baseline, &candidate);
            for text in ["A", "B", "C", "D"] {
                let in_baseline = baseline.iter().filter(|h| h.text == text).count();
                let in_candidate = candidate.iter().filter(|h| h.text == text).count();
                let reported = changed.iter().filter(|h| h.text == text).count();
                prop_assert_eq!(reported, in_candidate.saturating_sub(in_baseline));
            }
        }
    }
}
