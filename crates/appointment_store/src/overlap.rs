//! Overlap detection shared by the backends.

use entities::{Appointment, TimeSpan};

/// Returns true if `candidate` intersects `existing` under half-open
/// `[start, end)` semantics.
pub fn overlaps(existing: &TimeSpan, candidate: &TimeSpan) -> bool {
    existing.overlaps(candidate)
}

/// Finds the first stored appointment whose slot intersects `candidate`.
///
/// The scan is global: appointments of every user are considered.
pub fn find_overlap<'a, I>(existing: I, candidate: &Appointment) -> Option<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let span = candidate.span();
    existing
        .into_iter()
        .find(|a| a.id != candidate.id && overlaps(&a.span(), &span))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use entities::Contact;
    use proptest::prelude::*;
    use uuid::Uuid;

    use super::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap()
    }

    fn appointment(start_min: i64, end_min: i64) -> Appointment {
        Appointment::new(
            Uuid::new_v4(),
            Contact::new("Test", "test@example.com"),
            base() + Duration::minutes(start_min),
            base() + Duration::minutes(end_min),
        )
    }

    #[test]
    fn test_find_overlap_returns_hit() {
        let stored = vec![appointment(0, 60), appointment(120, 180)];

        let hit = find_overlap(&stored, &appointment(150, 200)).unwrap();
        assert_eq!(hit.id, stored[1].id);

        assert!(find_overlap(&stored, &appointment(60, 120)).is_none());
    }

    #[test]
    fn test_find_overlap_ignores_same_id() {
        let stored = vec![appointment(0, 60)];
        let same = stored[0].clone();

        assert!(find_overlap(&stored, &same).is_none());
    }

    proptest! {
        #[test]
        fn prop_overlap_matches_interval_intersection(
            a_start in 0i64..500,
            a_len in 1i64..120,
            b_start in 0i64..500,
            b_len in 1i64..120,
        ) {
            let a = appointment(a_start, a_start + a_len);
            let b = appointment(b_start, b_start + b_len);
            let expected = a_start.max(b_start) < (a_start + a_len).min(b_start + b_len);

            prop_assert_eq!(overlaps(&a.span(), &b.span()), expected);
            prop_assert_eq!(overlaps(&b.span(), &a.span()), expected);
        }
    }
}
