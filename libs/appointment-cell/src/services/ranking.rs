//! Rank bookkeeping for appointment buckets.
//!
//! Ranks ascend within a (doctor, day, session) bucket. Creation appends
//! after the current maximum, a reorder rewrites every listed rank to its
//! zero-based position, and a move keeps the rank it had.

use std::collections::HashSet;

use crate::models::{Appointment, AppointmentError, Bucket};

/// Rank for an appointment appended to a bucket whose highest rank is
/// `current_max` (`None` when the bucket is empty).
pub fn next_rank(current_max: Option<i64>) -> i64 {
    current_max.map_or(1, |max| max + 1)
}

/// Pairs each id with its position in the caller's ordering.
pub fn positional_ranks(ids: &[String]) -> Result<Vec<(String, i64)>, AppointmentError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(AppointmentError::DuplicateId(id.clone()));
        }
    }

    Ok(ids
        .iter()
        .enumerate()
        .map(|(position, id)| (id.clone(), position as i64))
        .collect())
}

/// The single bucket shared by every entry, or `MixedBuckets`.
pub fn common_bucket<'a, I>(buckets: I) -> Result<Option<Bucket>, AppointmentError>
where
    I: IntoIterator<Item = &'a Bucket>,
{
    let mut iter = buckets.into_iter();
    let Some(first) = iter.next() else {
        return Ok(None);
    };

    if iter.any(|bucket| bucket != first) {
        return Err(AppointmentError::MixedBuckets);
    }

    Ok(Some(first.clone()))
}

/// Stable display order across buckets: rank, then weekday, then session,
/// then doctor. Equal keys keep their incoming (insertion) order.
pub fn sort_for_display(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        a.rank
            .cmp(&b.rank)
            .then(a.day.cmp(&b.day))
            .then(a.session.cmp(&b.session))
            .then_with(|| a.doctor_id.cmp(&b.doctor_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_models::{Session, Weekday};

    fn appointment(id: &str, doctor_id: &str, day: Weekday, session: Session, rank: i64) -> Appointment {
        Appointment {
            id: id.to_string(),
            doctor_id: doctor_id.to_string(),
            day,
            session,
            patient_name: format!("patient-{}", id),
            patient_r4: String::new(),
            duration: "30".to_string(),
            appointment_type: "Checkup".to_string(),
            other_type_details: None,
            rank,
        }
    }

    fn ids(appointments: &[Appointment]) -> Vec<&str> {
        appointments.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn empty_bucket_starts_at_one() {
        assert_eq!(next_rank(None), 1);
    }

    #[test]
    fn append_goes_after_current_max() {
        assert_eq!(next_rank(Some(1)), 2);
        assert_eq!(next_rank(Some(0)), 1);
        assert_eq!(next_rank(Some(7)), 8);
    }

    #[test]
    fn positions_are_zero_based() {
        let order = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        let ranks = positional_ranks(&order).unwrap();

        assert_eq!(
            ranks,
            vec![("c".to_string(), 0), ("a".to_string(), 1), ("b".to_string(), 2)]
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let order = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_matches!(positional_ranks(&order), Err(AppointmentError::DuplicateId(id)) if id == "a");
    }

    #[test]
    fn single_bucket_is_accepted() {
        let a = appointment("a", "d1", Weekday::Mon, Session::Morning, 1);
        let b = appointment("b", "d1", Weekday::Mon, Session::Morning, 2);
        let buckets = [a.bucket(), b.bucket()];

        assert_eq!(common_bucket(&buckets).unwrap(), Some(a.bucket()));
        assert_eq!(common_bucket(&Vec::<Bucket>::new()).unwrap(), None);
    }

    #[test]
    fn mixed_buckets_are_rejected() {
        let morning = appointment("a", "d1", Weekday::Mon, Session::Morning, 1).bucket();
        let afternoon = appointment("b", "d1", Weekday::Mon, Session::Afternoon, 1).bucket();
        let other_doctor = appointment("c", "d2", Weekday::Mon, Session::Morning, 1).bucket();

        assert_matches!(
            common_bucket(&[morning.clone(), afternoon]),
            Err(AppointmentError::MixedBuckets)
        );
        assert_matches!(
            common_bucket(&[morning, other_doctor]),
            Err(AppointmentError::MixedBuckets)
        );
    }

    #[test]
    fn display_order_is_rank_first() {
        let mut list = vec![
            appointment("a", "d1", Weekday::Mon, Session::Morning, 2),
            appointment("b", "d1", Weekday::Mon, Session::Morning, 0),
            appointment("c", "d1", Weekday::Mon, Session::Morning, 1),
        ];
        sort_for_display(&mut list);
        assert_eq!(ids(&list), vec!["b", "c", "a"]);
    }

    #[test]
    fn rank_ties_break_by_day_session_doctor() {
        let mut list = vec![
            appointment("thu", "d1", Weekday::Thu, Session::Morning, 1),
            appointment("sun-pm", "d1", Weekday::Sun, Session::Afternoon, 1),
            appointment("sun-am-d2", "d2", Weekday::Sun, Session::Morning, 1),
            appointment("sun-am-d1", "d1", Weekday::Sun, Session::Morning, 1),
        ];
        sort_for_display(&mut list);
        assert_eq!(ids(&list), vec!["sun-am-d1", "sun-am-d2", "sun-pm", "thu"]);
    }

    #[test]
    fn full_ties_keep_insertion_order() {
        // a move can leave two appointments with the same rank in one bucket
        let mut list = vec![
            appointment("first", "d1", Weekday::Tue, Session::Morning, 1),
            appointment("second", "d1", Weekday::Tue, Session::Morning, 1),
        ];
        sort_for_display(&mut list);
        assert_eq!(ids(&list), vec!["first", "second"]);
    }
}
