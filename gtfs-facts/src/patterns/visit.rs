//! Stop visits within a trip.

use crate::domain::StopId;

/// One ordered stop within a trip pattern.
///
/// Offsets are whole minutes relative to the trip's first-stop departure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopVisit {
    pub stop_id: StopId,

    /// 1-based position within the trip.
    pub position: u32,

    /// `None` for the first visit, where arriving does not apply.
    pub arrival_offset: Option<i32>,

    pub departure_offset: i32,
}

impl StopVisit {
    /// The opening visit of a trip: position 1, no arrival, departs at offset 0.
    pub fn first(stop_id: StopId) -> Self {
        Self {
            stop_id,
            position: 1,
            arrival_offset: None,
            departure_offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_visit() {
        let visit = StopVisit::first(StopId::from_feed_id("NSR:Quay:1").unwrap());
        assert_eq!(visit.position, 1);
        assert_eq!(visit.arrival_offset, None);
        assert_eq!(visit.departure_offset, 0);
    }
}
