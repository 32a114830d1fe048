//! Domain models for the trip state.

mod expense;
mod itinerary;
mod trip;

pub use expense::{Category, Expense, ExpenseSortColumn};
pub use itinerary::{Day, RouteSegment, TravelMode};
pub use trip::TripState;

use rand::Rng;

/// Length of generated record ids.
/// 7 base-36 characters gives ~36 bits of keyspace, plenty for one trip.
const ID_LENGTH: usize = 7;

/// Generate a short random id for a trip record.
pub(crate) fn new_id() -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_shape() {
        let id = new_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_new_id_unique_enough() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
    }
}
