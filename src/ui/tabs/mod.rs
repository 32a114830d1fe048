pub mod expenses;
pub mod itinerary;
pub mod route;
pub mod summary;
