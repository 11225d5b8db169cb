pub mod models;

pub use models::flight::{Airline, Airport, Endpoint, Flight, Price, Segment};
pub use models::search::SearchParams;
