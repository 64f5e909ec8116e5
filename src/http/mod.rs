pub mod handlers;
pub mod routes;

pub use routes::{create_clinic_routes, create_orchard_routes};
