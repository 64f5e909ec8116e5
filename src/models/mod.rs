pub mod appointment;
pub mod doctor;
pub mod fruit;
pub mod patient;
pub mod season;
pub mod user;

pub use appointment::Appointment;
pub use doctor::{Doctor, DoctorSummary, DoctorWithPatients};
pub use fruit::{Fruit, FruitChanges, FruitDetail, FruitForm, NewFruit};
pub use patient::{Patient, PatientSummary, PatientWithDoctors};
pub use season::{Season, SeasonFruit};
pub use user::User;
