pub mod exercise;
pub mod profile;
pub mod routine;
pub mod user;

pub use exercise::Exercise;
pub use profile::Profile;
pub use routine::{AddToRoutine, NewRoutineEntry, RoutineEntry};
pub use user::{LoginCredentials, RegisterUser};
