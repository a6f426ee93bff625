//! Property acquisition data and portfolio loading

mod data;
pub mod loader;

pub use data::{InputError, PaymentType, ProjectInput};
pub use loader::{load_projects, load_projects_from_reader, LoadError, PropertyProject};
