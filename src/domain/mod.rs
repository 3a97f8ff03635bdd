pub mod error;
pub mod outcome;
pub mod validation;

pub use error::{Error, ErrorKind};
pub use outcome::Outcome;
pub use validation::ValidationErrors;
