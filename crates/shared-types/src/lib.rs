pub mod error;
pub mod movie;
pub mod requests;
pub mod validation;

pub use error::*;
pub use movie::*;
pub use requests::*;
pub use validation::*;
