pub mod error;

pub use error::{BlogError, ErrorKind, Result};
