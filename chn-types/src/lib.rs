pub mod acquisition;
pub mod error;
pub mod header;
pub mod month;

pub use acquisition::*;
pub use error::*;
pub use header::*;
pub use month::*;
