pub mod config;
pub mod error;
pub mod facts;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use facts::*;
pub use traits::*;
pub use types::*;
