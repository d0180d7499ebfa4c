//! Result archiving.
//!
//! - `SessionResult` - outcome of one finished or cancelled session
//! - `SessionManager` - TSV/JSON session files in a base directory

mod manager;
mod result;

pub use manager::*;
pub use result::*;
