//! Survey page extraction modules
//!
//! Each module handles one concern of turning a survey page into a
//! [`Survey`](crate::model::Survey).

mod document;
mod logic;
mod node;
mod options;
mod question;

pub use document::*;
pub use logic::*;
pub use node::*;
pub use options::*;
pub use question::*;
