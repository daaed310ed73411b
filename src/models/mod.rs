pub mod draw;
pub mod language;
pub mod prize;
pub mod won_prize;

pub use draw::*;
pub use language::*;
pub use prize::*;
pub use won_prize::*;
