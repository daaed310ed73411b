pub mod draw_service;
pub mod persistence_service;
pub mod session_service;

pub use draw_service::*;
pub use persistence_service::*;
pub use session_service::*;
