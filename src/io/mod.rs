pub mod config_io;
pub mod recovery;
pub mod session;
pub mod storage;

pub use session::Session;
