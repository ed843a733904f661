pub mod analyze;
pub mod energy;
pub mod export;
pub mod history;
pub mod init;
pub mod share;
pub mod stats;
