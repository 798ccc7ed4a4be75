pub mod ask;
pub mod chat;
pub mod serve;
pub mod train;
