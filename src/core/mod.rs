pub mod chat;
pub mod completion;
pub mod context;
pub mod types;
