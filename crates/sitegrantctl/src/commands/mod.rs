pub mod check;
pub mod classify;
pub mod completion;
pub mod grants;
pub mod request;
