pub mod compare;
pub mod fetch;
pub mod snapshot;
pub mod upload;
