pub mod edit;
pub mod response;
