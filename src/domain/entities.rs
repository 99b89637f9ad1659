pub mod edit_request;
pub mod envelope;
pub mod instruction;
pub mod model_content;
