pub mod form;
pub mod inline_data;
