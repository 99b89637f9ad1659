pub mod gemini;
pub mod utils;
pub mod web;
