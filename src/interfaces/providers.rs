pub mod image_model;
