// File format handlers
pub mod image_file;
pub mod json;

pub use image_file::{load_image, save_image, ImageFileError, H3P_EXTENSION};
pub use json::{export_json, from_json, import_json, to_json, JsonError};
