pub mod image;
pub mod text;

pub use image::ImageProvider;
pub use text::TextProvider;
