pub mod constants;
pub mod detected_object;
pub mod frame;
pub mod image_info;
pub mod rectangle;
