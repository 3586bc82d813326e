pub mod capture_source;
pub mod highgui_display;
pub mod still_image_source;
