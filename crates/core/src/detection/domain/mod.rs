pub mod backend_kind;
pub mod detection_error;
pub mod detector_init_error;
pub mod object_detector;
