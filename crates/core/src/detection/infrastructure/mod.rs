pub mod azure_response;
pub mod azure_vision_detector;
pub mod cascade_detector;
pub mod cascade_resolver;
pub mod detector_factory;
