use crate::shared::frame::Frame;

/// Interactive output for annotated frames.
pub trait FrameDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `delay_ms` for a key press; `true` means the user asked
    /// to stop.
    fn stop_requested(&mut self, delay_ms: i32) -> Result<bool, Box<dyn std::error::Error>>;

    fn close(&mut self);
}
