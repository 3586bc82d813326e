use opencv::highgui;

use crate::shared::frame::Frame;
use crate::video::domain::frame_display::FrameDisplay;

/// An OpenCV HighGUI window. Any key press counts as a stop request.
pub struct HighguiDisplay {
    window: String,
    open: bool,
}

impl HighguiDisplay {
    pub fn new(window: impl Into<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let window = window.into();
        highgui::named_window(&window, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self { window, open: true })
    }
}

impl FrameDisplay for HighguiDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        highgui::imshow(&self.window, frame.mat())?;
        Ok(())
    }

    fn stop_requested(&mut self, delay_ms: i32) -> Result<bool, Box<dyn std::error::Error>> {
        Ok(highgui::wait_key(delay_ms)? >= 0)
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = highgui::destroy_window(&self.window) {
            log::warn!("Failed to close window {}: {e}", self.window);
        }
    }
}

impl Drop for HighguiDisplay {
    fn drop(&mut self) {
        self.close();
    }
}
