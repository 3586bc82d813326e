pub mod annotate_image_use_case;
pub mod annotate_stream_use_case;
pub mod input_mode;
pub mod pipeline_logger;

#[cfg(test)]
mod test_doubles;
