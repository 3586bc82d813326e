use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use lookout_core::annotation::infrastructure::opencv_annotator::OpencvAnnotator;
use lookout_core::detection::domain::backend_kind::BackendKind;
use lookout_core::detection::domain::object_detector::ObjectDetector;
use lookout_core::detection::infrastructure::cascade_detector::{
    CascadeParams, DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR,
};
use lookout_core::detection::infrastructure::cascade_resolver::ProgressFn;
use lookout_core::detection::infrastructure::detector_factory::{
    create_detector, DetectorSettings,
};
use lookout_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use lookout_core::pipeline::annotate_stream_use_case::{AnnotateStreamUseCase, StreamOutcome};
use lookout_core::pipeline::input_mode::InputMode;
use lookout_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use lookout_core::shared::constants::{
    AZURE_REQUEST_TIMEOUT_SECS, AZURE_VISION_ENDPOINT, DEFAULT_CASCADE_LABEL, WINDOW_NAME,
};
use lookout_core::video::domain::frame_source::FrameSource;
use lookout_core::video::infrastructure::capture_source::CaptureSource;
use lookout_core::video::infrastructure::highgui_display::HighguiDisplay;
use lookout_core::video::infrastructure::still_image_source::StillImageSource;

/// Detect and label faces in an image, a video file or a camera stream.
#[derive(Parser, Debug)]
#[command(name = "lookout")]
struct Cli {
    /// Still image to annotate (takes precedence over --vid).
    #[arg(long)]
    img: Option<PathBuf>,

    /// Video file to annotate.
    #[arg(long)]
    vid: Option<PathBuf>,

    /// Camera index, used when neither --img nor --vid is given.
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    webcam: i32,

    /// Detection backend: haar or azure.
    #[arg(long, default_value = "haar")]
    detection: String,

    /// Cascade classifier definition (haar only).
    #[arg(long)]
    cascade: Option<PathBuf>,

    /// Label attached to cascade detections.
    #[arg(long, default_value = DEFAULT_CASCADE_LABEL)]
    label: String,

    /// Image shrink factor between cascade scales (> 1.0).
    #[arg(long, default_value_t = DEFAULT_SCALE_FACTOR)]
    scale_factor: f64,

    /// Overlapping candidates needed to keep a cascade detection.
    #[arg(long, default_value_t = DEFAULT_MIN_NEIGHBORS, allow_negative_numbers = true)]
    min_neighbors: i32,

    /// Smallest object side in pixels (0 = no minimum).
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    min_size: i32,

    /// Computer Vision analyze endpoint (azure only).
    #[arg(long, default_value = AZURE_VISION_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds for the cloud backend (0 = none).
    #[arg(long, default_value_t = AZURE_REQUEST_TIMEOUT_SECS)]
    timeout: u64,

    /// Log progress every N frames.
    #[arg(long, default_value = "30")]
    progress_every: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mode = InputMode::select(cli.img.clone(), cli.vid.clone(), cli.webcam);
    let detector = build_detector(&cli)?;

    match mode {
        InputMode::Image(path) => run_image(&path, detector, cli.progress_every),
        InputMode::Video(path) => {
            let source = CaptureSource::open_file(&path)?;
            run_stream(Box::new(source), detector, cli.progress_every)
        }
        InputMode::Camera(index) => {
            let source = CaptureSource::open_camera(index)?;
            run_stream(Box::new(source), detector, cli.progress_every)
        }
    }
}

fn run_image(
    path: &Path,
    detector: Box<dyn ObjectDetector>,
    progress_every: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = StillImageSource::open(path)?;
    let display = HighguiDisplay::new(WINDOW_NAME)?;

    let mut use_case = AnnotateImageUseCase::new(
        Box::new(source),
        detector,
        Box::new(OpencvAnnotator::default()),
        Box::new(display),
        Box::new(StdoutPipelineLogger::new(progress_every)),
    );
    use_case.execute(path)
}

fn run_stream(
    source: Box<dyn FrameSource>,
    detector: Box<dyn ObjectDetector>,
    progress_every: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let display = HighguiDisplay::new(WINDOW_NAME)?;

    let mut use_case = AnnotateStreamUseCase::new(
        source,
        detector,
        Box::new(OpencvAnnotator::default()),
        Box::new(display),
        Box::new(StdoutPipelineLogger::new(progress_every)),
    );
    match use_case.execute()? {
        StreamOutcome::SourceExhausted => log::info!("End of stream"),
        StreamOutcome::StopRequested => log::info!("Stopped by user"),
    }
    Ok(())
}

fn build_detector(cli: &Cli) -> Result<Box<dyn ObjectDetector>, Box<dyn std::error::Error>> {
    let settings = detector_settings(cli)?;

    let downloading = Arc::new(AtomicBool::new(false));
    let flag = downloading.clone();
    let progress: ProgressFn = Box::new(move |downloaded, total| {
        flag.store(true, Ordering::Relaxed);
        download_progress(downloaded, total);
    });

    let detector = create_detector(&settings, Some(progress))?;
    if downloading.load(Ordering::Relaxed) {
        eprintln!();
    }
    Ok(detector)
}

fn detector_settings(cli: &Cli) -> Result<DetectorSettings, Box<dyn std::error::Error>> {
    Ok(DetectorSettings {
        backend: cli.detection.parse::<BackendKind>()?,
        cascade_path: cli.cascade.clone(),
        label: cli.label.clone(),
        cascade_params: CascadeParams {
            scale_factor: cli.scale_factor,
            min_neighbors: cli.min_neighbors,
            min_size: cli.min_size,
        },
        endpoint: cli.endpoint.clone(),
        request_timeout: (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout)),
    })
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(img) = &cli.img {
        if !img.is_file() {
            return Err(format!("Image file not found: {}", img.display()).into());
        }
    } else if let Some(vid) = &cli.vid {
        if !vid.is_file() {
            return Err(format!("Video file not found: {}", vid.display()).into());
        }
    }
    cli.detection.parse::<BackendKind>()?;
    if cli.webcam < 0 {
        return Err(format!("Camera index must be non-negative, got {}", cli.webcam).into());
    }
    if let Some(cascade) = &cli.cascade {
        if !cascade.is_file() {
            return Err(format!("Cascade file not found: {}", cascade.display()).into());
        }
    }
    if cli.label.trim().is_empty() {
        return Err("Label must not be empty".into());
    }
    let params = CascadeParams {
        scale_factor: cli.scale_factor,
        min_neighbors: cli.min_neighbors,
        min_size: cli.min_size,
    };
    params.validate()?;
    if cli.progress_every == 0 {
        return Err("Progress interval must be at least 1".into());
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading cascade classifier... {pct}%");
    } else {
        eprint!("\rDownloading cascade classifier... {downloaded} bytes");
    }
}
