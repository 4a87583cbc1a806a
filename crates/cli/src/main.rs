use std::path::{Path, PathBuf};
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use facegate_core::artifact::domain::artifact_sink::ArtifactSink;
use facegate_core::artifact::infrastructure::jpeg_artifact_sink::JpegArtifactSink;
use facegate_core::pipeline::face_screener::FaceScreener;
use facegate_core::pipeline::infrastructure::camera_session::{CameraSession, LivenessCallback};
use facegate_core::pipeline::results::{LivenessResult, LivenessStatus};
use facegate_core::pipeline::still_photo_use_case::StillPhotoUseCase;
use facegate_core::shared::config::GateConfig;
use facegate_core::shared::frame::{now_millis, RawFrame};

/// Face capture gating: accept or reject face photos and camera streams.
#[derive(Parser)]
#[command(name = "facegate")]
struct Cli {
    /// Haar cascade XML for frontal faces.
    #[arg(long)]
    face_cascade: PathBuf,

    /// Haar cascade XML for mouths.
    #[arg(long)]
    mouth_cascade: PathBuf,

    /// Directory for accepted captures (defaults to the app data dir).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Gate a single photo.
    Still {
        /// Photo to evaluate.
        photo: PathBuf,
    },
    /// Replay a directory of encoded frames as a camera stream.
    Stream {
        /// Directory of frame files, fed in name order.
        frames_dir: PathBuf,

        /// Playback pace in frames per second.
        #[arg(long, default_value_t = 15)]
        fps: u32,

        /// Sensor-to-display rotation applied to every frame, in degrees.
        #[arg(long, default_value_t = 0.0)]
        rotation: f32,

        /// Mirror frames horizontally (front camera).
        #[arg(long)]
        mirror: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let accepted = match run(&cli) {
        Ok(accepted) => accepted,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    };
    if !accepted {
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let screener = build_screener(&cli.face_cascade, &cli.mouth_cascade)?;
    let sink: Box<dyn ArtifactSink> = match &cli.out_dir {
        Some(dir) => Box::new(JpegArtifactSink::new(dir)),
        None => Box::new(JpegArtifactSink::in_default_dir()?),
    };
    let config = GateConfig::default();

    match &cli.command {
        Command::Still { photo } => run_still(screener, sink, config, photo),
        Command::Stream {
            frames_dir,
            fps,
            rotation,
            mirror,
        } => run_stream(screener, sink, config, frames_dir, *fps, *rotation, *mirror),
    }
}

fn run_still(
    screener: FaceScreener,
    sink: Box<dyn ArtifactSink>,
    config: GateConfig,
    photo: &Path,
) -> anyhow::Result<bool> {
    let mut use_case = StillPhotoUseCase::new(screener, sink, config);
    let result = use_case.evaluate_path(photo);

    if result.accepted {
        println!("accepted: {}", result.message);
        if let Some(artifact) = &result.artifact {
            println!("saved to {artifact}");
        }
    } else {
        println!("rejected: {}", result.message);
    }
    Ok(result.accepted)
}

fn run_stream(
    screener: FaceScreener,
    sink: Box<dyn ArtifactSink>,
    config: GateConfig,
    frames_dir: &Path,
    fps: u32,
    rotation: f32,
    mirror: bool,
) -> anyhow::Result<bool> {
    let mut frames: Vec<PathBuf> = std::fs::read_dir(frames_dir)
        .with_context(|| format!("could not read {}", frames_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    frames.sort();
    anyhow::ensure!(!frames.is_empty(), "no frames in {}", frames_dir.display());

    let (result_tx, result_rx) = mpsc::channel::<LivenessResult>();
    let callback: LivenessCallback = Box::new(move |result| {
        let _ = result_tx.send(result);
    });
    let session = CameraSession::spawn(screener, sink, config, callback);

    let delay = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    let mut accepted = false;

    'playback: for path in &frames {
        let data = std::fs::read(path)
            .with_context(|| format!("could not read frame {}", path.display()))?;
        let (width, height) = image::image_dimensions(path).unwrap_or((0, 0));
        let submitted = session.submit_frame(RawFrame {
            data,
            width,
            height,
            rotation_degrees: rotation,
            mirrored: mirror,
            timestamp_ms: now_millis(),
        });
        if !submitted {
            log::debug!("frame {} dropped", path.display());
        }

        while let Ok(result) = result_rx.try_recv() {
            print_liveness(&result);
            if result.status == LivenessStatus::Accepted {
                accepted = true;
                break 'playback;
            }
        }
        std::thread::sleep(delay);
    }

    // Joins the worker, letting an in-flight evaluation finish.
    session.release();
    while let Ok(result) = result_rx.try_recv() {
        print_liveness(&result);
        accepted |= result.status == LivenessStatus::Accepted;
    }
    Ok(accepted)
}

fn print_liveness(result: &LivenessResult) {
    match result.status {
        LivenessStatus::Rejected => println!("rejected: {}", result.message),
        LivenessStatus::InProgress => {
            println!("in progress ({}/360): {}", result.progress, result.message)
        }
        LivenessStatus::Accepted => {
            println!("accepted: {}", result.message);
            if let Some(artifact) = &result.artifact {
                println!("saved to {artifact}");
            }
        }
    }
}

#[cfg(feature = "opencv-backend")]
fn build_screener(face_cascade: &Path, mouth_cascade: &Path) -> anyhow::Result<FaceScreener> {
    use facegate_core::detection::infrastructure::opencv_cascade_detector::CascadeObjectDetector;

    let faces = CascadeObjectDetector::from_file(
        face_cascade.to_str().context("non-UTF-8 face cascade path")?,
    )?;
    let mouths = CascadeObjectDetector::from_file(
        mouth_cascade
            .to_str()
            .context("non-UTF-8 mouth cascade path")?,
    )?;
    Ok(FaceScreener::new(
        Box::new(faces),
        Box::new(mouths),
        GateConfig::default().sharpness_threshold,
    ))
}

#[cfg(not(feature = "opencv-backend"))]
fn build_screener(_face_cascade: &Path, _mouth_cascade: &Path) -> anyhow::Result<FaceScreener> {
    anyhow::bail!(
        "this build has no detector backend; rebuild with `--features opencv-backend`"
    )
}
