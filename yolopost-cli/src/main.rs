use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yolopost::io::load_rgba_image;
use yolopost::{
    letterbox_tensor, DetectConfig, DetectRequest, Detector, ExecutionMode, HeadOutput,
    LabeledDetection, LetterboxGeometry, ReplayEngine, YOLOV5_HEADS,
};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "YOLOv5 post-processing CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectConfigJson {
    target_size: usize,
    size_multiple: usize,
    prob_threshold: f32,
    nms_threshold: f32,
    parallel: bool,
    use_accelerator: bool,
}

impl Default for DetectConfigJson {
    fn default() -> Self {
        let cfg = DetectConfig::default();
        Self {
            target_size: cfg.target_size,
            size_multiple: cfg.size_multiple,
            prob_threshold: cfg.prob_threshold,
            nms_threshold: cfg.nms_threshold,
            parallel: cfg.parallel,
            use_accelerator: false,
        }
    }
}

/// Raw little-endian `f32` dump of one head, shaped `[anchors, cells, channels]`.
#[derive(Debug, Deserialize)]
struct HeadDumpJson {
    stride: usize,
    path: String,
    #[serde(default = "default_anchors")]
    num_anchors: usize,
    #[serde(default = "default_channels")]
    channels: usize,
}

fn default_anchors() -> usize {
    3
}

fn default_channels() -> usize {
    85
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    input_dump_path: Option<String>,
    head_outputs: Vec<HeadDumpJson>,
    output_path: Option<String>,
    detect: DetectConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            input_dump_path: None,
            head_outputs: Vec::new(),
            output_path: None,
            detect: DetectConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    label: usize,
    name: &'static str,
    prob: f32,
}

impl From<LabeledDetection> for DetectionRecord {
    fn from(value: LabeledDetection) -> Self {
        let det = value.detection;
        Self {
            x: det.x,
            y: det.y,
            w: det.w,
            h: det.h,
            label: det.label,
            name: value.name,
            prob: det.prob,
        }
    }
}

#[derive(Debug, Serialize)]
struct GeometryRecord {
    scale: f32,
    resized_width: usize,
    resized_height: usize,
    pad_left: usize,
    pad_top: usize,
    padded_width: usize,
    padded_height: usize,
}

impl From<LetterboxGeometry> for GeometryRecord {
    fn from(value: LetterboxGeometry) -> Self {
        Self {
            scale: value.scale(),
            resized_width: value.resized_width(),
            resized_height: value.resized_height(),
            pad_left: value.pad_left(),
            pad_top: value.pad_top(),
            padded_width: value.padded_width(),
            padded_height: value.padded_height(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    width: usize,
    height: usize,
    geometry: GeometryRecord,
    detections: Vec<DetectionRecord>,
}

fn read_f32_le(path: &str) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(format!("{path}: length {} is not a multiple of 4", bytes.len()).into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn load_head(dump: &HeadDumpJson) -> Result<HeadOutput, Box<dyn std::error::Error>> {
    let data = read_f32_le(&dump.path)?;
    let per_cell = dump.num_anchors * dump.channels;
    if per_cell == 0 || data.len() % per_cell != 0 {
        return Err(format!(
            "{}: {} values do not split into {} anchors x {} channels",
            dump.path,
            data.len(),
            dump.num_anchors,
            dump.channels
        )
        .into());
    }
    let num_cells = data.len() / per_cell;
    Ok(HeadOutput::new(
        dump.stride,
        dump.num_anchors,
        num_cells,
        dump.channels,
        data,
    )?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("yolopost=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }
    if config.input_dump_path.is_none() && config.head_outputs.is_empty() {
        return Err("set input_dump_path, head_outputs, or both".into());
    }

    let image = load_rgba_image(&config.image_path)?;
    let view = image.view();
    info!(width = view.width(), height = view.height(), "loaded image");

    let geometry = LetterboxGeometry::compute(
        view.width(),
        view.height(),
        config.detect.target_size,
        config.detect.size_multiple,
    )?;

    if let Some(path) = &config.input_dump_path {
        let input = letterbox_tensor(view, &geometry)?;
        let bytes: Vec<u8> = input
            .as_slice()
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        fs::write(path, bytes)?;
        info!(
            path = path.as_str(),
            width = input.width(),
            height = input.height(),
            "wrote input tensor"
        );
    }

    let detections = if config.head_outputs.is_empty() {
        Vec::new()
    } else {
        let outputs = config
            .head_outputs
            .iter()
            .map(load_head)
            .collect::<Result<Vec<_>, _>>()?;
        let detector = Detector::new(ReplayEngine::new(outputs))
            .with_config(DetectConfig {
                target_size: config.detect.target_size,
                size_multiple: config.detect.size_multiple,
                prob_threshold: config.detect.prob_threshold,
                nms_threshold: config.detect.nms_threshold,
                parallel: config.detect.parallel,
            })
            .with_heads(&YOLOV5_HEADS);
        let execution = if config.detect.use_accelerator {
            ExecutionMode::Accelerated
        } else {
            ExecutionMode::Cpu
        };
        let result = detector.detect(&DetectRequest::new(view).with_execution(execution))?;
        result.detections
    };

    let output = Output {
        width: view.width(),
        height: view.height(),
        geometry: geometry.into(),
        detections: detections.into_iter().map(DetectionRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
