#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod input;
pub mod live;
pub mod overlay;
pub mod path;
pub mod recorder;
pub mod session;
pub mod stroke;
pub mod surface;
pub mod util;

pub use app::InkApp;
pub use config::{CaptureConfig, PressureConfig};
pub use error::{ConfigError, SampleError};
pub use export::{DocumentSink, ExportRenderer, ExportedPath};
pub use input::{InputEvent, InputHandler, InputSource, Sample, TouchContact};
pub use live::IncrementalRenderer;
pub use overlay::PointsOverlay;
pub use path::{PathBuilder, PathCommand, PathStrategy, VectorPath};
pub use recorder::StrokeRecorder;
pub use session::{CaptureSession, SharedSession};
pub use stroke::{Stroke, StrokePoint};
pub use surface::{DrawInstruction, LiveCanvas, RasterSurface};
