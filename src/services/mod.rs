pub mod pipeline;

pub use pipeline::{analyze_file, write_preview, ImagePipeline, Mode, PipelineReport};
