use std::path::Path;

use glyph_image::{GenericImage, Image};
use glyph_io::ChannelConverter;
use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::pipeline::{seeded_rng, TransformPipeline};

/// The normalized samples of one color channel.
pub type ChannelBatch = Vec<Image<f32, 1>>;

/// Decodes image files and runs the transform pipeline on each of their channels.
///
/// Channels are processed in parallel, each with its own random source seeded with
/// `seed + channel index`.
#[derive(Debug)]
pub struct ImagePreprocessor {
    pipeline: TransformPipeline,
    converter: ChannelConverter,
}

impl ImagePreprocessor {
    /// Create a preprocessor from a pipeline configuration.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let converter = ChannelConverter::new(config.strict_channels);
        let pipeline = TransformPipeline::new(config)?;
        Ok(Self {
            pipeline,
            converter,
        })
    }

    /// The underlying transform pipeline.
    pub fn pipeline(&self) -> &TransformPipeline {
        &self.pipeline
    }

    /// Preprocess a file, returning one batch per RGB channel.
    pub fn try_preprocess(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<Vec<ChannelBatch>, PipelineError> {
        let channels = self.converter.read_channels(file_path)?;
        let seed = self.pipeline.config().seed;

        channels
            .into_par_iter()
            .enumerate()
            .map(|(i, channel)| {
                let mut rng = seeded_rng(seed, i as u64);
                self.pipeline
                    .apply_with_rng(&GenericImage::L8(channel), &mut rng)
            })
            .collect()
    }

    /// Preprocess a file, logging and swallowing any failure.
    ///
    /// Returns `None` when the file cannot be decoded or processed.
    pub fn preprocess(&self, file_path: impl AsRef<Path>) -> Option<Vec<ChannelBatch>> {
        let file_path = file_path.as_ref();
        match self.try_preprocess(file_path) {
            Ok(batches) => Some(batches),
            Err(err) => {
                log::error!("failed to preprocess {}: {err}", file_path.display());
                None
            }
        }
    }

    /// Preprocess independent files in parallel, one result per path.
    pub fn preprocess_many<P>(&self, file_paths: &[P]) -> Vec<Option<Vec<ChannelBatch>>>
    where
        P: AsRef<Path> + Sync,
    {
        file_paths
            .par_iter()
            .map(|file_path| self.preprocess(file_path))
            .collect()
    }
}
