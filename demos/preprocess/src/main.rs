use argh::FromArgs;
use std::path::PathBuf;

use glyph::image::Image;
use glyph::imgproc::{normalize, threshold};
use glyph::io::ImageHandler;
use glyph::{ImagePreprocessor, PipelineConfig};

#[derive(FromArgs)]
/// Normalize and augment an image, writing every sample of every channel as a PNG
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory receiving the samples
    #[argh(option, short = 'o', default = "PathBuf::from(\"samples\")")]
    output_dir: PathBuf,

    /// optional JSON pipeline configuration
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// samples requested per channel
    #[argh(option, short = 'r')]
    repeats: Option<usize>,

    /// seed of the random sources
    #[argh(option, short = 's')]
    seed: Option<u64>,

    /// reject images without exactly three channels
    #[argh(switch)]
    strict: bool,

    /// binarize the written samples at this level of the [0, 255] display range
    #[argh(option, short = 't')]
    threshold: Option<f32>,
}

/// Stretch a standardized sample back to the displayable [0, 255] range.
fn to_display(sample: &Image<f32, 1>) -> Result<Image<f32, 1>, Box<dyn std::error::Error>> {
    let (min, max) = normalize::find_min_max(sample)?;
    let mut display = Image::from_size_val(sample.size(), 0.0)?;
    normalize::normalize(sample, &mut display, (min, max), (0.0, 255.0))?;
    Ok(display)
}

/// Keep 255 where the display sample is above `level`, 0 elsewhere.
fn binarize(
    display: &Image<f32, 1>,
    level: f32,
) -> Result<Image<f32, 1>, Box<dyn std::error::Error>> {
    let mut mask = Image::from_size_val(display.size(), 0.0)?;
    threshold::threshold_binary(display, &mut mask, level, 255.0)?;
    Ok(mask)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    config.repeats = args.repeats.or(config.repeats);
    config.seed = args.seed.or(config.seed);
    config.strict_channels |= args.strict;

    let preprocessor = ImagePreprocessor::new(config)?;
    let Some(batches) = preprocessor.preprocess(&args.image_path) else {
        return Err(format!("could not preprocess {}", args.image_path.display()).into());
    };

    let handler = ImageHandler { create_dirs: true };
    for (channel, batch) in batches.iter().enumerate() {
        log::info!("channel {channel}: {} samples", batch.len());
        for (i, sample) in batch.iter().enumerate() {
            let file_path = args
                .output_dir
                .join(format!("channel{channel}_sample{i}.png"));
            let mut display = to_display(sample)?;
            if let Some(level) = args.threshold {
                display = binarize(&display, level)?;
            }
            handler.save(&file_path, &display.into())?;
        }
    }

    log::info!("samples written to {}", args.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binarize_keeps_values_above_level() -> Result<(), Box<dyn std::error::Error>> {
        let display = Image::<f32, 1>::from_rows(&[vec![0.0, 127.0, 128.0, 255.0]])?;
        let mask = binarize(&display, 127.0)?;
        assert_eq!(mask.as_slice(), &[0.0, 0.0, 255.0, 255.0]);
        Ok(())
    }
}
