use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ExportError {
    #[snafu(display("raster buffer of {width}x{height} is not a valid image on `{stage}`"))]
    InvalidRasterDimensions {
        stage: &'static str,
        width: u32,
        height: u32,
    },
    #[snafu(display("failed to encode region raster as PNG on `{stage}`: {source}"))]
    EncodePng {
        stage: &'static str,
        source: image::ImageError,
    },
    #[snafu(display("failed to write region image to {path:?} on `{stage}`: {source}"))]
    WriteImageFile {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type ExportResult<T> = Result<T, ExportError>;
