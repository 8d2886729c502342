use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Invalid color '{0}', expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("Pixel buffer holds {actual} bytes but a {width}x{height} RGBA image needs {expected}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, RasterError>;
