pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod raster;
pub mod surface;

pub use config::{DEFAULT_EXPORT_FILENAME, SketchConfig};
pub use error::{SketchError, SketchResult};
pub use export::{PngExport, encode_png, png_data_url};
pub use model::*;
pub use raster::RasterSurface;
pub use surface::{MAX_DIMENSION, MAX_PIXELS, Surface, SurfaceLayout};

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Line, Point};
