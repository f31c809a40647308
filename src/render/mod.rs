mod engine;
mod markup;

pub use engine::{page_image_path, Rasterize, RenderError, WkhtmlRasterizer};
pub use markup::{render_markup, Palette};
