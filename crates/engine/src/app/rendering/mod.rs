mod draw;
mod raster;
mod renderer;
mod transform;

pub use draw::{rasterize, DrawCommand, DrawList, DrawSpace, Rgba};
pub(crate) use raster::{draw_rect_outline, fill_rect_clipped, write_pixel_rgba};
pub use renderer::{RenderError, Renderer};
pub use transform::{world_rect_to_screen, world_to_screen_x, ScreenRectPx};
