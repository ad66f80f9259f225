use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::window::Window;

use crate::app::tools::{draw_overlay, OverlayData};
use crate::app::Viewport;

use super::{rasterize, DrawList, Rgba};

const CLEAR_COLOR: Rgba = [18, 20, 28, 255];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create pixel surface: {0}")]
    Surface(#[source] pixels::Error),
    #[error("failed to resize pixel surface to {width}x{height}: {source}")]
    Resize {
        width: u32,
        height: u32,
        #[source]
        source: pixels::TextureError,
    },
    #[error("failed to present frame: {0}")]
    Present(#[source] pixels::Error),
}

/// Software framebuffer the size of the logical viewport, scaled onto the window.
pub struct Renderer {
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>, viewport: Viewport) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window);
        let pixels =
            Pixels::new(viewport.width, viewport.height, surface).map_err(RenderError::Surface)?;
        Ok(Self { pixels, viewport })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels
            .resize_surface(width, height)
            .map_err(|source| RenderError::Resize {
                width,
                height,
                source,
            })
    }

    /// Maps a physical window position to framebuffer pixels; `None` when outside.
    pub fn window_to_viewport(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        self.pixels.window_pos_to_pixel((x as f32, y as f32)).ok()
    }

    pub(crate) fn render(
        &mut self,
        draw_list: &DrawList,
        overlay: &OverlayData,
    ) -> Result<(), RenderError> {
        let viewport = self.viewport;
        let frame = self.pixels.frame_mut();
        rasterize(frame, viewport, draw_list, CLEAR_COLOR);
        draw_overlay(frame, viewport, overlay);
        self.pixels.render().map_err(RenderError::Present)
    }
}
