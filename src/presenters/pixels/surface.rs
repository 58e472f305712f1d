use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use pixels::wgpu;
use pixels::{Pixels, SurfaceTexture, TextureError};
use winit::window::Window;

use crate::controllers::interactive::ports::display_surface::{
    BoundingBox, DisplaySurface, SurfaceSize,
};
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBufferView};

/// Where the pixels scaling pass puts a `plot` sized texture inside a
/// `window_width` x `window_height` surface: the largest whole-number scale
/// that fits (at least 1), centred.
#[must_use]
pub fn plot_bounds(window_width: u32, window_height: u32, plot: SurfaceSize) -> BoundingBox {
    let plot_width = f64::from(plot.width.max(1));
    let plot_height = f64::from(plot.height.max(1));
    let window_width = f64::from(window_width);
    let window_height = f64::from(window_height);

    let scale = (window_width / plot_width)
        .min(window_height / plot_height)
        .floor()
        .max(1.0);
    let width = plot_width * scale;
    let height = plot_height * scale;

    BoundingBox {
        left: ((window_width - width) / 2.0).floor(),
        top: ((window_height - height) / 2.0).floor(),
        width,
        height,
    }
}

/// Window-backed display surface: a plot-sized `pixels` framebuffer scaled
/// into the window, with an egui overlay drawn on top.
pub struct PixelsSurface {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    plot: SurfaceSize,
    window_width: u32,
    window_height: u32,
}

impl PixelsSurface {
    pub fn new(window: &'static Window, plot: SurfaceSize) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let mut pixels = Pixels::new(plot.width, plot.height, surface_texture)?;
        pixels.clear_color(wgpu::Color::BLACK);

        for pixel in pixels.frame_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&[0, 0, 0, 255]);
        }

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None, // depth format
            1,    // msaa samples
        );

        Ok(Self {
            pixels,
            egui_renderer,
            plot,
            window_width: size.width,
            window_height: size.height,
        })
    }

    /// Follows the window size; the framebuffer keeps the plot resolution.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.window_width = width;
        self.window_height = height;
        self.pixels.resize_surface(width, height)
    }

    /// Presents the framebuffer and the egui overlay.
    pub fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
    ) -> Result<(), pixels::Error> {
        if self.window_width == 0 || self.window_height == 0 {
            return Ok(());
        }

        let window_size = [self.window_width, self.window_height];
        let egui_renderer = &mut self.egui_renderer;

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);

            let clipped_primitives =
                egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());
            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: window_size,
                pixels_per_point: egui_ctx.pixels_per_point(),
            };
            let textures_delta = egui_output.textures_delta;

            for (id, delta) in &textures_delta.set {
                egui_renderer.update_texture(&context.device, &context.queue, *id, delta);
            }
            egui_renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            // keep the plot underneath
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                egui_renderer.render(&mut render_pass, &clipped_primitives, &screen_descriptor);
            }

            for id in &textures_delta.free {
                egui_renderer.free_texture(id);
            }

            Ok(())
        })
    }
}

impl DisplaySurface for PixelsSurface {
    fn bounding_box(&self) -> BoundingBox {
        plot_bounds(self.window_width, self.window_height, self.plot)
    }

    fn size(&self) -> SurfaceSize {
        self.plot
    }

    fn draw_image(&mut self, image: PixelBufferView<'_>, x: u32, y: u32) {
        if !image.is_well_formed() || x >= self.plot.width || y >= self.plot.height {
            return;
        }

        let columns = image.width().min(self.plot.width - x) as usize;
        let rows = image.height().min(self.plot.height - y);
        let stride = self.plot.width as usize * BYTES_PER_PIXEL;
        let frame = self.pixels.frame_mut();

        for (offset, source) in (0..rows).map_while(|row| image.row(row)).enumerate() {
            let source = &source[..columns * BYTES_PER_PIXEL];
            let start = (y as usize + offset) * stride + x as usize * BYTES_PER_PIXEL;
            frame[start..start + source.len()].copy_from_slice(source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLOT: SurfaceSize = SurfaceSize {
        width: 500,
        height: 500,
    };

    #[test]
    fn plot_fills_matching_window() {
        assert_eq!(
            plot_bounds(500, 500, PLOT),
            BoundingBox {
                left: 0.0,
                top: 0.0,
                width: 500.0,
                height: 500.0
            }
        );
    }

    #[test]
    fn plot_scales_by_whole_numbers_and_centres() {
        let bounds = plot_bounds(1100, 1000, PLOT);

        assert_eq!(bounds.width, 1000.0);
        assert_eq!(bounds.height, 1000.0);
        assert_eq!(bounds.left, 50.0);
        assert_eq!(bounds.top, 0.0);
    }

    #[test]
    fn plot_never_shrinks_below_native_size() {
        let bounds = plot_bounds(300, 300, PLOT);

        assert_eq!(bounds.width, 500.0);
        assert_eq!(bounds.left, -100.0);
    }
}
