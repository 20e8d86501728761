use sdl2::pixels::PixelFormatEnum;

use chip8_vm::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_vm::FrameBuffer;

/// # Display
/// Renders the 64x32 monochrome frame buffer into an SDL2 window.
///
/// The window is an integer multiple of the logical resolution; the frame is
/// uploaded as a 64x32 texture and stretched onto the whole canvas, so each
/// logical pixel renders as a scale-by-scale block.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Self {
        let video_subsystem = sdl.video().unwrap();
        let window = video_subsystem
            .window(
                "CHIP-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .unwrap();
        let canvas = window.into_canvas().build().unwrap();

        Display { canvas }
    }

    /// Flattens the frame buffer into an RGB24 texture: rows concatenated,
    /// each binary pixel triplicated into equal R/G/B channels at full or
    /// zero intensity.
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|pixel| std::iter::repeat(pixel).take(3))
            .map(|pixel| pixel * 255)
            .collect()
    }

    pub fn render(&mut self, frame: &FrameBuffer) {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .unwrap();

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Display::frame_to_texture(frame));
            })
            .unwrap();

        self.canvas.copy(&texture, None, None).unwrap();
        self.canvas.present()
    }
}
