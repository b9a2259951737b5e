//! Pure-computation pixel buffer conversion from a [`Canvas`].
//!
//! Always available (no feature gate) so hosts without the `png` feature can
//! still hand frames to their own display surface.

use wavy_core::canvas::Canvas;

/// Quantizes the canvas to an RGBA8 buffer of `width * height * 4` bytes.
///
/// The canvas is opaque, so alpha is always 255.
pub fn canvas_to_rgba(canvas: &Canvas) -> Vec<u8> {
    canvas
        .pixels()
        .iter()
        .flat_map(|&srgb| {
            let [r, g, b] = srgb.to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use wavy_core::canvas::DrawCommand;
    use wavy_core::color::{Color, Srgb};

    #[test]
    fn canvas_to_rgba_correct_length() {
        let canvas = Canvas::new(8, 4, Srgb::BLACK).unwrap();
        assert_eq!(canvas_to_rgba(&canvas).len(), 8 * 4 * 4);
    }

    #[test]
    fn canvas_to_rgba_alpha_always_255() {
        let mut canvas = Canvas::new(4, 4, Srgb::BLACK).unwrap();
        canvas.draw(&[DrawCommand {
            position: DVec2::new(2.0, 2.0),
            color: Color::rgb(255.0, 0.0, 0.0, 40.0),
            radius: 1.5,
        }]);
        let buf = canvas_to_rgba(&canvas);
        for (i, &byte) in buf.iter().enumerate() {
            if i % 4 == 3 {
                assert_eq!(byte, 255, "alpha at pixel {} should be 255", i / 4);
            }
        }
    }

    #[test]
    fn canvas_to_rgba_writes_rows_in_order() {
        let background = Srgb::from_hex("#102030").unwrap();
        let mut canvas = Canvas::new(3, 2, background).unwrap();
        // Opaque blue dot covering only pixel (2, 1).
        canvas.fill_circle(DVec2::new(2.5, 1.5), 0.2, Color::rgb(0.0, 0.0, 255.0, 255.0));
        let buf = canvas_to_rgba(&canvas);
        assert_eq!(&buf[0..4], &[0x10, 0x20, 0x30, 255]);
        let last = (3 + 2) * 4;
        assert_eq!(&buf[last..last + 4], &[0, 0, 255, 255]);
    }
}
