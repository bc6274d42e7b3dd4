use image::{imageops, DynamicImage, GenericImageView, Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Square, fully transparent canvas that holds an image centered at its own
/// resolution. The canvas edge is the image's longest side, so the image is
/// never scaled or cropped; only the short axis gains padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainCanvas {
    pub size: u32,
}

impl ContainCanvas {
    pub fn square_for(width: u32, height: u32) -> Self {
        Self {
            size: width.max(height),
        }
    }

    /// Top-left corner of a `width`x`height` image centered on the canvas
    pub fn offset(&self, width: u32, height: u32) -> (u32, u32) {
        (
            self.size.saturating_sub(width) / 2,
            self.size.saturating_sub(height) / 2,
        )
    }

    /// Render the image onto the transparent canvas.
    ///
    /// Allocates `size * size * 4` bytes; callers bound `size` first.
    pub fn apply(&self, img: &DynamicImage) -> RgbaImage {
        let (width, height) = img.dimensions();
        let (x, y) = self.offset(width, height);

        let mut canvas = RgbaImage::from_pixel(self.size, self.size, TRANSPARENT);
        imageops::replace(&mut canvas, &img.to_rgba8(), x as i64, y as i64);
        canvas
    }
}
