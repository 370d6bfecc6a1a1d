//! Stores the Chip-8's 64x32 one-bit screen and implements the XOR blitter
//!
//! Each row is one `u64`, column 0 in the most significant bit. Sprite rows
//! are rotated into place, so columns past x=63 wrap to x=0 and rows past
//! y=31 wrap to y=0.

use std::fmt::{Display, Formatter, Write};

/// Screen width in pixels
pub const WIDTH: usize = 64;
/// Screen height in pixels
pub const HEIGHT: usize = 32;

/// A 64x32 one-bit framebuffer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    rows: [u64; HEIGHT],
}

impl Screen {
    /// Constructs a new, blank screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every pixel to 0
    pub fn clear(&mut self) {
        self.rows = [0; HEIGHT];
    }

    /// Gets the state of the pixel at (x, y)
    /// # Examples
    /// ```rust
    /// # use cheep::Screen;
    /// let mut screen = Screen::new();
    /// screen.draw_sprite(0, 0, &[0x80]);
    /// assert!(screen.get(0, 0));
    /// assert!(!screen.get(1, 0));
    /// ```
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.rows[y % HEIGHT] & 1u64.rotate_right(x as u32 % WIDTH as u32 + 1) != 0
    }

    /// The raw rows, one `u64` per scanline, column 0 in the MSB
    pub fn rows(&self) -> &[u64; HEIGHT] {
        &self.rows
    }

    /// XORs a sprite onto the screen at (x, y) and reports whether any lit
    /// pixel was turned off.
    ///
    /// The origin is taken modulo the screen size, and each row of 8 pixels
    /// (MSB first) wraps around both edges.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let (x, y) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut collision = false;
        for (line, &byte) in sprite.iter().enumerate() {
            let row = &mut self.rows[(y + line) % HEIGHT];
            let bits = ((byte as u64) << (WIDTH - 8)).rotate_right(x as u32);
            collision |= *row & bits != 0;
            *row ^= bits;
        }
        collision
    }
}

impl Display for Screen {
    /// Renders the screen with unicode half-blocks, two scanlines per row
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for pair in self.rows.chunks_exact(2) {
            for x in 0..WIDTH as u32 {
                let bit = 1u64.rotate_right(x + 1);
                f.write_char(match (pair[0] & bit != 0, pair[1] & bit != 0) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
