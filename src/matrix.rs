//! 5×5 WS2812 matrix: per-cell colour words and the LED-chain adapter.
//!
//! Colours are packed the way the WS2812 shifts them in, green first:
//! `G << 24 | R << 16 | B << 8`, low byte unused. Cells are streamed in
//! index order `0..25`. The wire protocol itself belongs to whichever
//! [`SmartLedsWriteAsync`] driver the firmware plugs in.

use crate::error::{Error, Result};
use crate::level::FillLevel;
use crate::traits::PixelMatrix;
use smart_leds::{SmartLedsWriteAsync, RGB8};

/// Number of cells on the matrix.
pub const MATRIX_CELLS: usize = 25;

/// Pack a colour into a GRB transmission word.
pub const fn pack_grb(color: RGB8) -> u32 {
    (color.g as u32) << 24 | (color.r as u32) << 16 | (color.b as u32) << 8
}

/// Inverse of [`pack_grb`]; the low byte is ignored.
pub const fn unpack_grb(word: u32) -> RGB8 {
    RGB8 {
        r: (word >> 16) as u8,
        g: (word >> 24) as u8,
        b: (word >> 8) as u8,
    }
}

/// Packed colour words for every cell, in scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    words: [u32; MATRIX_CELLS],
}

impl Frame {
    /// Cell `i` gets `lit` when `i < level.lit_cells(25)`, otherwise `unlit`.
    pub fn for_level(level: FillLevel, lit: RGB8, unlit: RGB8) -> Self {
        let lit_cells = level.lit_cells(MATRIX_CELLS);
        let (on, off) = (pack_grb(lit), pack_grb(unlit));
        let mut words = [off; MATRIX_CELLS];
        for word in words.iter_mut().take(lit_cells) {
            *word = on;
        }
        Self { words }
    }

    pub fn words(&self) -> &[u32; MATRIX_CELLS] {
        &self.words
    }

    /// Cell colours in scan order.
    pub fn colors(&self) -> impl Iterator<Item = RGB8> + '_ {
        self.words.iter().map(|&w| unpack_grb(w))
    }
}

/// Matrix backed by any async smart-LED chain driver.
pub struct SmartLedMatrix<W> {
    leds: W,
}

impl<W> SmartLedMatrix<W> {
    pub fn new(leds: W) -> Self {
        Self { leds }
    }
}

impl<W> PixelMatrix for SmartLedMatrix<W>
where
    W: SmartLedsWriteAsync,
    W::Color: From<RGB8>,
{
    async fn show(&mut self, frame: &Frame) -> Result<()> {
        self.leds
            .write(frame.colors())
            .await
            .map_err(|_| Error::Matrix)
    }
}
