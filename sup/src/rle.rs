/*
 * This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a
 * copy of the MPL was not distributed with this file, You can obtain one at
 * https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2026 William Swartzendruber
 *
 * SPDX-License-Identifier: MPL-2.0
 */

//! Decodes run-length compressed object data into indexed rasters.
//!
//! Object data is scanned left to right, one row at a time:
//!
//! - `CCCCCCCC` — a nonzero byte is one pixel of raster index `C`.
//! - `00000000 00000000` — end of line.
//! - `00000000 00LLLLLL` — `L` pixels of color 0 (`L` between 1 and 63).
//! - `00000000 01LLLLLL LLLLLLLL` — `L` pixels of color 0 (`L` between 64 and 16383).
//! - `00000000 10LLLLLL CCCCCCCC` — `L` pixels of the color with palette entry ID `C`.
//! - `00000000 11LLLLLL LLLLLLLL CCCCCCCC` — as above with a 14-bit length.
//!
//! Run colors are resolved through a palette entry ID map (see [palette_index_map]) so that
//! the raster holds ordinal palette slots; every row must span exactly the declared width and
//! the data must define exactly the declared number of rows.

#[cfg(test)]
mod tests;

use super::segment::PaletteDefinition;
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for object data decoding.
pub type RleDecodeResult<T> = Result<T, DecodeError>;

/// The error type for [decode_rle].
#[derive(ThisError, Debug)]
pub enum DecodeError {
    /// A row does not span exactly the declared object width, either because an end-of-line
    /// code arrived early or because a run would have overflowed the row.
    #[error("line {y} has width {x} instead of {width}")]
    RowWidthMismatch {
        y: u16,
        x: usize,
        width: u16,
    },
    /// The object data does not define exactly the declared number of rows.
    #[error("object has {y} lines instead of {height}")]
    ColumnHeightMismatch {
        y: u16,
        height: u16,
    },
    /// The object data ends in the middle of a control sequence.
    #[error("object data ends in the middle of a run")]
    IncompleteRun,
}

/// An indexed raster decoded from run-length compressed object data.
///
/// Each cell is a palette slot; colors materialize through [IndexedImage::materialize].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexedImage {
    width: u16,
    height: u16,
    indexes: Vec<u8>,
}

/// A YCbCr color with alpha, as resolved from a palette.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct YcbcraPixel {
    pub y: u8,
    pub cb: u8,
    pub cr: u8,
    pub alpha: u8,
}

/// Fully transparent video black, used for raster indexes a palette does not define.
const TRANSPARENT: YcbcraPixel = YcbcraPixel { y: 16, cb: 128, cr: 128, alpha: 0 };

impl IndexedImage {

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// The raster in row-major order, one palette slot per pixel.
    pub fn indexes(&self) -> &[u8] {
        &self.indexes
    }

    /// Resolves the raster against a palette, in row-major order. Indexes beyond the palette's
    /// entries come out as fully transparent.
    pub fn materialize(&self, palette: &PaletteDefinition) -> Vec<YcbcraPixel> {
        self.indexes.iter().map(|&index|
            palette.entries.get(index as usize).map_or(TRANSPARENT, |entry|
                YcbcraPixel {
                    y: entry.y,
                    cb: entry.cb,
                    cr: entry.cr,
                    alpha: entry.alpha,
                }
            )
        ).collect()
    }
}

/// Maps each palette entry ID to its ordinal slot within the palette. Unassigned IDs map to
/// slot 0.
pub fn palette_index_map(palette: &PaletteDefinition) -> [u8; 256] {

    let mut map = [0u8; 256];

    for (slot, entry) in palette.entries.iter().enumerate() {
        map[entry.id as usize] = slot as u8;
    }

    map
}

/// Decodes run-length compressed object data into an indexed raster of the declared
/// dimensions, resolving run colors through `index_map`.
pub fn decode_rle(
    data: &[u8],
    width: u16,
    height: u16,
    index_map: &[u8; 256],
) -> RleDecodeResult<IndexedImage> {

    let mut indexes = vec![0u8; width as usize * height as usize];
    let mut x = 0_usize;
    let mut y = 0_u16;
    let mut i = 0_usize;

    while i < data.len() {

        let byte = data[i];

        i += 1;

        if byte != 0 {
            // A literal pixel carries its raster index directly.
            put_run(&mut indexes, width, height, &mut x, y, 1, byte)?;
            continue;
        }

        let flag = *data.get(i).ok_or(DecodeError::IncompleteRun)?;

        i += 1;

        match flag >> 6 {
            0b00 => {
                if flag == 0x00 {
                    if x != width as usize {
                        return Err(DecodeError::RowWidthMismatch { y, x, width })
                    }
                    x = 0;
                    y += 1;
                } else {
                    let length = (flag & 0x3F) as usize;
                    put_run(&mut indexes, width, height, &mut x, y, length, 0)?;
                }
            }
            0b01 => {
                let low = *data.get(i).ok_or(DecodeError::IncompleteRun)?;
                i += 1;
                let length = ((flag & 0x3F) as usize) << 8 | low as usize;
                put_run(&mut indexes, width, height, &mut x, y, length, 0)?;
            }
            0b10 => {
                let id = *data.get(i).ok_or(DecodeError::IncompleteRun)?;
                i += 1;
                let length = (flag & 0x3F) as usize;
                put_run(&mut indexes, width, height, &mut x, y, length, index_map[id as usize])?;
            }
            0b11 => {
                let low = *data.get(i).ok_or(DecodeError::IncompleteRun)?;
                let id = *data.get(i + 1).ok_or(DecodeError::IncompleteRun)?;
                i += 2;
                let length = ((flag & 0x3F) as usize) << 8 | low as usize;
                put_run(&mut indexes, width, height, &mut x, y, length, index_map[id as usize])?;
            }
            _ => unreachable!(),
        }
    }

    if y != height {
        return Err(DecodeError::ColumnHeightMismatch { y, height })
    }

    Ok(IndexedImage { width, height, indexes })
}

fn put_run(
    indexes: &mut [u8],
    width: u16,
    height: u16,
    x: &mut usize,
    y: u16,
    length: usize,
    index: u8,
) -> RleDecodeResult<()> {

    if y >= height {
        return Err(DecodeError::ColumnHeightMismatch { y: y + 1, height })
    }
    if *x + length > width as usize {
        return Err(DecodeError::RowWidthMismatch { y, x: *x + length, width })
    }

    let start = y as usize * width as usize + *x;

    indexes[start..start + length].fill(index);
    *x += length;

    Ok(())
}
