/*
 * This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a
 * copy of the MPL was not distributed with this file, You can obtain one at
 * https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2026 William Swartzendruber
 *
 * SPDX-License-Identifier: MPL-2.0
 */

use super::{
    CompositionObject,
    CompositionState,
    Crop,
    ObjectDefinition,
    PaletteDefinition,
    PaletteEntry,
    PresentationComposition,
    Segment,
    SegmentBody,
    SegmentKind,
    WindowDefinition,
};
use std::io::{Cursor, Error as IoError, Read};
use byteorder::{BigEndian, ReadBytesExt};
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for segment-reading operations.
pub type SegmentReadResult<T> = Result<T, ReadError>;

/// The error type for [ReadSegmentExt].
#[derive(ThisError, Debug)]
pub enum ReadError {
    /// The segment could not be read because of an underlying I/O error.
    #[error("segment IO error")]
    IoError {
        #[from]
        source: IoError,
    },
    /// The segment header does not start with the `0x5047` magic number.
    #[error("segment has unrecognized magic number")]
    UnrecognizedMagicNumber,
    /// The segment header carries an unrecognized type byte.
    #[error("segment has unrecognized kind: 0x{0:02x}")]
    UnrecognizedKind(u8),
    /// The segment header declares a decoding timestamp later than its presentation timestamp.
    #[error("decoding timestamp {dts} is after presentation timestamp {pts}")]
    DecodingTimeAfterPresentationTime {
        pts: u32,
        dts: u32,
    },
    /// The segment body does not occupy the byte count declared in the header.
    #[error("segment body declares {declared} bytes but occupies {actual}")]
    SizeMismatch {
        declared: usize,
        actual: usize,
    },
    /// The presentation composition carries an unrecognized composition state byte.
    #[error("presentation composition segment has unrecognized composition state")]
    UnrecognizedCompositionState,
    /// The presentation composition carries an unrecognized palette update flag byte.
    #[error("presentation composition segment has unrecognized palette update flag")]
    UnrecognizedPaletteUpdateFlag,
    /// A composition object carries an unrecognized cropped flag byte.
    #[error("composition object has unrecognized cropped flag")]
    UnrecognizedCropFlag,
    /// A palette definition defines the same entry ID more than once.
    #[error("palette entry ID {0} is defined more than once")]
    DuplicatePaletteEntryId(u8),
    /// An object definition carries an unrecognized sequence flag byte.
    #[error("object definition segment has unrecognized sequence flag")]
    UnrecognizedObjectSequenceFlag,
    /// An object definition declares a data length too small to cover its own width and height
    /// fields.
    #[error("object data length does not cover width and height")]
    InvalidObjectDataLength,
    /// An object definition is one fragment of a multi-segment object, which is not supported.
    #[error("multi-fragment object definitions are not supported")]
    UnsupportedObjectFragment,
}

/// Allows reading segments from a source.
pub trait ReadSegmentExt {
    /// Reads the next segment from a source.
    fn read_segment(&mut self) -> SegmentReadResult<Segment>;
}

impl<T: Read> ReadSegmentExt for T {

    fn read_segment(&mut self) -> SegmentReadResult<Segment> {

        if self.read_u16::<BigEndian>()? != 0x5047 {
            return Err(ReadError::UnrecognizedMagicNumber)
        }

        let pts = self.read_u32::<BigEndian>()?;
        let dts = self.read_u32::<BigEndian>()?;
        let kind_byte = self.read_u8()?;
        let kind = SegmentKind::from_byte(kind_byte)
            .ok_or(ReadError::UnrecognizedKind(kind_byte))?;

        if dts > pts {
            return Err(ReadError::DecodingTimeAfterPresentationTime { pts, dts })
        }

        let size = self.read_u16::<BigEndian>()? as usize;
        let mut payload = vec![0u8; size];

        self.read_exact(&mut payload)?;

        let body = match kind {
            SegmentKind::PresentationComposition => {
                SegmentBody::PresentationComposition(parse_pcs(&payload)?)
            }
            SegmentKind::WindowDefinition => {
                SegmentBody::WindowDefinition(parse_wds(&payload)?)
            }
            SegmentKind::PaletteDefinition => {
                SegmentBody::PaletteDefinition(parse_pds(&payload)?)
            }
            SegmentKind::ObjectDefinition => {
                SegmentBody::ObjectDefinition(parse_ods(&payload)?)
            }
            SegmentKind::End => {
                if size != 0 {
                    return Err(ReadError::SizeMismatch { declared: size, actual: 0 })
                }
                SegmentBody::End
            }
        };

        Ok(Segment { pts, dts, body })
    }
}

fn parse_pcs(payload: &[u8]) -> SegmentReadResult<PresentationComposition> {

    if payload.len() < 11 {
        return Err(ReadError::SizeMismatch { declared: payload.len(), actual: 11 })
    }

    let mut input = Cursor::new(payload);
    let width = input.read_u16::<BigEndian>()?;
    let height = input.read_u16::<BigEndian>()?;
    let frame_rate = input.read_u8()?;
    let composition_number = input.read_u16::<BigEndian>()?;
    let composition_state = match input.read_u8()? {
        0x00 => CompositionState::Normal,
        0x40 => CompositionState::AcquisitionPoint,
        0x80 => CompositionState::EpochStart,
        _ => return Err(ReadError::UnrecognizedCompositionState),
    };
    let palette_update = match input.read_u8()? {
        0x00 => false,
        0x80 => true,
        _ => return Err(ReadError::UnrecognizedPaletteUpdateFlag),
    };
    let palette_id = input.read_u8()?;
    let object_count = input.read_u8()? as usize;
    let mut objects = Vec::with_capacity(object_count);
    let mut consumed = 11;

    for _ in 0..object_count {

        if payload.len() < consumed + 8 {
            return Err(
                ReadError::SizeMismatch { declared: payload.len(), actual: consumed + 8 }
            )
        }

        let object_id = input.read_u16::<BigEndian>()?;
        let window_id = input.read_u8()?;
        let cropped = match input.read_u8()? {
            0x00 => false,
            0x40 => true,
            _ => return Err(ReadError::UnrecognizedCropFlag),
        };
        let x = input.read_u16::<BigEndian>()?;
        let y = input.read_u16::<BigEndian>()?;

        consumed += 8;

        let crop = if cropped {
            if payload.len() < consumed + 8 {
                return Err(
                    ReadError::SizeMismatch { declared: payload.len(), actual: consumed + 8 }
                )
            }
            consumed += 8;
            Some(
                Crop {
                    x: input.read_u16::<BigEndian>()?,
                    y: input.read_u16::<BigEndian>()?,
                    width: input.read_u16::<BigEndian>()?,
                    height: input.read_u16::<BigEndian>()?,
                }
            )
        } else {
            None
        };

        objects.push(CompositionObject { object_id, window_id, x, y, crop });
    }

    if consumed != payload.len() {
        return Err(ReadError::SizeMismatch { declared: payload.len(), actual: consumed })
    }

    Ok(
        PresentationComposition {
            width,
            height,
            frame_rate,
            composition_number,
            composition_state,
            palette_update,
            palette_id,
            objects,
        }
    )
}

fn parse_wds(payload: &[u8]) -> SegmentReadResult<Vec<WindowDefinition>> {

    if payload.is_empty() {
        return Err(ReadError::SizeMismatch { declared: 0, actual: 1 })
    }

    let mut input = Cursor::new(payload);
    let count = input.read_u8()? as usize;

    if payload.len() != 9 * count + 1 {
        return Err(
            ReadError::SizeMismatch { declared: payload.len(), actual: 9 * count + 1 }
        )
    }

    let mut windows = Vec::with_capacity(count);

    for _ in 0..count {
        windows.push(
            WindowDefinition {
                id: input.read_u8()?,
                x: input.read_u16::<BigEndian>()?,
                y: input.read_u16::<BigEndian>()?,
                width: input.read_u16::<BigEndian>()?,
                height: input.read_u16::<BigEndian>()?,
            }
        );
    }

    Ok(windows)
}

fn parse_pds(payload: &[u8]) -> SegmentReadResult<PaletteDefinition> {

    if payload.len() < 2 || (payload.len() - 2) % 5 != 0 {
        return Err(
            ReadError::SizeMismatch {
                declared: payload.len(),
                actual: payload.len().saturating_sub(2) / 5 * 5 + 2,
            }
        )
    }

    let mut input = Cursor::new(payload);
    let id = input.read_u8()?;
    let version = input.read_u8()?;
    let count = (payload.len() - 2) / 5;
    let mut entries = Vec::with_capacity(count);
    let mut seen = [false; 256];

    for _ in 0..count {

        let id = input.read_u8()?;

        if seen[id as usize] {
            return Err(ReadError::DuplicatePaletteEntryId(id))
        }
        seen[id as usize] = true;

        entries.push(
            PaletteEntry {
                id,
                y: input.read_u8()?,
                cr: input.read_u8()?,
                cb: input.read_u8()?,
                alpha: input.read_u8()?,
            }
        );
    }

    Ok(PaletteDefinition { id, version, entries })
}

fn parse_ods(payload: &[u8]) -> SegmentReadResult<ObjectDefinition> {

    if payload.len() < 11 {
        return Err(ReadError::SizeMismatch { declared: payload.len(), actual: 11 })
    }

    let mut input = Cursor::new(payload);
    let id = input.read_u16::<BigEndian>()?;
    let version = input.read_u8()?;
    let sequence_flag = input.read_u8()?;

    if sequence_flag & !0xC0 != 0 {
        return Err(ReadError::UnrecognizedObjectSequenceFlag)
    }

    let first = sequence_flag & 0x80 != 0;
    let last = sequence_flag & 0x40 != 0;

    if !(first && last) {
        return Err(ReadError::UnsupportedObjectFragment)
    }

    // The declared data length includes the four bytes occupied by width and height.
    let data_length = input.read_u24::<BigEndian>()?
        .checked_sub(4)
        .ok_or(ReadError::InvalidObjectDataLength)? as usize;
    let width = input.read_u16::<BigEndian>()?;
    let height = input.read_u16::<BigEndian>()?;

    if payload.len() != 11 + data_length {
        return Err(
            ReadError::SizeMismatch { declared: payload.len(), actual: 11 + data_length }
        )
    }

    let mut data = vec![0u8; data_length];

    input.read_exact(&mut data)?;

    Ok(ObjectDefinition { id, version, first, last, width, height, data })
}
