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
    CompositionState,
    ObjectDefinition,
    PaletteDefinition,
    PresentationComposition,
    Segment,
    SegmentBody,
    WindowDefinition,
};
use std::io::{Error as IoError, Write};
use byteorder::{BigEndian, WriteBytesExt};
use thiserror::Error as ThisError;

/// The largest compressed object payload a single segment body can hold, given the 16-bit body
/// size field and the 11-byte ODS prefix.
const MAX_OBJECT_DATA_SIZE: usize = 0xFFFF - 11;

/// A specialized [`Result`](std::result::Result) type for segment-writing operations.
pub type SegmentWriteResult<T> = Result<T, WriteError>;

/// The error type for [WriteSegmentExt].
///
/// Errors are caused by either invalid state or by an underlying I/O error. Every segment that
/// would fail to parse is rejected here before any of its bytes are emitted.
#[derive(ThisError, Debug)]
pub enum WriteError {
    /// The segment could not be written because of an underlying I/O error.
    #[error("segment IO error")]
    IoError {
        #[from]
        source: IoError,
    },
    /// The segment declares a decoding timestamp later than its presentation timestamp.
    #[error("decoding timestamp {dts} is after presentation timestamp {pts}")]
    DecodingTimeAfterPresentationTime {
        pts: u32,
        dts: u32,
    },
    /// The presentation composition has more than 255 composition objects.
    #[error("too many composition objects in presentation composition segment")]
    TooManyCompositionObjects,
    /// The window definition has more than 255 windows.
    #[error("too many window definitions")]
    TooManyWindowDefinitions,
    /// The palette definition defines the same entry ID more than once.
    #[error("palette entry ID {0} is defined more than once")]
    DuplicatePaletteEntryId(u8),
    /// The object definition data does not fit within a single segment body.
    #[error("object data is too large")]
    ObjectDataTooLarge,
    /// The object definition is one fragment of a multi-segment object, which is not
    /// supported.
    #[error("multi-fragment object definitions are not supported")]
    UnsupportedObjectFragment,
}

/// Allows writing segments to a sink.
pub trait WriteSegmentExt {
    /// Writes a segment to a sink, recomputing every size and count field from the segment
    /// itself.
    fn write_segment(&mut self, segment: &Segment) -> SegmentWriteResult<()>;
}

impl<T: Write> WriteSegmentExt for T {

    fn write_segment(&mut self, segment: &Segment) -> SegmentWriteResult<()> {

        if segment.dts > segment.pts {
            return Err(
                WriteError::DecodingTimeAfterPresentationTime {
                    pts: segment.pts,
                    dts: segment.dts,
                }
            )
        }

        let payload = match &segment.body {
            SegmentBody::PresentationComposition(pcs) => generate_pcs(pcs)?,
            SegmentBody::WindowDefinition(windows) => generate_wds(windows)?,
            SegmentBody::PaletteDefinition(pds) => generate_pds(pds)?,
            SegmentBody::ObjectDefinition(ods) => generate_ods(ods)?,
            SegmentBody::End => vec![],
        };

        self.write_u16::<BigEndian>(0x5047)?;
        self.write_u32::<BigEndian>(segment.pts)?;
        self.write_u32::<BigEndian>(segment.dts)?;
        self.write_u8(segment.body.kind().to_byte())?;
        self.write_u16::<BigEndian>(payload.len() as u16)?;
        self.write_all(&payload)?;

        Ok(())
    }
}

fn generate_pcs(pcs: &PresentationComposition) -> SegmentWriteResult<Vec<u8>> {

    if pcs.objects.len() > 255 {
        return Err(WriteError::TooManyCompositionObjects)
    }

    let mut payload = vec![];

    payload.write_u16::<BigEndian>(pcs.width)?;
    payload.write_u16::<BigEndian>(pcs.height)?;
    payload.write_u8(pcs.frame_rate)?;
    payload.write_u16::<BigEndian>(pcs.composition_number)?;
    payload.write_u8(
        match pcs.composition_state {
            CompositionState::Normal => 0x00,
            CompositionState::AcquisitionPoint => 0x40,
            CompositionState::EpochStart => 0x80,
        }
    )?;
    payload.write_u8(if pcs.palette_update { 0x80 } else { 0x00 })?;
    payload.write_u8(pcs.palette_id)?;
    payload.write_u8(pcs.objects.len() as u8)?;

    for object in &pcs.objects {

        payload.write_u16::<BigEndian>(object.object_id)?;
        payload.write_u8(object.window_id)?;
        payload.write_u8(if object.crop.is_some() { 0x40 } else { 0x00 })?;
        payload.write_u16::<BigEndian>(object.x)?;
        payload.write_u16::<BigEndian>(object.y)?;

        if let Some(crop) = &object.crop {
            payload.write_u16::<BigEndian>(crop.x)?;
            payload.write_u16::<BigEndian>(crop.y)?;
            payload.write_u16::<BigEndian>(crop.width)?;
            payload.write_u16::<BigEndian>(crop.height)?;
        }
    }

    Ok(payload)
}

fn generate_wds(windows: &[WindowDefinition]) -> SegmentWriteResult<Vec<u8>> {

    if windows.len() > 255 {
        return Err(WriteError::TooManyWindowDefinitions)
    }

    let mut payload = vec![];

    payload.write_u8(windows.len() as u8)?;

    for window in windows {
        payload.write_u8(window.id)?;
        payload.write_u16::<BigEndian>(window.x)?;
        payload.write_u16::<BigEndian>(window.y)?;
        payload.write_u16::<BigEndian>(window.width)?;
        payload.write_u16::<BigEndian>(window.height)?;
    }

    Ok(payload)
}

fn generate_pds(pds: &PaletteDefinition) -> SegmentWriteResult<Vec<u8>> {

    let mut payload = vec![];
    let mut seen = [false; 256];

    payload.write_u8(pds.id)?;
    payload.write_u8(pds.version)?;

    for entry in &pds.entries {

        if seen[entry.id as usize] {
            return Err(WriteError::DuplicatePaletteEntryId(entry.id))
        }
        seen[entry.id as usize] = true;

        payload.write_u8(entry.id)?;
        payload.write_u8(entry.y)?;
        payload.write_u8(entry.cr)?;
        payload.write_u8(entry.cb)?;
        payload.write_u8(entry.alpha)?;
    }

    Ok(payload)
}

fn generate_ods(ods: &ObjectDefinition) -> SegmentWriteResult<Vec<u8>> {

    if !(ods.first && ods.last) {
        return Err(WriteError::UnsupportedObjectFragment)
    }
    if ods.data.len() > MAX_OBJECT_DATA_SIZE {
        return Err(WriteError::ObjectDataTooLarge)
    }

    let mut payload = vec![];

    payload.write_u16::<BigEndian>(ods.id)?;
    payload.write_u8(ods.version)?;
    payload.write_u8(0xC0)?;
    // The declared data length includes the four bytes occupied by width and height.
    payload.write_u24::<BigEndian>(ods.data.len() as u32 + 4)?;
    payload.write_u16::<BigEndian>(ods.width)?;
    payload.write_u16::<BigEndian>(ods.height)?;
    payload.write_all(&ods.data)?;

    Ok(payload)
}
