/*
 * This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a
 * copy of the MPL was not distributed with this file, You can obtain one at
 * https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2026 William Swartzendruber
 *
 * SPDX-License-Identifier: MPL-2.0
 */

//! Operates on individual segments.
//!
//! # Overview
//!
//! A segment is the most fundamental data structure within a PGS bitstream. Multiple segments
//! come together in a well-defined manner to form a display set (DS).
//!
//! There are five kinds that typically appear in this order:
//!
//! 1. Presentation Composition Segment (PCS)
//! 2. Window Definition Segment (WDS)
//! 3. Palette Definition Segment (PDS)
//! 4. Object Definition Segment (ODS)
//! 5. End Segment (ES)
//!
//! Every segment carries a presentation timestamp (PTS) and a decoding timestamp (DTS), both
//! in 90 kHz ticks. Within a given DS all segments carry identical values for both.
//!
//! ## Presentation Composition Segment (PCS)
//!
//! A PCS signals the start of a new display set. It defines the screen resolution, the role of
//! the DS within the larger epoch, and the mapping of objects into windows.
//!
//! ## Window Definition Segment (WDS)
//!
//! A WDS defines the areas of the screen that objects compose into. A single WDS can define
//! multiple windows, so each DS carries at most one.
//!
//! ## Palette Definition Segment (PDS)
//!
//! A PDS lists YCbCrA values, each with an ID that is unique within the segment.
//!
//! ## Object Definition Segment (ODS)
//!
//! An ODS carries a run-length compressed bitmap whose decoded pixels are IDs into an earlier
//! palette. The compressed payload is kept verbatim here; see [crate::rle] for decoding it.
//!
//! ## End Segment (ES)
//!
//! An ES closes out the current DS. It has an empty body.


mod segmentread;
mod segmentwrite;

pub use segmentread::*;
pub use segmentwrite::*;

use std::fmt;

/// Identifies the body kind of a segment, mirroring the type byte on the wire.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SegmentKind {
    PaletteDefinition,
    ObjectDefinition,
    PresentationComposition,
    WindowDefinition,
    End,
}

impl SegmentKind {

    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x14 => Some(Self::PaletteDefinition),
            0x15 => Some(Self::ObjectDefinition),
            0x16 => Some(Self::PresentationComposition),
            0x17 => Some(Self::WindowDefinition),
            0x80 => Some(Self::End),
            _ => None,
        }
    }

    pub(crate) fn to_byte(self) -> u8 {
        match self {
            Self::PaletteDefinition => 0x14,
            Self::ObjectDefinition => 0x15,
            Self::PresentationComposition => 0x16,
            Self::WindowDefinition => 0x17,
            Self::End => 0x80,
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            match self {
                Self::PaletteDefinition => "PDS",
                Self::ObjectDefinition => "ODS",
                Self::PresentationComposition => "PCS",
                Self::WindowDefinition => "WDS",
                Self::End => "END",
            }
        )
    }
}

/// Represents a PGS segment: one pair of timestamps and one body.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// The timestamp indicating when the composition is presented, in 90 kHz ticks.
    pub pts: u32,
    /// The timestamp indicating when decoding of the composition starts, in 90 kHz ticks.
    /// Never later than `pts`.
    pub dts: u32,
    pub body: SegmentBody,
}

/// Represents the body of a PGS segment.
#[derive(Clone, Debug, PartialEq)]
pub enum SegmentBody {
    PresentationComposition(PresentationComposition),
    WindowDefinition(Vec<WindowDefinition>),
    PaletteDefinition(PaletteDefinition),
    ObjectDefinition(ObjectDefinition),
    End,
}

impl SegmentBody {

    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::PresentationComposition(_) => SegmentKind::PresentationComposition,
            Self::WindowDefinition(_) => SegmentKind::WindowDefinition,
            Self::PaletteDefinition(_) => SegmentKind::PaletteDefinition,
            Self::ObjectDefinition(_) => SegmentKind::ObjectDefinition,
            Self::End => SegmentKind::End,
        }
    }
}

/// Defines the role of a DS within an epoch.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompositionState {
    /// The DS defines the start of a new epoch and contains every segment necessary to render
    /// a composition onto the screen.
    EpochStart,
    /// The DS refreshes the screen with the current composition, redefining the same windows,
    /// objects, and palettes as the `EpochStart` DS so that a player seeking into the middle of
    /// an epoch can still compose.
    AcquisitionPoint,
    /// The DS updates the composition that is on the screen. Typically used to clear the
    /// screen by defining a composition with no composition objects.
    Normal,
}

/// Defines a Presentation Composition Segment (PCS) body.
#[derive(Clone, Debug, PartialEq)]
pub struct PresentationComposition {
    /// The width of the display in pixels.
    pub width: u16,
    /// The height of the display in pixels.
    pub height: u16,
    /// Always `0x10` in practice; carried verbatim.
    pub frame_rate: u8,
    pub composition_number: u16,
    pub composition_state: CompositionState,
    /// Set when this composition only updates the palette of the one already on screen.
    pub palette_update: bool,
    /// The ID of the palette this composition draws from.
    pub palette_id: u8,
    pub objects: Vec<CompositionObject>,
}

/// Maps an object into a window at a screen position.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionObject {
    pub object_id: u16,
    pub window_id: u8,
    /// Horizontal offset from the top left pixel of the screen.
    pub x: u16,
    /// Vertical offset from the top left pixel of the screen.
    pub y: u16,
    /// Present exactly when the cropped flag is set on the wire.
    pub crop: Option<Crop>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Crop {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct WindowDefinition {
    pub id: u8,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Defines a Palette Definition Segment (PDS) body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaletteDefinition {
    pub id: u8,
    /// The version of this palette within the epoch.
    pub version: u8,
    /// Entry IDs are unique within the segment.
    pub entries: Vec<PaletteEntry>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PaletteEntry {
    pub id: u8,
    /// Luminance.
    pub y: u8,
    /// Red color difference.
    pub cr: u8,
    /// Blue color difference.
    pub cb: u8,
    pub alpha: u8,
}

/// Defines an Object Definition Segment (ODS) body.
///
/// The wire format allows an object to be split across consecutive segments via the `first`
/// and `last` flags. Only discrete objects (`first` and `last` both set) are supported;
/// reading or writing anything else fails with an unsupported-fragment error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObjectDefinition {
    pub id: u16,
    /// The version of this object within the epoch.
    pub version: u8,
    pub first: bool,
    pub last: bool,
    /// The width of the bitmap in pixels.
    pub width: u16,
    /// The height of the bitmap in pixels.
    pub height: u16,
    /// Run-length compressed bitmap data, carried verbatim.
    pub data: Vec<u8>,
}
