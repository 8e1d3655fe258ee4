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
    DisplaySet,
    super::segment::{
        Segment,
        SegmentBody,
        WriteError as SegmentWriteError,
        WriteSegmentExt,
    },
};
use std::io::Write;
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for display set-writing operations.
pub type DisplaySetWriteResult<T> = Result<T, WriteError>;

/// The error type for [WriteDisplaySetExt].
#[derive(ThisError, Debug)]
pub enum WriteError {
    /// A segment within the display set could not be written.
    #[error("segment value error")]
    SegmentError {
        #[from]
        source: SegmentWriteError,
    },
}

/// Allows writing display sets to a sink.
pub trait WriteDisplaySetExt {
    /// Writes a display set to a sink as its constituent segments, all sharing the set's
    /// timestamps: the presentation composition, the optional window list, palette, and
    /// object, and a closing end segment.
    fn write_display_set(&mut self, display_set: &DisplaySet) -> DisplaySetWriteResult<()>;
}

impl<T: Write> WriteDisplaySetExt for T {

    fn write_display_set(&mut self, display_set: &DisplaySet) -> DisplaySetWriteResult<()> {

        for body in display_set.to_segment_bodies() {
            self.write_segment(
                &Segment {
                    pts: display_set.pts,
                    dts: display_set.dts,
                    body,
                }
            )?;
        }

        Ok(())
    }
}

impl DisplaySet {

    fn to_segment_bodies(&self) -> Vec<SegmentBody> {

        let mut bodies = vec![
            SegmentBody::PresentationComposition(self.composition.clone()),
        ];

        if let Some(windows) = &self.windows {
            bodies.push(SegmentBody::WindowDefinition(windows.clone()));
        }
        if let Some(palette) = &self.palette {
            bodies.push(SegmentBody::PaletteDefinition(palette.clone()));
        }
        if let Some(object) = &self.object {
            bodies.push(SegmentBody::ObjectDefinition(object.clone()));
        }

        bodies.push(SegmentBody::End);
        bodies
    }
}
