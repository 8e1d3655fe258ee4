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
        ReadError as SegmentReadError,
        ReadSegmentExt,
        SegmentBody,
        SegmentKind,
    },
};
use std::io::{ErrorKind, Read};
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for display set-reading operations.
pub type DisplaySetReadResult<T> = Result<T, ReadError>;

/// The error type for [ReadDisplaySetExt].
#[derive(ThisError, Debug)]
pub enum ReadError {
    /// A segment within the display set could not be read.
    #[error("segment value error")]
    SegmentError {
        #[from]
        source: SegmentReadError,
    },
    /// The first segment is not a presentation composition segment.
    #[error("expected a presentation composition segment, got {0}")]
    UnexpectedSegment(SegmentKind),
    /// A segment within the display set does not share the presentation composition's
    /// timestamps.
    #[error("{kind} timing is not consistent with presentation composition")]
    InconsistentTiming {
        kind: SegmentKind,
        pts: u32,
        dts: u32,
    },
    /// A new presentation composition appeared before the current display set was closed by an
    /// end segment.
    #[error("presentation composition not closed")]
    UnterminatedComposition,
    /// The display set carries more than one segment of the same kind.
    #[error("duplicate {0} segment in display set")]
    DuplicateSegment(SegmentKind),
    /// The source was exhausted after the display set was opened but before its end segment.
    #[error("source exhausted in the middle of a display set")]
    IncompleteDisplaySet,
}

/// Allows reading display sets from a source.
pub trait ReadDisplaySetExt {
    /// Reads the next display set from a source.
    ///
    /// End of input before the first segment of a set surfaces as the underlying
    /// [`UnexpectedEof`](std::io::ErrorKind::UnexpectedEof) I/O error; callers treat that as
    /// the clean end of the stream. Exhaustion once a set has been opened is
    /// [ReadError::IncompleteDisplaySet] instead.
    fn read_display_set(&mut self) -> DisplaySetReadResult<DisplaySet>;
}

impl<T: Read> ReadDisplaySetExt for T {

    fn read_display_set(&mut self) -> DisplaySetReadResult<DisplaySet> {

        let first = self.read_segment()?;
        let composition = match first.body {
            SegmentBody::PresentationComposition(pcs) => pcs,
            body => return Err(ReadError::UnexpectedSegment(body.kind())),
        };
        let pts = first.pts;
        let dts = first.dts;
        let mut windows = None;
        let mut palette = None;
        let mut object = None;

        loop {

            let segment = self.read_segment().map_err(|err| {
                match err {
                    SegmentReadError::IoError { source }
                        if source.kind() == ErrorKind::UnexpectedEof =>
                    {
                        ReadError::IncompleteDisplaySet
                    }
                    err => ReadError::SegmentError { source: err },
                }
            })?;

            if segment.pts != pts || segment.dts != dts {
                return Err(
                    ReadError::InconsistentTiming {
                        kind: segment.body.kind(),
                        pts: segment.pts,
                        dts: segment.dts,
                    }
                )
            }

            match segment.body {
                SegmentBody::PresentationComposition(_) => {
                    return Err(ReadError::UnterminatedComposition)
                }
                SegmentBody::WindowDefinition(wds) => {
                    if windows.is_some() {
                        return Err(
                            ReadError::DuplicateSegment(SegmentKind::WindowDefinition)
                        )
                    }
                    windows = Some(wds);
                }
                SegmentBody::PaletteDefinition(pds) => {
                    if palette.is_some() {
                        return Err(
                            ReadError::DuplicateSegment(SegmentKind::PaletteDefinition)
                        )
                    }
                    palette = Some(pds);
                }
                SegmentBody::ObjectDefinition(ods) => {
                    if object.is_some() {
                        return Err(
                            ReadError::DuplicateSegment(SegmentKind::ObjectDefinition)
                        )
                    }
                    object = Some(ods);
                }
                SegmentBody::End => break,
            }
        }

        Ok(
            DisplaySet {
                pts,
                dts,
                composition,
                windows,
                palette,
                object,
            }
        )
    }
}
