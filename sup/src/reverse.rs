/*
 * This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a
 * copy of the MPL was not distributed with this file, You can obtain one at
 * https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2026 William Swartzendruber
 *
 * SPDX-License-Identifier: MPL-2.0
 */

//! Reverses a display set sequence in time.
//!
//! The input is interpreted as alternating (draw, clear) pairs in forward playback order: each
//! epoch-starting composition puts a subtitle on screen and the following pure-clear
//! composition takes it off again. Reversing the stream against the total video duration walks
//! the pairs from last to first and mirrors every timestamp, so that a subtitle appears when
//! the backward-played video reaches the moment it originally disappeared.

#[cfg(test)]
mod tests;

use super::{
    displayset::DisplaySet,
    segment::CompositionState,
};
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for the reverse transform.
pub type ReverseResult<T> = Result<T, ReverseError>;

/// The error type for [reverse].
#[derive(ThisError, Debug)]
pub enum ReverseError {
    /// The display set sequence cannot be split into (draw, clear) pairs.
    #[error("display set count {0} is not even")]
    OddLengthStream(usize),
    /// A display set carries a timestamp beyond the stream duration.
    #[error("display set {index}: timestamp is greater than the stream duration")]
    DurationExceeded {
        index: usize,
    },
    /// A drawing display set does not start an epoch.
    #[error("display set {index}: composition state is not epoch start")]
    NotEpochStart {
        index: usize,
    },
    /// A clearing display set carries more than a bare normal-case composition.
    #[error("display set {index}: does not clear the screen")]
    NotAPureClear {
        index: usize,
    },
}

/// Reverses a sequence of (draw, clear) display set pairs against a total stream duration
/// given in 90 kHz ticks.
pub fn reverse(sets: &[DisplaySet], duration: u32) -> ReverseResult<Vec<DisplaySet>> {

    if sets.len() % 2 != 0 {
        return Err(ReverseError::OddLengthStream(sets.len()))
    }

    let mut reversed = Vec::with_capacity(sets.len());

    for index in (0..sets.len()).step_by(2).rev() {

        let draw = &sets[index];
        let clear = &sets[index + 1];

        if draw.pts > duration || draw.dts > duration {
            return Err(ReverseError::DurationExceeded { index })
        }
        if clear.pts > duration || clear.dts > duration {
            return Err(ReverseError::DurationExceeded { index: index + 1 })
        }
        if draw.composition.composition_state != CompositionState::EpochStart {
            return Err(ReverseError::NotEpochStart { index })
        }
        if clear.composition.composition_state != CompositionState::Normal
            || clear.composition.palette_update
            || !clear.composition.objects.is_empty()
            || clear.palette.is_some()
            || clear.object.is_some()
        {
            return Err(ReverseError::NotAPureClear { index: index + 1 })
        }

        // The drawing set now appears where the clearing set used to end, and vice versa.
        reversed.push(
            DisplaySet {
                pts: duration - clear.pts,
                dts: duration - clear.dts,
                ..draw.clone()
            }
        );
        reversed.push(
            DisplaySet {
                pts: duration - draw.pts,
                dts: duration - draw.dts,
                ..clear.clone()
            }
        );
    }

    Ok(reversed)
}
