/*
 * This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a
 * copy of the MPL was not distributed with this file, You can obtain one at
 * https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2026 William Swartzendruber
 *
 * SPDX-License-Identifier: MPL-2.0
 */

//! Reads, writes, and transforms Presentation Graphics Stream (PGS) subtitle bitstreams.
//!
//! A PGS bitstream is a sequence of segments, each carrying two 90 kHz timestamps and one of
//! five body kinds. Consecutive segments group into display sets, the unit of meaning for a
//! subtitle presentation. This crate offers three layers:
//!
//! 1. [segment] — decoding and encoding of individual segments.
//! 2. [displayset] — assembly of segments into display sets and back.
//! 3. [rle] and [reverse] — decoding of compressed bitmap objects into indexed rasters, and
//!    time-reversal of a display set sequence against a total stream duration.
//!
//! Timestamps are kept as raw 90 kHz ticks throughout so that decoding a bitstream and
//! re-encoding it reproduces the input byte for byte.

pub mod displayset;
pub mod reverse;
pub mod rle;
pub mod segment;

use std::time::Duration;

/// Converts a 90 kHz tick count into a [Duration].
pub fn ts_to_duration(ts: u32) -> Duration {
    // One tick is 100,000/9 nanoseconds.
    Duration::from_nanos(ts as u64 * 100_000 / 9)
}

/// Converts a [Duration] into a 90 kHz tick count, rounding to the nearest tick.
///
/// Durations produced by [ts_to_duration] convert back to their original tick counts.
pub fn duration_to_ts(duration: Duration) -> u32 {
    ((duration.as_nanos() * 9 + 50_000) / 100_000) as u32
}

/// Renders a 90 kHz tick count as an `HH:MM:SS.mmm` timestamp.
pub fn ts_to_timestamp(ts: u32) -> String {

    let millis = ts as u64 / 90;
    let hours = millis / 3_600_000;
    let minutes = millis % 3_600_000 / 60_000;
    let seconds = millis % 60_000 / 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis % 1_000)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_ts_duration_cycle() {
        for &ts in &[0_u32, 1, 89, 90, 5_273_461, u32::MAX] {
            assert_eq!(duration_to_ts(ts_to_duration(ts)), ts);
        }
    }

    #[test]
    fn test_ts_to_timestamp() {
        assert_eq!(ts_to_timestamp(0), "00:00:00.000");
        assert_eq!(ts_to_timestamp(90), "00:00:00.001");
        assert_eq!(ts_to_timestamp(90_000 * 3_661 + 90 * 42), "01:01:01.042");
    }
}
