/*
 * This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a
 * copy of the MPL was not distributed with this file, You can obtain one at
 * https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2026 William Swartzendruber
 *
 * SPDX-License-Identifier: MPL-2.0
 */

//! Operates on whole display sets.
//!
//! A display set (DS) is a run of segments that starts with a presentation composition
//! segment and ends with an end segment. Every segment in between shares the composition's
//! timestamps and defines at most one window list, one palette, and one object.


mod displaysetread;
mod displaysetwrite;

pub use displaysetread::*;
pub use displaysetwrite::*;

use super::segment::{
    ObjectDefinition,
    PaletteDefinition,
    PresentationComposition,
    WindowDefinition,
};

/// Represents one complete display set.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplaySet {
    /// The presentation timestamp shared by every segment in the set, in 90 kHz ticks.
    pub pts: u32,
    /// The decoding timestamp shared by every segment in the set, in 90 kHz ticks.
    pub dts: u32,
    pub composition: PresentationComposition,
    /// Present exactly when the set carries a window definition segment. A segment defining
    /// zero windows is `Some(vec![])`, not `None`.
    pub windows: Option<Vec<WindowDefinition>>,
    pub palette: Option<PaletteDefinition>,
    pub object: Option<ObjectDefinition>,
}
