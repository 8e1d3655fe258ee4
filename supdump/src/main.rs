/*
 * This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a
 * copy of the MPL was not distributed with this file, You can obtain one at
 * https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2026 William Swartzendruber
 *
 * SPDX-License-Identifier: MPL-2.0
 */

use sup::{
    ts_to_timestamp,
    segment::{
        CompositionState,
        ReadError,
        ReadSegmentExt,
        SegmentBody,
    },
};
use std::{
    fs::File,
    io::{stdin, BufReader, ErrorKind, Read},
};
use clap::{app_from_crate, crate_authors, crate_description, crate_name, crate_version, Arg};

fn main() {

    let matches = app_from_crate!()
        .arg(Arg::with_name("input")
            .index(1)
            .value_name("INPUT-FILE")
            .help("Input PGS file; use - for STDIN")
            .required(true)
        )
        .after_help(format!("This utility will dump PGS subtitle bitstream data.\n\n\
            Copyright © 2026 William Swartzendruber\n\
            Licensed under the Mozilla Public License 2.0\n\
            <{}>", env!("CARGO_PKG_REPOSITORY")).as_str())
        .get_matches();
    let input_value = matches.value_of("input").unwrap();
    let (mut stdin_read, mut file_read);
    let mut input = BufReader::<&mut dyn Read>::new(
        if input_value == "-" {
            stdin_read = stdin();
            &mut stdin_read
        } else {
            file_read = File::open(input_value)
                .expect("Could not open input file for reading.");
            &mut file_read
        }
    );

    eprintln!("Iterating through PGS segments...");

    loop {

        let segment = match input.read_segment() {
            Ok(segment) => segment,
            Err(ReadError::IoError { source }) => {
                if source.kind() != ErrorKind::UnexpectedEof {
                    panic!("Could not read segment due to IO error: {}", source)
                }
                break
            }
            Err(err) => panic!("Could not read segment due to bitstream error: {}", err),
        };

        match segment.body {
            SegmentBody::PresentationComposition(pcs) => {
                println!("presentation_composition_segment({})", ts_to_timestamp(segment.pts));
                println!("  width = {}", pcs.width);
                println!("  height = {}", pcs.height);
                println!("  frame_rate = 0x{:02x}", pcs.frame_rate);
                println!("  composition_number = {}", pcs.composition_number);
                println!("  composition_state = {}", match pcs.composition_state {
                    CompositionState::EpochStart => "EPOCH_START",
                    CompositionState::AcquisitionPoint => "ACQUISITION_POINT",
                    CompositionState::Normal => "NORMAL_CASE",
                });
                println!("  palette_update = {}", pcs.palette_update);
                println!("  palette_id = {}", pcs.palette_id);
                for object in pcs.objects.iter() {
                    println!("  composition_object");
                    println!("    object_id = {}", object.object_id);
                    println!("    window_id = {}", object.window_id);
                    println!("    object_horizontal_position = {}", object.x);
                    println!("    object_vertical_position = {}", object.y);
                    if let Some(crop) = &object.crop {
                        println!("    object_cropping_horizontal_position = {}", crop.x);
                        println!("    object_cropping_vertical_position = {}", crop.y);
                        println!("    object_cropping_width = {}", crop.width);
                        println!("    object_cropping_height = {}", crop.height);
                    }
                }
            }
            SegmentBody::WindowDefinition(windows) => {
                println!("window_definition_segment({})", ts_to_timestamp(segment.pts));
                for window in windows.iter() {
                    println!("  window_id = {}", window.id);
                    println!("  window_horizontal_position = {}", window.x);
                    println!("  window_vertical_position = {}", window.y);
                    println!("  window_width = {}", window.width);
                    println!("  window_height = {}", window.height);
                }
            }
            SegmentBody::PaletteDefinition(pds) => {
                println!("palette_definition_segment({})", ts_to_timestamp(segment.pts));
                println!("  palette_id = {}", pds.id);
                println!("  palette_version = {}", pds.version);
                println!("  palette_entries = [{}]", pds.entries.len());
            }
            SegmentBody::ObjectDefinition(ods) => {
                println!("object_definition_segment({})", ts_to_timestamp(segment.pts));
                println!("  object_id = {}", ods.id);
                println!("  object_version = {}", ods.version);
                println!("  object_width = {}", ods.width);
                println!("  object_height = {}", ods.height);
                println!("  object_data = [{}]", ods.data.len());
            }
            SegmentBody::End => {
                println!("end_segment({})", ts_to_timestamp(segment.pts));
                println!();
            }
        }
    }
}
