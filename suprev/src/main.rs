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
    displayset::{
        DisplaySet,
        ReadDisplaySetExt,
        ReadError as DisplaySetReadError,
        WriteDisplaySetExt,
    },
    reverse::reverse,
    segment::ReadError as SegmentReadError,
};
use std::{
    fs::File,
    io::{stdin, stdout, BufReader, BufWriter, ErrorKind, Read, Write},
};
use clap::{app_from_crate, crate_authors, crate_description, crate_name, crate_version, Arg};

fn main() {

    let matches = app_from_crate!()
        .arg(Arg::with_name("duration")
            .long("duration")
            .short("d")
            .value_name("MILLISECONDS")
            .help("Total duration of the video stream being reversed")
            .takes_value(true)
            .required(true)
            .validator(|value| {
                match value.parse::<u32>() {
                    Ok(millis) if millis.checked_mul(90).is_some() => Ok(()),
                    Ok(_) => Err("duration does not fit in 90 kHz ticks".to_string()),
                    Err(_) => Err("must be an unsigned integer".to_string()),
                }
            })
        )
        .arg(Arg::with_name("input")
            .index(1)
            .value_name("INPUT-FILE")
            .help("Input PGS file; use - for STDIN")
            .required(true)
        )
        .arg(Arg::with_name("output")
            .index(2)
            .value_name("OUTPUT-FILE")
            .help("Output PGS file; use - for STDOUT")
            .required(true)
        )
        .after_help(format!("This utility will reverse PGS subtitles in time so that they \
            can match a video stream that has been played backward.\n\n\
            Copyright © 2026 William Swartzendruber\n\
            Licensed under the Mozilla Public License 2.0\n\
            <{}>", env!("CARGO_PKG_REPOSITORY")).as_str())
        .get_matches();
    let duration = matches.value_of("duration").unwrap().parse::<u32>().unwrap()
        .checked_mul(90)
        .expect("Duration does not fit in 90 kHz ticks.");
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
    let output_value = matches.value_of("output").unwrap();
    let (mut stdout_write, mut file_write);
    let mut output = BufWriter::<&mut dyn Write>::new(
        if output_value == "-" {
            stdout_write = stdout();
            &mut stdout_write
        } else {
            file_write = File::create(output_value)
                .expect("Could not open output file for writing.");
            &mut file_write
        }
    );
    let mut display_sets = Vec::<DisplaySet>::new();

    eprintln!("Reading PGS display sets...");

    loop {

        match input.read_display_set() {
            Ok(display_set) => display_sets.push(display_set),
            Err(DisplaySetReadError::SegmentError {
                source: SegmentReadError::IoError { source },
            }) => {
                if source.kind() != ErrorKind::UnexpectedEof {
                    panic!("Could not read segment due to IO error: {}", source)
                }
                break
            }
            Err(err) => panic!("Could not read display set due to bitstream error: {}", err),
        }
    }

    eprintln!("Reversing {} display sets...", display_sets.len());

    let reversed = match reverse(&display_sets, duration) {
        Ok(reversed) => reversed,
        Err(err) => panic!("Could not reverse display sets: {}", err),
    };

    for display_set in reversed.iter() {
        if let Err(err) = output.write_display_set(display_set) {
            panic!("Could not write display set to output stream: {}", err)
        }
    }

    if let Err(err) = output.flush() {
        panic!("Could not flush output stream: {}", err)
    }
}
