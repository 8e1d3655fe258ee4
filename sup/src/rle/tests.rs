/*
 * Any copyright is dedicated to the Public Domain.
 * https://creativecommons.org/publicdomain/zero/1.0/
 */

use super::*;
use super::super::segment::PaletteEntry;

const NO_MAP: [u8; 256] = [0; 256];

fn test_palette() -> PaletteDefinition {
    PaletteDefinition {
        id: 0,
        version: 0,
        entries: vec![
            PaletteEntry { id: 5, y: 16, cr: 128, cb: 128, alpha: 0 },
            PaletteEntry { id: 9, y: 235, cr: 128, cb: 128, alpha: 255 },
        ],
    }
}

#[test]
fn test_literal_pixels_single_row() {

    let mut data = vec![0x01; 16];

    data.extend_from_slice(&[0x00, 0x00]);

    let image = decode_rle(&data, 16, 1, &NO_MAP).unwrap();

    assert_eq!(image.width(), 16);
    assert_eq!(image.height(), 1);
    assert_eq!(image.indexes(), &[0x01; 16]);
}

#[test]
fn test_early_end_of_line() {

    let mut data = vec![0x01; 10];

    data.extend_from_slice(&[0x00, 0x00]);

    assert!(matches!(
        decode_rle(&data, 16, 1, &NO_MAP),
        Err(DecodeError::RowWidthMismatch { y: 0, x: 10, width: 16 }),
    ));
}

#[test]
fn test_short_zero_run() {

    // 16 pixels of color 0, end of line.
    let data = [0x00, 0x10, 0x00, 0x00];
    let image = decode_rle(&data, 16, 1, &NO_MAP).unwrap();

    assert_eq!(image.indexes(), &[0x00; 16]);
}

#[test]
fn test_long_zero_run() {

    // Case 01 with L = 0x0100 = 256.
    let data = [0x00, 0x41, 0x00, 0x00, 0x00];
    let image = decode_rle(&data, 256, 1, &NO_MAP).unwrap();

    assert_eq!(image.indexes(), &[0x00; 256]);
}

#[test]
fn test_short_color_run() {

    let palette = test_palette();
    let map = palette_index_map(&palette);
    // Three pixels of entry ID 9, thirteen of entry ID 5, end of line.
    let data = [0x00, 0x83, 0x09, 0x00, 0x8D, 0x05, 0x00, 0x00];
    let image = decode_rle(&data, 16, 1, &map).unwrap();
    let mut expected = vec![1u8; 3];

    expected.extend_from_slice(&[0u8; 13]);

    assert_eq!(image.indexes(), &expected[..]);
}

#[test]
fn test_long_color_run() {

    let palette = test_palette();
    let map = palette_index_map(&palette);
    // Case 11 with L = 0x0100 = 256 pixels of entry ID 9.
    let data = [0x00, 0xC1, 0x00, 0x09, 0x00, 0x00];
    let image = decode_rle(&data, 256, 1, &map).unwrap();

    assert_eq!(image.indexes(), &[0x01; 256]);
}

#[test]
fn test_run_overflows_row() {

    // A 20-pixel zero run on a 16-pixel row.
    let data = [0x00, 0x14, 0x00, 0x00];

    assert!(matches!(
        decode_rle(&data, 16, 1, &NO_MAP),
        Err(DecodeError::RowWidthMismatch { y: 0, x: 20, width: 16 }),
    ));
}

#[test]
fn test_multiple_rows() {

    let data = [
        0x00, 0x04, 0x00, 0x00,
        0x01, 0x02, 0x03, 0x04, 0x00, 0x00,
        0x00, 0x44, 0x00, 0x00, 0x00,
    ];

    // Third row length deliberately overflows into the 14-bit form: L = 0x0400 = 1024.
    assert!(matches!(
        decode_rle(&data, 4, 3, &NO_MAP),
        Err(DecodeError::RowWidthMismatch { y: 2, x: 1024, width: 4 }),
    ));

    let data = [
        0x00, 0x04, 0x00, 0x00,
        0x01, 0x02, 0x03, 0x04, 0x00, 0x00,
        0x00, 0x04, 0x00, 0x00,
    ];
    let image = decode_rle(&data, 4, 3, &NO_MAP).unwrap();

    assert_eq!(
        image.indexes(),
        &[
            0x00, 0x00, 0x00, 0x00,
            0x01, 0x02, 0x03, 0x04,
            0x00, 0x00, 0x00, 0x00,
        ],
    );
}

#[test]
fn test_missing_final_end_of_line() {

    let data = [0x00, 0x04];

    assert!(matches!(
        decode_rle(&data, 4, 1, &NO_MAP),
        Err(DecodeError::ColumnHeightMismatch { y: 0, height: 1 }),
    ));
}

#[test]
fn test_too_many_rows() {

    let data = [
        0x00, 0x04, 0x00, 0x00,
        0x00, 0x04, 0x00, 0x00,
    ];

    assert!(matches!(
        decode_rle(&data, 4, 1, &NO_MAP),
        Err(DecodeError::ColumnHeightMismatch { y: 2, height: 1 }),
    ));
}

#[test]
fn test_truncated_control_sequence() {

    let data = [0x00, 0x41];

    assert!(matches!(
        decode_rle(&data, 256, 1, &NO_MAP),
        Err(DecodeError::IncompleteRun),
    ));

    let data = [0x00];

    assert!(matches!(
        decode_rle(&data, 16, 1, &NO_MAP),
        Err(DecodeError::IncompleteRun),
    ));
}

#[test]
fn test_materialize() {

    let palette = test_palette();
    let map = palette_index_map(&palette);
    let data = [0x00, 0x82, 0x09, 0x02, 0x00, 0x00];
    let image = decode_rle(&data, 3, 1, &map).unwrap();
    let pixels = image.materialize(&palette);

    assert_eq!(pixels[0], YcbcraPixel { y: 235, cb: 128, cr: 128, alpha: 255 });
    assert_eq!(pixels[1], YcbcraPixel { y: 235, cb: 128, cr: 128, alpha: 255 });
    // A literal raster index beyond the palette's entries is transparent.
    assert_eq!(pixels[2], YcbcraPixel { y: 16, cb: 128, cr: 128, alpha: 0 });
}
