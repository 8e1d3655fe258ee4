/*
 * Any copyright is dedicated to the Public Domain.
 * https://creativecommons.org/publicdomain/zero/1.0/
 */

use super::*;
use super::super::segment::{
    CompositionObject,
    ObjectDefinition,
    PresentationComposition,
    WindowDefinition,
};

fn draw_set(pts: u32, composition_number: u16) -> DisplaySet {
    DisplaySet {
        pts,
        dts: pts,
        composition: PresentationComposition {
            width: 1920,
            height: 1080,
            frame_rate: 0x10,
            composition_number,
            composition_state: CompositionState::EpochStart,
            palette_update: false,
            palette_id: 0,
            objects: vec![
                CompositionObject {
                    object_id: 0,
                    window_id: 0,
                    x: 100,
                    y: 900,
                    crop: None,
                },
            ],
        },
        windows: Some(
            vec![
                WindowDefinition { id: 0, x: 100, y: 900, width: 600, height: 100 },
            ]
        ),
        palette: None,
        object: Some(
            ObjectDefinition {
                id: 0,
                version: 0,
                first: true,
                last: true,
                width: 1,
                height: 1,
                data: vec![0x01, 0x00, 0x00],
            }
        ),
    }
}

fn clear_set(pts: u32, composition_number: u16) -> DisplaySet {
    DisplaySet {
        pts,
        dts: pts,
        composition: PresentationComposition {
            width: 1920,
            height: 1080,
            frame_rate: 0x10,
            composition_number,
            composition_state: CompositionState::Normal,
            palette_update: false,
            palette_id: 0,
            objects: vec![],
        },
        windows: None,
        palette: None,
        object: None,
    }
}

#[test]
fn test_reverse_single_pair() {

    let sets = vec![draw_set(900, 1), clear_set(1800, 2)];
    let reversed = reverse(&sets, 9_000).unwrap();

    assert_eq!(reversed.len(), 2);
    assert_eq!(reversed[0].pts, 7_200);
    assert_eq!(reversed[0].composition, sets[0].composition);
    assert_eq!(reversed[0].object, sets[0].object);
    assert_eq!(reversed[1].pts, 8_100);
    assert_eq!(reversed[1].composition, sets[1].composition);
}

#[test]
fn test_reverse_reorders_pairs() {

    let sets = vec![
        draw_set(900, 1),
        clear_set(1_800, 2),
        draw_set(3_600, 3),
        clear_set(4_500, 4),
    ];
    let reversed = reverse(&sets, 9_000).unwrap();

    // The last pair plays first in the reversed stream.
    assert_eq!(reversed[0].composition.composition_number, 3);
    assert_eq!(reversed[0].pts, 4_500);
    assert_eq!(reversed[1].composition.composition_number, 4);
    assert_eq!(reversed[1].pts, 5_400);
    assert_eq!(reversed[2].composition.composition_number, 1);
    assert_eq!(reversed[2].pts, 7_200);
    assert_eq!(reversed[3].composition.composition_number, 2);
    assert_eq!(reversed[3].pts, 8_100);
}

#[test]
fn test_double_reverse_restores_original() {

    let sets = vec![
        draw_set(900, 1),
        clear_set(1_800, 2),
        draw_set(3_600, 3),
        clear_set(4_500, 4),
    ];
    let reversed = reverse(&sets, 9_000).unwrap();
    let restored = reverse(&reversed, 9_000).unwrap();

    assert_eq!(restored, sets);
}

#[test]
fn test_odd_length_stream() {

    let sets = vec![draw_set(900, 1)];

    assert!(matches!(
        reverse(&sets, 9_000),
        Err(ReverseError::OddLengthStream(1)),
    ));
}

#[test]
fn test_duration_exceeded() {

    let sets = vec![draw_set(900, 1), clear_set(1_800, 2)];

    assert!(matches!(
        reverse(&sets, 1_000),
        Err(ReverseError::DurationExceeded { index: 1 }),
    ));
}

#[test]
fn test_not_epoch_start() {

    let mut sets = vec![draw_set(900, 1), clear_set(1_800, 2)];

    sets[0].composition.composition_state = CompositionState::AcquisitionPoint;

    assert!(matches!(
        reverse(&sets, 9_000),
        Err(ReverseError::NotEpochStart { index: 0 }),
    ));
}

#[test]
fn test_not_a_pure_clear() {

    let mut sets = vec![draw_set(900, 1), clear_set(1_800, 2)];

    sets[1].composition.objects = sets[0].composition.objects.clone();

    assert!(matches!(
        reverse(&sets, 9_000),
        Err(ReverseError::NotAPureClear { index: 1 }),
    ));
}
