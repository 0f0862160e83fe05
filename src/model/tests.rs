use std::sync::Arc;

use super::{
    ChannelKind, CoreError, Document, DocumentId, Extent, InteractionMode, PixelBuffer, Region,
    SelectionRect,
};

fn gradient(width: usize, height: usize, channels: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, channels, |x, y, c| (x + 10 * y + 50 * c) as u8)
        .expect("buffer")
}

fn document(buffer: PixelBuffer) -> Document {
    Document::new(DocumentId::new(1), "sample.png".to_string(), Arc::new(buffer)).expect("document")
}

#[test]
fn buffer_rejects_unsupported_channel_counts() {
    let error = PixelBuffer::filled(2, 2, 2, 0).expect_err("two channels");
    assert!(matches!(error, CoreError::InvalidBuffer(_)));
    assert!(PixelBuffer::filled(0, 2, 1, 0).is_err());
    assert!(PixelBuffer::from_raw(2, 2, 1, vec![0; 3]).is_err());
}

#[test]
fn buffers_with_equal_content_have_distinct_identity() {
    let first = PixelBuffer::filled(2, 2, 3, 7).expect("first");
    let second = PixelBuffer::filled(2, 2, 3, 7).expect("second");
    assert!(first.content_eq(&second));
    assert_ne!(first.id(), second.id());
}

#[test]
fn layout_names_channels_in_display_order() {
    assert_eq!(gradient(1, 1, 1).layout(), &[ChannelKind::Black]);
    assert_eq!(
        gradient(1, 1, 4).layout(),
        &[
            ChannelKind::Red,
            ChannelKind::Green,
            ChannelKind::Blue,
            ChannelKind::Alpha
        ]
    );
}

#[test]
fn region_new_is_strict() {
    let bounds = Extent::new(4, 3).expect("extent");
    assert!(Region::new(0, 0, 4, 3, bounds).is_ok());
    assert!(Region::new(1, 0, 4, 3, bounds).is_err());
    assert!(Region::new(0, 0, 0, 3, bounds).is_err());
}

#[test]
fn straddling_selection_is_clamped() {
    let mut doc = document(gradient(10, 8, 1));
    let region = doc
        .set_selection(SelectionRect::new(-3, 5, 6, 10))
        .expect("clamped");
    assert_eq!(
        (region.x(), region.y(), region.width(), region.height()),
        (0, 5, 3, 3)
    );
    assert_eq!(doc.selection(), Some(region));
}

#[test]
fn zero_area_selection_is_rejected() {
    let mut doc = document(gradient(10, 8, 1));
    let before = doc.revision();
    for rect in [
        SelectionRect::new(1, 1, 0, 4),
        SelectionRect::new(1, 1, 4, 0),
        SelectionRect::new(1, 1, -2, 4),
        SelectionRect::new(20, 20, 4, 4),
    ] {
        let error = doc.set_selection(rect).expect_err("rejected");
        assert!(matches!(error, CoreError::InvalidRegion { .. }));
    }
    assert_eq!(doc.selection(), None);
    assert_eq!(doc.revision(), before);
}

#[test]
fn selection_changes_bump_revision() {
    let mut doc = document(gradient(4, 4, 3));
    assert_eq!(doc.revision(), 0);
    doc.set_selection(SelectionRect::new(0, 0, 2, 2))
        .expect("select");
    let full = doc.select_all();
    assert_eq!(full, doc.buffer().full_region());
    doc.clear_selection();
    assert_eq!(doc.revision(), 3);
    doc.clear_selection();
    assert_eq!(doc.revision(), 3);
}

#[test]
fn rename_rejects_blank_names() {
    let mut doc = document(gradient(2, 2, 1));
    assert_eq!(doc.rename("   "), Err(CoreError::InvalidName));
    assert_eq!(doc.display_name(), "sample.png");
    doc.rename("renamed").expect("rename");
    assert_eq!(doc.display_name(), "renamed");
}

#[test]
fn interaction_mode_starts_in_select_and_switches_explicitly() {
    let mut doc = document(gradient(2, 2, 1));
    assert_eq!(doc.mode(), InteractionMode::Select);
    doc.set_mode(InteractionMode::Hand);
    assert_eq!(doc.mode(), InteractionMode::Hand);
}

#[test]
fn crop_copies_region_without_touching_document() {
    let doc = document(gradient(6, 5, 3));
    let region = Region::new(2, 1, 3, 2, doc.buffer().extent()).expect("region");
    let cropped = doc.crop(&region).expect("crop");
    assert_eq!((cropped.width(), cropped.height()), (3, 2));
    assert_eq!(cropped.sample(0, 0, 1), doc.buffer().sample(2, 1, 1));
    assert_eq!(cropped.sample(2, 1, 2), doc.buffer().sample(4, 2, 2));
    assert_eq!(doc.buffer().width(), 6);
    assert_eq!(doc.revision(), 0);
}

#[test]
fn crop_in_place_replaces_buffer_and_clears_selection() {
    let mut doc = document(gradient(6, 5, 1));
    let original = doc.buffer().id();
    doc.set_selection(SelectionRect::new(1, 1, 2, 2))
        .expect("select");
    doc.crop_in_place().expect("crop");
    assert_ne!(doc.buffer().id(), original);
    assert_eq!(doc.buffer().width(), 2);
    assert_eq!(doc.selection(), None);
    assert_eq!(doc.revision(), 2);
}

#[test]
fn selection_rect_parses_from_cli_syntax() {
    let rect: SelectionRect = "1, 2,3,4".parse().expect("parse");
    assert_eq!(rect, SelectionRect::new(1, 2, 3, 4));
    assert!("1,2,3".parse::<SelectionRect>().is_err());
    assert!("a,b,c,d".parse::<SelectionRect>().is_err());
}

#[test]
fn oversized_raw_dimensions_are_rejected() {
    let error = PixelBuffer::from_raw(usize::MAX, 2, 1, vec![0]).expect_err("overflow");
    assert!(matches!(error, CoreError::InvalidBuffer(_)));
    assert!(PixelBuffer::from_raw(2, usize::MAX / 2 + 1, 3, vec![0]).is_err());
}
