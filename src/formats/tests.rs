use std::path::Path;

use image::{ImageBuffer, LumaA, Rgb};
use tempfile::tempdir;

use super::{
    DefaultImageCodec, ImageCodec, ImageFormat, IoError, read_buffer, supported_extensions,
    write_buffer,
};
use crate::model::PixelBuffer;

#[test]
fn format_is_chosen_by_case_insensitive_extension() {
    assert_eq!(
        ImageFormat::from_path(Path::new("a/b/Cells.PNG")).expect("png"),
        ImageFormat::Png
    );
    assert_eq!(
        ImageFormat::from_path(Path::new("x.jpeg")).expect("jpeg"),
        ImageFormat::Jpeg
    );
    assert_eq!(
        ImageFormat::from_path(Path::new("scan.vff")).expect("vff"),
        ImageFormat::Vff
    );
    assert!(matches!(
        ImageFormat::from_path(Path::new("stack.tiff")),
        Err(IoError::UnsupportedFormat(_))
    ));
    assert!(ImageFormat::from_path(Path::new("no_extension")).is_err());
    assert_eq!(supported_extensions(), vec!["png", "bmp", "jpg", "jpeg", "vff"]);
}

#[test]
fn png_roundtrip_preserves_samples() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("roundtrip.png");
    let buffer = PixelBuffer::from_fn(5, 3, 4, |x, y, c| (x * 40 + y * 7 + c) as u8)
        .expect("buffer");
    write_buffer(&path, &buffer).expect("write png");
    let restored = read_buffer(&path).expect("read png");
    assert!(restored.content_eq(&buffer));
    assert_ne!(restored.id(), buffer.id());
}

#[test]
fn bmp_roundtrip_keeps_rgb() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("image.bmp");
    let buffer = PixelBuffer::from_fn(4, 4, 3, |x, y, c| (x * 50 + y + c * 9) as u8)
        .expect("buffer");
    write_buffer(&path, &buffer).expect("write bmp");
    let restored = read_buffer(&path).expect("read bmp");
    assert!(restored.content_eq(&buffer));
}

#[test]
fn gray_alpha_decodes_to_one_channel() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gray_alpha.png");
    let image = ImageBuffer::<LumaA<u8>, Vec<u8>>::from_vec(2, 1, vec![10, 255, 200, 0])
        .expect("image");
    image.save(&path).expect("save");
    let buffer = read_buffer(&path).expect("read");
    assert_eq!(buffer.channels(), 1);
    assert_eq!(buffer.to_raw(), vec![10, 200]);
}

#[test]
fn jpeg_flattens_alpha() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("photo.jpg");
    let buffer = PixelBuffer::filled(8, 8, 4, 128).expect("buffer");
    write_buffer(&path, &buffer).expect("write jpeg");
    let restored = read_buffer(&path).expect("read jpeg");
    assert_eq!(restored.channels(), 3);
    assert_eq!((restored.width(), restored.height()), (8, 8));
}

#[test]
fn rgb_decode_maps_to_three_channels() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("color.png");
    let mut image = ImageBuffer::<Rgb<u8>, Vec<u8>>::new(2, 1);
    image.put_pixel(0, 0, Rgb([255, 0, 0]));
    image.put_pixel(1, 0, Rgb([0, 255, 0]));
    image.save(&path).expect("save png");
    let buffer = read_buffer(&path).expect("read png");
    assert_eq!(buffer.channels(), 3);
    assert_eq!(buffer.pixel(1, 0).expect("pixel").to_vec(), vec![0, 255, 0]);
}

#[test]
fn vff_is_recognised_but_not_decoded_by_default() {
    let codec = DefaultImageCodec;
    assert!(!codec.supports(ImageFormat::Vff));
    assert!(matches!(
        codec.decode(&[], ImageFormat::Vff),
        Err(IoError::UnsupportedFormat(_))
    ));
}
