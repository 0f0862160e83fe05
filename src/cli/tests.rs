use std::fs;

use clap::Parser;
use tempfile::tempdir;

use super::{Cli, execute};
use crate::formats::{read_buffer, write_buffer};
use crate::model::PixelBuffer;

fn run(args: &[&str]) -> serde_json::Value {
    let cli = Cli::try_parse_from(std::iter::once("inspect").chain(args.iter().copied()))
        .expect("arguments");
    execute(cli).expect("command")
}

#[test]
fn histogram_of_clamped_region_counts_its_pixels() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("gray.png");
    write_buffer(&input, &PixelBuffer::filled(10, 8, 1, 42).expect("buffer")).expect("write");
    let input = input.to_str().expect("utf8 path");

    let output = run(&["histogram", input, "--region=-3,5,6,10"]);
    assert_eq!(output["kind"], "histogram");
    let counts = &output["result"]["channels"][0]["counts"];
    assert_eq!(counts[42], 9);

    let output = run(&["histogram", input, "--cumulative"]);
    assert_eq!(output["result"]["channels"][0]["counts"][255], 80);
}

#[test]
fn composite_flag_adds_a_channel() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("rgb.png");
    write_buffer(&input, &PixelBuffer::filled(2, 2, 3, 200).expect("buffer")).expect("write");
    let output = run(&[
        "histogram",
        input.to_str().expect("utf8 path"),
        "--composite",
        "luminance",
    ]);
    let channels = output["result"]["channels"].as_array().expect("channels");
    assert_eq!(channels.len(), 4);
    assert_eq!(channels[3]["channel"], "Luminance");
}

#[test]
fn mask_and_crop_write_derived_images() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("photo.png");
    let mask = dir.path().join("mask.png");
    let masked = dir.path().join("masked.png");
    let cropped = dir.path().join("cropped.png");
    write_buffer(&input, &PixelBuffer::filled(4, 4, 3, 100).expect("buffer")).expect("write");
    let mask_buffer = PixelBuffer::from_fn(4, 4, 1, |x, _, _| if x < 2 { 0 } else { 255 })
        .expect("mask");
    write_buffer(&mask, &mask_buffer).expect("write");

    let output = run(&[
        "mask",
        input.to_str().expect("utf8"),
        mask.to_str().expect("utf8"),
        masked.to_str().expect("utf8"),
        "--kind",
        "boolean",
    ]);
    assert_eq!(output["name"], "photo.png - masked");
    let written = read_buffer(&masked).expect("masked");
    assert_eq!(written.sample(0, 0, 0), Some(0));
    assert_eq!(written.sample(3, 0, 0), Some(100));

    let output = run(&[
        "crop",
        input.to_str().expect("utf8"),
        cropped.to_str().expect("utf8"),
        "--region",
        "1,1,2,3",
    ]);
    assert_eq!(output["width"], 2);
    assert_eq!(output["height"], 3);
    assert_eq!(read_buffer(&cropped).expect("cropped").height(), 3);
}

#[test]
fn layout_uses_configured_canvas() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("shell.yaml");
    fs::write(&config, "canvas:\n  width: 300\n  height: 200\n").expect("write");
    let output = run(&[
        "--config",
        config.to_str().expect("utf8"),
        "layout",
        "--count",
        "2",
    ]);
    let placements = output.as_array().expect("placements");
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[1]["rect"]["x"], 150);
    assert_eq!(placements[1]["rect"]["height"], 200);
}

#[test]
fn invalid_arguments_are_rejected_by_the_parser() {
    assert!(Cli::try_parse_from(["inspect", "crop", "a.png", "b.png", "--region", "1,2"]).is_err());
    assert!(Cli::try_parse_from(["inspect", "profile", "a.png"]).is_err());
}

#[test]
fn missing_input_reports_an_error() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("missing.png");
    let cli = Cli::try_parse_from(["inspect", "info", missing.to_str().expect("utf8")])
        .expect("arguments");
    assert!(execute(cli).is_err());
}
