// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line host for the bifurcation renderer.  Stands in for an
//! interactive environment: supplies the surface dimensions, drives
//! the frame loop to completion, and writes the finished surface out
//! as a PNG.

extern crate bifurcation;
extern crate clap;
extern crate failure;
extern crate image;
extern crate num;
extern crate rand;

use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use num::clamp;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use bifurcation::{logistic, Animation, Restart, Status, Theme};

fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const THEME: &str = "theme";
const SWEEPS: &str = "sweeps";
const EXPORT: &str = "export-points";

fn args<'a>() -> ArgMatches<'a> {
    App::new("bifur")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Incremental bifurcation diagram renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1600x1200")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of the raster surface"),
        )
        .arg(
            Arg::with_name(THEME)
                .required(false)
                .long(THEME)
                .short("t")
                .takes_value(true)
                .default_value("dark")
                .validator(|s| Theme::from_str(&s).map(|_| ()))
                .help("Host color scheme, dark or light"),
        )
        .arg(
            Arg::with_name(SWEEPS)
                .required(false)
                .long(SWEEPS)
                .short("n")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1000,
                        "Could not parse sweep count",
                        "Sweep count must be between 1 and 1000",
                    )
                })
                .help("Number of full parameter sweeps to run"),
        )
        .arg(
            Arg::with_name(EXPORT)
                .required(false)
                .long(EXPORT)
                .short("e")
                .takes_value(true)
                .help("Write the state -> pixel trace to this file"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), failure::Error> {
    let output = File::create(Path::new(outfile))?;
    PNGEncoder::new(output).encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGBA(8))?;
    Ok(())
}

/// Composite the translucent accumulation surface over the theme
/// background so the written file is viewable on its own.
fn flatten(pixels: &[u8], background: [u8; 3]) -> Vec<u8> {
    let mut flat = Vec::with_capacity(pixels.len());
    for px in pixels.chunks(4) {
        let alpha = f64::from(px[3]) / 255.0;
        for channel in 0..3 {
            let blended = f64::from(px[channel]) * alpha
                + f64::from(background[channel]) * (1.0 - alpha);
            flat.push(clamp(blended, 0.0, 255.0).round() as u8);
        }
        flat.push(255);
    }
    flat
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let bounds: (usize, usize) = parse_pair(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing surface dimensions");
    let theme =
        Theme::from_str(matches.value_of(THEME).unwrap()).map_err(failure::err_msg)?;
    let sweeps = usize::from_str(matches.value_of(SWEEPS).unwrap())?;
    let restart = if sweeps > 1 {
        Restart::Fresh
    } else {
        Restart::Halt
    };

    let mut animation = Animation::new(
        logistic,
        bounds.0,
        bounds.1,
        theme,
        restart,
        rand::thread_rng(),
    );
    if matches.is_present(EXPORT) {
        animation.enable_trace();
    }

    // The frame clock of this host is as plain as they come: call the
    // animation until the requested number of sweeps have completed.
    let mut completed = 0;
    while completed < sweeps {
        if let Status::Done = animation.frame() {
            completed += 1;
        }
    }

    let flat = flatten(animation.sink().pixels(), theme.background());
    write_image(matches.value_of(OUTPUT).unwrap(), &flat, bounds)?;

    if let Some(path) = matches.value_of(EXPORT) {
        if let Some(blob) = animation.sink().export_trace() {
            File::create(Path::new(path))?.write_all(blob.as_bytes())?;
        }
    }
    Ok(())
}

fn main() {
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
