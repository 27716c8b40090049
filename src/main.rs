#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	pompom_sprite_project::{DimensionPair, Image, HEIGHT, RGBA, WIDTH, X, Y},
	std::{collections::HashSet, fs::File, io},
};

/// Prints dimensions, color type, content bounding box and palette size of
/// sprite PNGs. Unreadable files are reported and skipped; the report always
/// finishes.
fn main() {
	#[derive(Parser)]
	struct Args {
		#[clap(required = true)]
		paths: Vec<String>,

		/// pixel to sample, e.g. --sample 512x512
		#[clap(long)]
		sample: Option<DimensionPair>,

		/// expected dimensions; prints CORRECT/INCORRECT per file
		#[clap(long)]
		expect: Option<DimensionPair>,
	}
	let Args { paths, sample, expect } = Args::parse();
	for path in &paths {
		let path = path.as_str();
		let mut png = match File::open(path).map_err(png::DecodingError::from).and_then(|file| {
			let mut decoder = png::Decoder::new(io::BufReader::new(file));
			decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
			decoder.read_info()
		}) {
			Ok(png) => png,
			Err(err) => {
				println!("Error reading {path}: {err}");
				continue;
			}
		};
		println!("--- {path} ---");
		let (colorType, bitDepth) = {
			let info = png.info();
			(info.color_type, info.bit_depth)
		};
		let image = Image::fromPNG(&mut png);
		println!("Size: {}x{}", image.width, image.height);
		println!("Mode: {colorType:?} ({bitDepth:?} bits)");
		match image.boundingRectangle(image.wholeRectangle()) {
			Some([point, dimensions]) => println!(
				"Content BBox: ({}, {}, {}, {})",
				point[X],
				point[Y],
				point[X] + dimensions[WIDTH],
				point[Y] + dimensions[HEIGHT]
			),
			None => println!("Content BBox: none (fully transparent)"),
		}
		{
			let mut colors = HashSet::<RGBA>::new();
			'count: for y in 0..image.height {
				for x in 0..image.width {
					colors.insert(image.getPixel([x, y]));
					if colors.len() > 256 {
						break 'count;
					}
				}
			}
			if colors.len() > 256 {
				println!("Unique colors: >256");
			} else {
				println!("Unique colors (<=256): {}", colors.len());
			}
		}
		if let Some(DimensionPair(point)) = sample {
			if point[X] < image.width && point[Y] < image.height {
				println!("Pixel at {},{}: {:?}", point[X], point[Y], image.getPixel(point));
			} else {
				println!("Pixel at {},{}: out of range", point[X], point[Y]);
			}
		}
		if let Some(DimensionPair(expected)) = expect {
			if [image.width, image.height] == expected {
				println!("Dimensions CORRECT.");
			} else {
				println!("Dimensions INCORRECT (Expected {}x{}).", expected[WIDTH], expected[HEIGHT]);
			}
		}
	}
}
