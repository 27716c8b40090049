#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	core::str::FromStr,
	pompom_sprite_project::{DimensionPair, Image, HEIGHT, RGBA, WIDTH},
};

/// Generates a solid-color swatch, the placeholder asset used while a real
/// sprite is still being authored.
fn main() {
	#[derive(Parser)]
	struct Args {
		outPath: String,

		#[clap(long, default_value = "160x40")]
		dimensions: DimensionPair,

		/// "red" or RRGGBB / RRGGBBAA hex
		#[clap(long, default_value = "red")]
		color: Color,
	}
	#[derive(Clone, Copy)]
	struct Color(RGBA);
	impl FromStr for Color {
		type Err = String;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			if s.eq_ignore_ascii_case("red") {
				return Ok(Self([255, 0, 0, 255]));
			}
			let hex = s.trim_start_matches('#');
			if hex.len() != 6 && hex.len() != 8 {
				return Err(format!("{s:?}: expected \"red\", RRGGBB or RRGGBBAA"));
			}
			let mut rgba = [u8::MAX; 4];
			for (i, channel) in hex.as_bytes().chunks_exact(2).enumerate() {
				rgba[i] = u8::from_str_radix(core::str::from_utf8(channel).unwrap(), 16)
					.map_err(|err| format!("{s:?}: {err}"))?;
			}
			Ok(Self(rgba))
		}
	}
	let Args { outPath, dimensions: DimensionPair(dimensions), color: Color(color) } = Args::parse();
	let mut image = Image::fromWidthHeight(dimensions[WIDTH], dimensions[HEIGHT]);
	for y in 0..image.height {
		for x in 0..image.width {
			image.putPixel([x, y], color);
		}
	}
	image.intoPNGFile(&outPath);
	println!("Saved {}x{} swatch to {outPath}", dimensions[WIDTH], dimensions[HEIGHT]);
}
