#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	pompom_sprite_project::{DimensionPair, Image, Vec2Ext, HEIGHT, WIDTH},
	std::{fs, path::Path},
};

/// Slices a sheet into fixed-size cells and writes one PNG per cell.
/// Cells in the remainder strip of a non-dividing grid are ignored, like the
/// originals' integer division did.
fn main() {
	#[derive(Parser)]
	struct Args {
		srcPath: String,
		outDir: String,

		/// cell dimensions, e.g. --cell 160x160 (the asset family used 40, 48 and 160;
		/// pick the one matching the source sheet)
		#[clap(long)]
		cell: DimensionPair,

		/// don't write cells with no visible content
		#[clap(long)]
		skipEmpty: bool,
	}
	let Args { srcPath, outDir, cell: DimensionPair(cell), skipEmpty } = Args::parse();
	let image = Image::fromPNGFile(&srcPath);
	let [columns, rows] = [image.width / cell[WIDTH], image.height / cell[HEIGHT]];
	println!(
		"Slicing {}x{} image into {rows} rows and {columns} columns ({}x{} px).",
		image.width, image.height, cell[WIDTH], cell[HEIGHT]
	);
	fs::create_dir_all(&outDir).unwrap_or_else(|err| panic!("{outDir:?}: {err}"));
	let stem = Path::new(&srcPath).file_stem().and_then(|stem| stem.to_str()).unwrap_or("frame");
	let mut count = 0;
	for row in 0..rows {
		for column in 0..columns {
			let crop = image.crop([cell.mul([column, row]), cell]);
			if skipEmpty && crop.boundingRectangle(crop.wholeRectangle()).is_none() {
				continue;
			}
			let filename = format!("{stem}_r{row}_c{column}.png");
			crop.intoPNGFile(&format!("{outDir}/{filename}"));
			println!("Saved {filename}");
			count += 1;
		}
	}
	println!("Saved {count} frames of {}x{}", cell[WIDTH], cell[HEIGHT]);
}
