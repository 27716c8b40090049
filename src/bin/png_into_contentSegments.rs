#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	pompom_sprite_project::{Image, DIMENSIONS, END, HEIGHT, POINT, START, WIDTH, X, Y},
	std::path::Path,
};

/// Projection-segmentation report: where the sprites sit in a sheet whose
/// regions are separated by transparency, with no fixed-grid assumption.
fn main() {
	#[derive(Parser)]
	struct Args {
		path: String,

		/// a row/column "has content" when some pixel's alpha exceeds this
		#[clap(long, default_value_t = 10)]
		alphaThreshold: u8,

		/// content runs shorter than this are discarded as noise
		#[clap(long, default_value_t = 10)]
		minRunLength: usize,
	}
	let Args { path, alphaThreshold, minRunLength } = Args::parse();
	if !Path::new(&path).exists() {
		println!("File not found");
		return;
	}
	let image = Image::fromPNGFile(&path);
	println!("Image Size: ({}, {})", image.width, image.height);
	match image.boundingRectangle(image.wholeRectangle()) {
		Some([point, dimensions]) => println!(
			"Global BBox: ({}, {}, {}, {})",
			point[X],
			point[Y],
			point[X] + dimensions[WIDTH],
			point[Y] + dimensions[HEIGHT]
		),
		None => println!("Global BBox: none"),
	}
	let rowBands = image.contentRowSegments(image.wholeRectangle(), alphaThreshold, minRunLength);
	println!("Detected row bands: {rowBands:?}");
	let (mut numSprites, mut totalWidth) = (0, 0);
	for ys in &rowBands {
		let band = [[0, ys[START]], [image.width, ys[END] - ys[START]]];
		let columns = image.contentColumnSegments(band, alphaThreshold, minRunLength);
		println!("Row band {ys:?}: column segments {columns:?}");
		for xs in &columns {
			let rectangle = [[xs[START], ys[START]], [xs[END] - xs[START], ys[END] - ys[START]]];
			println!("  sprite at {:?} size {:?}", rectangle[POINT], rectangle[DIMENSIONS]);
			numSprites += 1;
			totalWidth += xs[END] - xs[START];
		}
	}
	println!("Number of sprites: {numSprites}");
	if numSprites > 0 {
		#[allow(clippy::cast_precision_loss)]
		let averageWidth = totalWidth as f64 / f64::from(numSprites);
		println!("Average sprite width: {averageWidth}");
	}
}
