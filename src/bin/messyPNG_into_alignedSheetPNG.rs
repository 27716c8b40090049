#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	pompom_sprite_project::{DimensionPair, Image, Vec2Ext, DIMENSIONS, HEIGHT, POINT, WIDTH, X, Y},
};

/// Rebuilds a grid-aligned sheet out of a messy one: optional background
/// removal, projection segmentation (rows, then columns within each row) to
/// find the sprites wherever they sit, tight bounding box per sprite, then an
/// aspect-preserving nearest resize centered into a fixed cell. Detection
/// order becomes sheet order, top-to-bottom then left-to-right.
fn main() {
	#[derive(Parser)]
	struct Args {
		inputPath: String,
		outputPath: String,

		/// output cell dimensions, e.g. --cell 40x40
		#[clap(long)]
		cell: DimensionPair,

		#[clap(long, default_value_t = 10)]
		alphaThreshold: u8,

		#[clap(long, default_value_t = 10)]
		minRunLength: usize,

		/// first remove the background sampled at the sheet's top-left pixel,
		/// with this per-channel tolerance
		#[clap(long)]
		bgTolerance: Option<u8>,
	}
	let Args { inputPath, outputPath, cell: DimensionPair(cell), alphaThreshold, minRunLength, bgTolerance } =
		Args::parse();
	let mut image = Image::fromPNGFile(&inputPath);
	println!("Source size: ({}, {})", image.width, image.height);

	if let Some(tolerance) = bgTolerance {
		// on an opaque sheet the whole image is one content region; sample its
		// corner so the later segmentation has transparency to work with
		let bgColor = image.getPixel([0, 0]);
		println!("bg_color at (0,0) is {bgColor:?}");
		image.removeBackground(image.wholeRectangle(), bgColor, tolerance);
	}

	let grid = image.contentRectangles(alphaThreshold, minRunLength);
	let [rows, maxColumns] = [grid.len(), grid.iter().map(Vec::len).max().unwrap_or(0)];
	if maxColumns == 0 {
		println!("No sprites detected");
		return;
	}
	println!("Detected {rows} row(s), up to {maxColumns} sprite(s) per row");
	let mut sheet = Image::fromWidthHeight(cell[WIDTH] * maxColumns, cell[HEIGHT] * rows);

	for (rowIndex, rowRectangles) in grid.iter().enumerate() {
		for (columnIndex, &region) in rowRectangles.iter().enumerate() {
			let Some(boundingRectangle) = image.boundingRectangle(region) else {
				println!("Sprite r{rowIndex} c{columnIndex}: empty");
				continue;
			};
			let content = image.crop(boundingRectangle);
			let contentDimensions = boundingRectangle[DIMENSIONS];
			#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
			let resizedDimensions = {
				let scale = (cell[WIDTH] as f64 / contentDimensions[WIDTH] as f64)
					.min(cell[HEIGHT] as f64 / contentDimensions[HEIGHT] as f64);
				contentDimensions.map(|dimension| (dimension as f64 * scale) as usize)
			};
			if resizedDimensions[WIDTH] == 0 || resizedDimensions[HEIGHT] == 0 {
				println!("Sprite r{rowIndex} c{columnIndex}: resized to 0");
				continue;
			}
			let resized = content.resizedNearest(resizedDimensions);
			let pastePoint = cell.mul([columnIndex, rowIndex]).add(
				[cell[WIDTH] - resizedDimensions[WIDTH], cell[HEIGHT] - resizedDimensions[HEIGHT]].div(2),
			);
			sheet.blitPixelsRectangle(pastePoint, resizedDimensions, &resized, [0, 0]);
			println!(
				"Sprite r{rowIndex} c{columnIndex}: content {}x{} at {:?} -> {}x{}, pasted at {},{}",
				contentDimensions[WIDTH],
				contentDimensions[HEIGHT],
				boundingRectangle[POINT],
				resizedDimensions[WIDTH],
				resizedDimensions[HEIGHT],
				pastePoint[X],
				pastePoint[Y]
			);
		}
	}

	sheet.intoPNGFile(&outputPath);
	println!("Saved aligned sheet to {outputPath} (Size: ({}, {}))", sheet.width, sheet.height);
}
