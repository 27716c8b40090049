#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	pompom_sprite_project::{stdoutRaw, DimensionPair, Image, Vec2Ext, HEIGHT, WIDTH, X, Y},
	std::io::BufWriter,
};

/// Rearranges the cells of a grid sheet into a 1xN horizontal strip, the
/// layout the game's renderer wants for a single animation. With `--row` only
/// that grid row contributes; otherwise cells come in reading order. Without
/// an output path the PNG goes to stdout for piping.
fn main() {
	#[derive(Parser)]
	struct Args {
		srcPath: String,
		outPath: Option<String>,

		/// source cell dimensions, e.g. --cell 320x320
		#[clap(long)]
		cell: DimensionPair,

		/// take only this grid row (top row is 0)
		#[clap(long)]
		row: Option<usize>,

		/// nearest-resize every cell to these dimensions, e.g. --resize 160x160
		#[clap(long)]
		resize: Option<DimensionPair>,

		/// drop cells with no visible content
		#[clap(long)]
		skipEmpty: bool,
	}
	let Args { srcPath, outPath, cell: DimensionPair(cell), row, resize, skipEmpty } = Args::parse();
	let image = Image::fromPNGFile(&srcPath);
	eprintln!("Source size: ({}, {})", image.width, image.height);
	let [columns, rows] = [image.width / cell[WIDTH], image.height / cell[HEIGHT]];
	let gridRows: Vec<usize> = match row {
		Some(row) => {
			assert!(row < rows, "--row {row} out of range, sheet has {rows} rows");
			vec![row]
		}
		None => (0..rows).collect(),
	};
	let frameDimensions = resize.map_or(cell, |DimensionPair(pair)| pair);
	let mut frames = Vec::with_capacity(gridRows.len() * columns);
	for &row in &gridRows {
		for column in 0..columns {
			let point = cell.mul([column, row]);
			eprintln!("Cropping {},{} -> {},{}", point[X], point[Y], point[X] + cell[WIDTH], point[Y] + cell[HEIGHT]);
			let mut frame = image.crop([point, cell]);
			if skipEmpty && frame.boundingRectangle(frame.wholeRectangle()).is_none() {
				continue;
			}
			if frameDimensions != cell {
				frame = frame.resizedNearest(frameDimensions);
			}
			frames.push(frame);
		}
	}
	if frames.is_empty() {
		eprintln!("No frames selected");
		return;
	}
	let mut strip = Image::fromWidthHeight(frameDimensions[WIDTH] * frames.len(), frameDimensions[HEIGHT]);
	for (i, frame) in frames.iter().enumerate() {
		strip.blitPixelsRectangle([i * frameDimensions[WIDTH], 0], frameDimensions, frame, [0, 0]);
	}
	match outPath {
		Some(outPath) => {
			strip.intoPNGFile(&outPath);
			eprintln!("Saved strip to {outPath} (Size: ({}, {}))", strip.width, strip.height);
		}
		None => strip.intoPNG(BufWriter::new(stdoutRaw())),
	}
}
