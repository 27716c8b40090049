#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	pompom_sprite_project::Image,
};

/// Background removal: samples the reference color at each frame's top-left
/// pixel and makes everything within the per-channel tolerance fully
/// transparent. Anti-aliased edge pixels just outside the tolerance stay,
/// and so do isolated noise pixels inside the background.
fn main() {
	#[derive(Parser)]
	struct Args {
		inputPath: String,
		outputPath: String,

		/// per-channel strict upper bound on |pixel - reference|
		#[clap(long, default_value_t = 30)]
		tolerance: u8,

		/// treat the sheet as vertical frames this wide, each with its own
		/// background sample; default is one sample at (0,0) for the whole image
		#[clap(long)]
		frameWidth: Option<usize>,
	}
	let Args { inputPath, outputPath, tolerance, frameWidth } = Args::parse();
	let mut image = Image::fromPNGFile(&inputPath);
	let frameWidth = frameWidth.unwrap_or(image.width);
	let height = image.height;
	for frameIdx in 0..image.width / frameWidth {
		let offsetX = frameIdx * frameWidth;
		let bgColor = image.getPixel([offsetX, 0]);
		println!("Frame {frameIdx} bg detected: {bgColor:?}");
		image.removeBackground([[offsetX, 0], [frameWidth, height]], bgColor, tolerance);
	}
	image.intoPNGFile(&outputPath);
	println!("Saved transparent image to {outputPath}");
}
