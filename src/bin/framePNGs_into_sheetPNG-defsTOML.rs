#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	pompom_sprite_project::{toml_toStringPretty, DimensionPair, Image, Vec2Ext, HEIGHT, WIDTH, X, Y},
	serde::Serialize,
	std::{collections::HashMap, fs, io, path::Path},
};

/// Assembles per-frame PNGs named `{animation}_frame_{index}.png` into one
/// sheet, one row per animation, plus a TOML table of frame placements for
/// the renderer config.
fn main() {
	#[derive(Parser)]
	struct Args {
		assetDir: String,
		outPath: String,

		/// cell dimensions of the sheet grid
		#[clap(long, default_value = "48x48")]
		cell: DimensionPair,

		/// row order of the sheet, top to bottom
		#[clap(
			long,
			multiple_values = true,
			default_values = &["idle", "walk", "eat", "sleep", "happy", "sad", "sick", "evolve"]
		)]
		animations: Vec<String>,

		/// where to write the placement TOML; stdout when omitted
		#[clap(long)]
		defs: Option<String>,
	}
	let Args { assetDir, outPath, cell: DimensionPair(cell), animations, defs } = Args::parse();
	let outFilename = Path::new(&outPath).file_name().and_then(|name| name.to_str()).unwrap_or("");

	let mut frames = HashMap::<String, Vec<(usize, String)>>::new();
	for entry in fs::read_dir(&assetDir).unwrap_or_else(|err| panic!("{assetDir:?}: {err}")) {
		let filename = entry.unwrap().file_name();
		let Some(filename) = filename.to_str() else { continue };
		if !filename.ends_with(".png") || filename == outFilename {
			continue;
		}
		// expected format: animation_frame_X.png (e.g. idle_frame_0.png)
		let stem = &filename[..filename.len() - ".png".len()];
		let (animation, frameIndex) = {
			let mut parts = stem.split('_');
			(parts.next().unwrap_or(""), parts.last().and_then(|part| part.parse::<usize>().ok()))
		};
		let Some(frameIndex) = frameIndex else {
			println!("Skipping malformed filename: {filename}");
			continue;
		};
		frames.entry(animation.to_owned()).or_default().push((frameIndex, filename.to_owned()));
	}

	let maxFrames =
		animations.iter().filter_map(|animation| frames.get(animation)).map(Vec::len).max().unwrap_or(0);
	if maxFrames == 0 {
		println!("No frames found in {assetDir}");
		return;
	}
	let dimensions = cell.mul([maxFrames, animations.len()]);
	println!("Creating sprite sheet: {}x{}", dimensions[WIDTH], dimensions[HEIGHT]);
	let mut sheet = Image::fromWidthHeight(dimensions[WIDTH], dimensions[HEIGHT]);

	#[derive(Serialize)]
	struct FrameDef {
		animation: String,
		frameIndex: usize,
		x: usize,
		y: usize,
	}
	#[derive(Serialize)]
	struct SheetDefsTOML {
		cell: [usize; 2],
		#[serde(rename = "frame")]
		frames: Vec<FrameDef>,
	}
	let mut frameDefs = Vec::new();

	for (rowIndex, animation) in animations.iter().enumerate() {
		let Some(animationFrames) = frames.get_mut(animation) else { continue };
		animationFrames.sort_unstable_by_key(|&(frameIndex, _)| frameIndex);
		for (columnIndex, (frameIndex, filename)) in animationFrames.iter().enumerate() {
			let path = format!("{assetDir}/{filename}");
			let mut frame = match fs::File::open(&path).map_err(png::DecodingError::from).and_then(|file| {
				let mut decoder = png::Decoder::new(io::BufReader::new(file));
				decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
				decoder.read_info()
			}) {
				Ok(mut png) => Image::fromPNG(&mut png),
				Err(err) => {
					println!("Error processing {filename}: {err}");
					continue;
				}
			};
			if [frame.width, frame.height] != cell {
				frame = frame.resizedNearest(cell);
			}
			let point = cell.mul([columnIndex, rowIndex]);
			sheet.blitPixelsRectangle(point, cell, &frame, [0, 0]);
			println!("Placed {animation} frame {frameIndex} at {},{}", point[X], point[Y]);
			frameDefs.push(FrameDef {
				animation: animation.clone(),
				frameIndex: *frameIndex,
				x: point[X],
				y: point[Y],
			});
		}
	}

	sheet.intoPNGFile(&outPath);
	println!("Saved sprite sheet to {outPath}");
	let tomlString =
		toml_toStringPretty(&SheetDefsTOML { cell, frames: frameDefs }).unwrap_or_else(|err| panic!("{err}"));
	match defs {
		Some(defsPath) => {
			fs::write(&defsPath, tomlString).unwrap_or_else(|err| panic!("{defsPath:?}: {err}"));
			println!("Saved sheet defs to {defsPath}");
		}
		None => print!("{tomlString}"),
	}
}
