#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	const_format::concatcp,
	pompom_sprite_project::{Image, RGBA},
	std::fs,
};

const ASSETS_DIR: &str = "apps/web/public/assets";
const DEFAULT_OUT_DIR: &str = concatcp!(ASSETS_DIR, "/ui");

/// stat-bar labels the UI renderer loads by filename
const STAT_LABELS: [(&str, &str); 5] = [
	("HUN", "label_hunger.png"),
	("HAP", "label_happy.png"),
	("ENE", "label_energy.png"),
	("HEA", "label_health.png"),
	("LOV", "label_love.png"),
];

const GLYPH_WIDTH: usize = 3;
const GLYPH_HEIGHT: usize = 5;
const GLYPH_ADVANCE: usize = 4;

/// 3x5 bitmap font, row-major bits; only the letters the stat labels need.
const GLYPHS: [(char, [u8; GLYPH_WIDTH * GLYPH_HEIGHT]); 13] = [
	('H', [1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1]),
	('U', [1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1]),
	('N', [1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1]),
	('A', [1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1]),
	('P', [1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0]),
	('Y', [1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 0, 1, 0]),
	('E', [1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1]),
	('R', [1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1]),
	('G', [1, 1, 1, 1, 0, 0, 1, 0, 1, 1, 0, 1, 1, 1, 1]),
	('L', [1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1]),
	('T', [1, 1, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0]),
	('O', [1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1]),
	('V', [1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 0, 1, 0]),
];

fn renderLabel(text: &str, color: RGBA, scale: usize) -> Image {
	let mut image = Image::fromWidthHeight(text.len() * GLYPH_ADVANCE + 2, GLYPH_HEIGHT + 2);
	let mut cursorX = 0;
	for char in text.chars() {
		if let Some(&(_, bits)) = GLYPHS.iter().find(|&&(glyph, _)| glyph == char.to_ascii_uppercase()) {
			for (i, &bit) in bits.iter().enumerate() {
				if bit != 0 {
					image.putPixel([cursorX + i % GLYPH_WIDTH, i / GLYPH_WIDTH], color);
				}
			}
		}
		cursorX += GLYPH_ADVANCE;
	}
	image.resizedNearest([image.width * scale, image.height * scale])
}

/// Renders the tiny pixel-font stat labels (or one custom label) the UI
/// draws next to its bars.
fn main() {
	#[derive(Parser)]
	struct Args {
		#[clap(default_value = DEFAULT_OUT_DIR)]
		outDir: String,

		/// RRGGBB hex ink color
		#[clap(long, default_value = "3A2F1F")]
		color: String,

		/// nearest-neighbor upscale factor for visibility
		#[clap(long, default_value_t = 2)]
		scale: usize,

		/// render this text instead of the five stat labels
		#[clap(long, requires = "out")]
		text: Option<String>,

		/// output filename for --text
		#[clap(long)]
		out: Option<String>,
	}
	let Args { outDir, color, scale, text, out } = Args::parse();
	let color = {
		let hex = color.trim_start_matches('#');
		assert_eq!(hex.len(), 6, "--color wants RRGGBB hex, got {hex:?}");
		let [_, r, g, b] =
			u32::from_str_radix(hex, 16).unwrap_or_else(|err| panic!("--color {hex:?}: {err}")).to_be_bytes();
		[r, g, b, u8::MAX]
	};
	fs::create_dir_all(&outDir).unwrap_or_else(|err| panic!("{outDir:?}: {err}"));
	let labels: Vec<(String, String)> = match (text, out) {
		(Some(text), Some(out)) => vec![(text, out)],
		_ => STAT_LABELS.iter().map(|&(text, filename)| (text.to_owned(), filename.to_owned())).collect(),
	};
	for (text, filename) in &labels {
		let path = format!("{outDir}/{filename}");
		renderLabel(text, color, scale).intoPNGFile(&path);
		println!("Generated {path}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renderLabel_dimensionsFollowTextAndScale() {
		let label = renderLabel("HUN", [58, 47, 31, 255], 2);
		assert_eq!([label.width, label.height], [(3 * GLYPH_ADVANCE + 2) * 2, (GLYPH_HEIGHT + 2) * 2]);
	}

	#[test]
	fn renderLabel_inksOnlyTheGlyphColor() {
		let ink = [58, 47, 31, 255];
		let label = renderLabel("e", ink, 1);
		let mut inked = 0;
		for y in 0..label.height {
			for x in 0..label.width {
				match label.getPixel([x, y]) {
					pixel if pixel == ink => inked += 1,
					[0, 0, 0, 0] => {}
					pixel => panic!("unexpected pixel {pixel:?}"),
				}
			}
		}
		// 'E' glyph has 11 set bits
		assert_eq!(inked, 11);
	}

	#[test]
	fn renderLabel_skipsUnknownCharsButAdvances() {
		let known = renderLabel("H", [9, 9, 9, 255], 1);
		let unknown = renderLabel("#", [9, 9, 9, 255], 1);
		assert_eq!([known.width, known.height], [unknown.width, unknown.height]);
		assert!(unknown.data.iter().all(|&byte| byte == 0));
		assert!(known.data.iter().any(|&byte| byte != 0));
	}
}
