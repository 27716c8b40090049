#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case, confusable_idents, mixed_script_confusables, uncommon_codepoints)]

use {
	core::{num::ParseIntError, str::FromStr},
	std::{
		fs::File,
		io::{self, BufWriter, Write},
		os,
	},
};

pub type Vec2 = [usize; 2];
pub const X: usize = 0;
pub const Y: usize = 1;
pub const WIDTH: usize = 0;
pub const HEIGHT: usize = 1;

/// `[point, dimensions]`
pub type Rectangle = [Vec2; 2];
pub const POINT: usize = 0;
pub const DIMENSIONS: usize = 1;

/// Half-open `[start, end)` extent along one axis.
pub type Segment = [usize; 2];
pub const START: usize = 0;
pub const END: usize = 1;

pub type RGBA = [u8; 4];
pub const RGBA_SIZE: usize = 4;
pub const FULLY_TRANSPARENT: RGBA = [0; 4];

pub fn default<T: Default>() -> T {
	T::default()
}

pub trait Vec2Ext {
	fn add(self, other: Self) -> Self;
	fn mul(self, other: Self) -> Self;
	fn div(self, scalar: usize) -> Self;
}
impl Vec2Ext for Vec2 {
	fn add(self, other: Self) -> Self {
		[self[X] + other[X], self[Y] + other[Y]]
	}
	fn mul(self, other: Self) -> Self {
		[self[X] * other[X], self[Y] * other[Y]]
	}
	fn div(self, scalar: usize) -> Self {
		self.map(|coord| coord / scalar)
	}
}

pub trait VecExt {
	fn withLen(len: usize) -> Self;
}
impl VecExt for Vec<u8> {
	fn withLen(len: usize) -> Self {
		let mut vec = Vec::with_capacity(len);
		vec.resize(len, 0);
		vec
	}
}

/// `"WxH"` command-line value, e.g. `--cell 40x40`.
#[derive(Clone, Copy, Debug)]
pub struct DimensionPair(pub Vec2);
impl FromStr for DimensionPair {
	type Err = ParseIntError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut pair = [default(); 2];
		for (i, s) in s.split('x').enumerate() {
			pair[i] = s.parse()?;
		}
		Ok(Self(pair))
	}
}

/// RGBA8 raster, row-major, `RGBA_SIZE` bytes per pixel.
pub struct Image {
	pub width: usize,
	pub height: usize,
	pub data: Vec<u8>,
}

impl Image {
	pub fn fromWidthHeight(width: usize, height: usize) -> Image {
		Image { width, height, data: Vec::withLen(width * height * RGBA_SIZE) }
	}

	pub fn fromPNG<R: io::Read>(png: &mut png::Reader<R>) -> Image {
		let mut buffer = Vec::withLen(png.output_buffer_size());
		let outputInfo = png.next_frame(&mut buffer).unwrap();
		buffer.truncate(outputInfo.buffer_size());
		let [width, height] = [outputInfo.width as usize, outputInfo.height as usize];
		let data = match outputInfo.color_type {
			png::ColorType::Rgba => buffer,
			png::ColorType::Rgb => {
				let mut data = Vec::with_capacity(width * height * RGBA_SIZE);
				for rgb in buffer.chunks_exact(3) {
					data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], u8::MAX]);
				}
				data
			}
			png::ColorType::GrayscaleAlpha => {
				let mut data = Vec::with_capacity(width * height * RGBA_SIZE);
				for ga in buffer.chunks_exact(2) {
					data.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
				}
				data
			}
			png::ColorType::Grayscale => {
				let mut data = Vec::with_capacity(width * height * RGBA_SIZE);
				for &g in &buffer {
					data.extend_from_slice(&[g, g, g, u8::MAX]);
				}
				data
			}
			colorType => panic!("unsupported color type after expansion: {colorType:?}"),
		};
		assert_eq!(data.len(), width * height * RGBA_SIZE);
		Image { width, height, data }
	}

	pub fn fromPNGFile(path: &str) -> Image {
		let file = File::open(path).unwrap_or_else(|err| panic!("{path:?}: {err}"));
		let mut decoder = png::Decoder::new(io::BufReader::new(file));
		decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
		Image::fromPNG(&mut decoder.read_info().unwrap_or_else(|err| panic!("{path:?}: {err}")))
	}

	pub fn intoPNG<W: Write>(&self, w: W) {
		let mut png = png::Encoder::new(w, self.width as _, self.height as _);
		png.set_color(png::ColorType::Rgba);
		png.set_depth(png::BitDepth::Eight);
		png.write_header().unwrap().write_image_data(&self.data).unwrap();
	}

	pub fn intoPNGFile(&self, path: &str) {
		self.intoPNG(BufWriter::new(File::create(path).unwrap_or_else(|err| panic!("{path:?}: {err}"))));
	}

	#[inline]
	fn byteIndex(&self, point: Vec2) -> usize {
		(point[Y] * self.width + point[X]) * RGBA_SIZE
	}

	pub fn getPixel(&self, point: Vec2) -> RGBA {
		let i = self.byteIndex(point);
		<RGBA>::try_from(&self.data[i..i + RGBA_SIZE]).unwrap()
	}

	pub fn putPixel(&mut self, point: Vec2, rgba: RGBA) {
		let i = self.byteIndex(point);
		self.data[i..i + RGBA_SIZE].copy_from_slice(&rgba);
	}

	pub fn crop(&self, [point, dimensions]: Rectangle) -> Image {
		let mut crop = Image::fromWidthHeight(dimensions[WIDTH], dimensions[HEIGHT]);
		crop.blitPixelsRectangle([0, 0], dimensions, self, point);
		crop
	}

	/// Copies a `dimensions`-sized pixel rectangle of `srcImage` at `srcPoint` to `destPoint`.
	pub fn blitPixelsRectangle(&mut self, destPoint: Vec2, dimensions: Vec2, srcImage: &Image, srcPoint: Vec2) {
		assert!(
			srcPoint[X] + dimensions[WIDTH] <= srcImage.width && srcPoint[Y] + dimensions[HEIGHT] <= srcImage.height
		);
		assert!(destPoint[X] + dimensions[WIDTH] <= self.width && destPoint[Y] + dimensions[HEIGHT] <= self.height);
		let rowLen = dimensions[WIDTH] * RGBA_SIZE;
		for Δy in 0..dimensions[HEIGHT] {
			let i = srcImage.byteIndex([srcPoint[X], srcPoint[Y] + Δy]);
			let j = self.byteIndex([destPoint[X], destPoint[Y] + Δy]);
			self.data[j..j + rowLen].copy_from_slice(&srcImage.data[i..i + rowLen]);
		}
	}

	/// Tight bounding rectangle of pixels with alpha > 0 inside the window, `None` if all transparent.
	pub fn boundingRectangle(&self, [point, dimensions]: Rectangle) -> Option<Rectangle> {
		let (mut min, mut max) = ([usize::MAX; 2], [0_usize; 2]);
		for y in point[Y]..point[Y] + dimensions[HEIGHT] {
			for x in point[X]..point[X] + dimensions[WIDTH] {
				if self.data[self.byteIndex([x, y]) + 3] > 0 {
					for (axis, coord) in [(X, x), (Y, y)] {
						min[axis] = min[axis].min(coord);
						max[axis] = max[axis].max(coord);
					}
				}
			}
		}
		(min[X] != usize::MAX).then(|| [min, [max[X] - min[X] + 1, max[Y] - min[Y] + 1]])
	}

	/// Nearest-neighbor resample; the only scaling pixel art tolerates.
	pub fn resizedNearest(&self, dimensions: Vec2) -> Image {
		let mut resized = Image::fromWidthHeight(dimensions[WIDTH], dimensions[HEIGHT]);
		for y in 0..dimensions[HEIGHT] {
			let srcY = y * self.height / dimensions[HEIGHT];
			for x in 0..dimensions[WIDTH] {
				let srcX = x * self.width / dimensions[WIDTH];
				resized.putPixel([x, y], self.getPixel([srcX, srcY]));
			}
		}
		resized
	}

	/// Replaces every pixel in the window whose R, G, B channels each differ
	/// from `bgColor`'s by strictly less than `tolerance` with `FULLY_TRANSPARENT`.
	/// Alpha is not compared. Per-pixel independent; isolated noise survives.
	pub fn removeBackground(&mut self, [point, dimensions]: Rectangle, bgColor: RGBA, tolerance: u8) {
		for y in point[Y]..point[Y] + dimensions[HEIGHT] {
			for x in point[X]..point[X] + dimensions[WIDTH] {
				let rgba = self.getPixel([x, y]);
				if (0..3).all(|c| (i16::from(rgba[c]) - i16::from(bgColor[c])).unsigned_abs() < u16::from(tolerance))
				{
					self.putPixel([x, y], FULLY_TRANSPARENT);
				}
			}
		}
	}

	pub fn wholeRectangle(&self) -> Rectangle {
		[[0, 0], [self.width, self.height]]
	}

	fn columnHasContent(&self, x: usize, ys: Segment, alphaThreshold: u8) -> bool {
		(ys[START]..ys[END]).any(|y| self.data[self.byteIndex([x, y]) + 3] > alphaThreshold)
	}

	fn rowHasContent(&self, y: usize, xs: Segment, alphaThreshold: u8) -> bool {
		(xs[START]..xs[END]).any(|x| self.data[self.byteIndex([x, y]) + 3] > alphaThreshold)
	}

	/// Column extents of content inside the window: x-segments where some pixel's
	/// alpha exceeds `alphaThreshold`, runs shorter than `minRunLength` discarded.
	pub fn contentColumnSegments(
		&self, [point, dimensions]: Rectangle, alphaThreshold: u8, minRunLength: usize,
	) -> Vec<Segment> {
		let ys = [point[Y], point[Y] + dimensions[HEIGHT]];
		let flags: Vec<bool> = (point[X]..point[X] + dimensions[WIDTH])
			.map(|x| self.columnHasContent(x, ys, alphaThreshold))
			.collect();
		offsetSegments(contentRuns(&flags, minRunLength), point[X])
	}

	/// Same scan along the other axis: y-segments of content rows.
	pub fn contentRowSegments(
		&self, [point, dimensions]: Rectangle, alphaThreshold: u8, minRunLength: usize,
	) -> Vec<Segment> {
		let xs = [point[X], point[X] + dimensions[WIDTH]];
		let flags: Vec<bool> = (point[Y]..point[Y] + dimensions[HEIGHT])
			.map(|y| self.rowHasContent(y, xs, alphaThreshold))
			.collect();
		offsetSegments(contentRuns(&flags, minRunLength), point[Y])
	}

	/// Rows first, then columns within each row band: the 2D grid of sprite
	/// boxes, top-to-bottom then left-to-right, with no fixed-cell assumption.
	pub fn contentRectangles(&self, alphaThreshold: u8, minRunLength: usize) -> Vec<Vec<Rectangle>> {
		self
			.contentRowSegments(self.wholeRectangle(), alphaThreshold, minRunLength)
			.into_iter()
			.map(|ys| {
				let band = [[0, ys[START]], [self.width, ys[END] - ys[START]]];
				self
					.contentColumnSegments(band, alphaThreshold, minRunLength)
					.into_iter()
					.map(|xs| [[xs[START], ys[START]], [xs[END] - xs[START], ys[END] - ys[START]]])
					.collect()
			})
			.collect()
	}
}

/// Contiguous `true` runs of length >= `minRunLength`; a run still open at the
/// end of the slice is closed at the slice boundary.
pub fn contentRuns(flags: &[bool], minRunLength: usize) -> Vec<Segment> {
	let (mut segments, mut start) = (Vec::new(), None);
	for (i, &flag) in flags.iter().enumerate() {
		match (flag, start) {
			(true, None) => start = Some(i),
			(false, Some(runStart)) => {
				if i - runStart >= minRunLength {
					segments.push([runStart, i]);
				}
				start = None;
			}
			_ => {}
		}
	}
	if let Some(runStart) = start {
		if flags.len() - runStart >= minRunLength {
			segments.push([runStart, flags.len()]);
		}
	}
	segments
}

fn offsetSegments(segments: Vec<Segment>, offset: usize) -> Vec<Segment> {
	segments.into_iter().map(|segment| segment.map(|i| i + offset)).collect()
}

pub fn toml_toStringPretty<T: serde::Serialize>(value: &T) -> Result<String, toml::ser::Error> {
	toml::to_string_pretty(value)
}

#[cfg(unix)]
pub fn stdoutRaw() -> File {
	use os::unix::io::FromRawFd;
	unsafe { File::from_raw_fd(1) }
}

#[cfg(windows)]
pub fn stdoutRaw() -> File {
	use os::windows::io::{AsRawHandle, FromRawHandle};
	unsafe { File::from_raw_handle(io::stdout().as_raw_handle()) }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn solid(width: usize, height: usize, rgba: RGBA) -> Image {
		let mut image = Image::fromWidthHeight(width, height);
		let whole = image.wholeRectangle();
		fillRectangle(&mut image, whole, rgba);
		image
	}

	fn fillRectangle(image: &mut Image, [point, dimensions]: Rectangle, rgba: RGBA) {
		for y in point[Y]..point[Y] + dimensions[HEIGHT] {
			for x in point[X]..point[X] + dimensions[WIDTH] {
				image.putPixel([x, y], rgba);
			}
		}
	}

	#[test]
	fn removeBackground_solidColorBecomesFullyTransparent() {
		let bg = [200, 180, 150, 255];
		let mut image = solid(8, 6, bg);
		image.removeBackground(image.wholeRectangle(), bg, 30);
		assert!(image.data.iter().all(|&byte| byte == 0));
	}

	#[test]
	fn removeBackground_leavesColorsBeyondToleranceUntouched() {
		let bg = [100, 100, 100, 255];
		let mut image = Image::fromWidthHeight(8, 8);
		for y in 0..8 {
			for x in 0..8 {
				// checkerboard of colors whose every channel differs from bg by > 30
				image.putPixel([x, y], if (x + y) % 2 == 0 { [10, 10, 10, 255] } else { [200, 200, 200, 255] });
			}
		}
		let before = image.data.clone();
		image.removeBackground(image.wholeRectangle(), bg, 30);
		assert_eq!(image.data, before);
	}

	#[test]
	fn removeBackground_toleranceIsStrict() {
		let bg = [100, 100, 100, 255];
		let mut image = solid(1, 2, [130, 100, 100, 255]); // one channel differs by exactly 30
		image.putPixel([0, 1], [129, 100, 100, 255]);
		image.removeBackground(image.wholeRectangle(), bg, 30);
		assert_eq!(image.getPixel([0, 0]), [130, 100, 100, 255]);
		assert_eq!(image.getPixel([0, 1]), FULLY_TRANSPARENT);
	}

	#[test]
	fn removeBackground_idempotentOnFullyTransparent() {
		let mut image = Image::fromWidthHeight(5, 5);
		image.removeBackground(image.wholeRectangle(), [255, 0, 0, 255], 30);
		assert!(image.data.iter().all(|&byte| byte == 0));
		image.removeBackground(image.wholeRectangle(), [0, 0, 0, 0], 30);
		assert!(image.data.iter().all(|&byte| byte == 0));
	}

	#[test]
	fn contentRuns_filtersShortRunsAndClosesAtBoundary() {
		let mut flags = [false; 40];
		flags[2..15].fill(true); // len 13, kept
		flags[20..25].fill(true); // len 5, dropped
		flags[29..40].fill(true); // len 11, open at the end, closed at 40
		assert_eq!(contentRuns(&flags, 10), vec![[2, 15], [29, 40]]);
	}

	#[test]
	fn contentColumnSegments_matchRectangleExtentsInOrder() {
		let mut image = Image::fromWidthHeight(100, 20);
		let opaque = [255, 255, 255, 255];
		fillRectangle(&mut image, [[5, 2], [15, 16]], opaque);
		fillRectangle(&mut image, [[30, 0], [15, 20]], opaque);
		fillRectangle(&mut image, [[60, 5], [2, 10]], opaque); // narrower than minRunLength
		fillRectangle(&mut image, [[80, 3], [20, 12]], opaque); // touches the last column
		assert_eq!(
			image.contentColumnSegments(image.wholeRectangle(), 10, 10),
			vec![[5, 20], [30, 45], [80, 100]]
		);
	}

	#[test]
	fn contentRowSegments_closeAtBottomEdge() {
		let mut image = Image::fromWidthHeight(30, 50);
		fillRectangle(&mut image, [[0, 38], [30, 12]], [9, 9, 9, 255]);
		assert_eq!(image.contentRowSegments(image.wholeRectangle(), 10, 10), vec![[38, 50]]);
	}

	#[test]
	fn contentSegments_ignorePixelsAtOrBelowAlphaThreshold() {
		let mut image = solid(32, 16, [50, 50, 50, 10]); // alpha == threshold: not content
		assert!(image.contentColumnSegments(image.wholeRectangle(), 10, 1).is_empty());
		fillRectangle(&mut image, [[4, 0], [12, 16]], [50, 50, 50, 11]);
		assert_eq!(image.contentColumnSegments(image.wholeRectangle(), 10, 10), vec![[4, 16]]);
	}

	#[test]
	fn contentRectangles_yieldRowMajorGrid() {
		let mut image = Image::fromWidthHeight(64, 64);
		let opaque = [1, 2, 3, 255];
		for &point in &[[4, 4], [34, 4], [4, 36], [34, 36]] {
			fillRectangle(&mut image, [point, [20, 20]], opaque);
		}
		assert_eq!(
			image.contentRectangles(10, 10),
			vec![
				vec![[[4, 4], [20, 20]], [[34, 4], [20, 20]]],
				vec![[[4, 36], [20, 20]], [[34, 36], [20, 20]]],
			]
		);
	}

	#[test]
	fn boundingRectangle_tightAndWindowed() {
		let mut image = Image::fromWidthHeight(40, 40);
		fillRectangle(&mut image, [[12, 7], [5, 9]], [0, 0, 0, 1]);
		assert_eq!(image.boundingRectangle(image.wholeRectangle()), Some([[12, 7], [5, 9]]));
		assert_eq!(image.boundingRectangle([[0, 0], [10, 40]]), None);
		assert_eq!(image.boundingRectangle([[10, 0], [10, 10]]), Some([[12, 7], [5, 3]]));
	}

	#[test]
	fn cropAndBlit_roundTripReproducesSource() {
		let mut source = Image::fromWidthHeight(48, 32);
		for y in 0..32 {
			for x in 0..48 {
				source.putPixel([x, y], [x as u8, y as u8, (x * y) as u8, 255 - x as u8]);
			}
		}
		let cell = [16, 8];
		let mut reassembled = Image::fromWidthHeight(source.width, source.height);
		for row in 0..source.height / cell[HEIGHT] {
			for column in 0..source.width / cell[WIDTH] {
				let point = [column * cell[WIDTH], row * cell[HEIGHT]];
				let crop = source.crop([point, cell]);
				reassembled.blitPixelsRectangle(point, cell, &crop, [0, 0]);
			}
		}
		assert_eq!(reassembled.data, source.data);
	}

	#[test]
	fn resizedNearest_integerDownscalePicksBlockTexels() {
		let mut source = Image::fromWidthHeight(4, 4);
		for y in 0..4 {
			for x in 0..4 {
				let shade = (x / 2 + 2 * (y / 2)) as u8 * 60;
				source.putPixel([x, y], [shade, shade, shade, 255]);
			}
		}
		let resized = source.resizedNearest([2, 2]);
		for y in 0..2 {
			for x in 0..2 {
				let shade = (x + 2 * y) as u8 * 60;
				assert_eq!(resized.getPixel([x, y]), [shade, shade, shade, 255]);
			}
		}
	}

	#[test]
	fn dimensionPair_parses() {
		let DimensionPair(pair) = "160x40".parse().unwrap();
		assert_eq!(pair, [160, 40]);
		assert!("40x".parse::<DimensionPair>().is_err());
	}
}
