#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case, confusable_idents, mixed_script_confusables, uncommon_codepoints)]

use {
	array_macro::array,
	clap::Parser,
	core::f32::consts::TAU,
	glam::Vec2,
	pompom_sprite_project::Image,
};

const NUM_TEETH: usize = 8;
const MAIN_COLOR: [u8; 3] = [180, 180, 180];
// tooth trapezoid half-angles: wider at the base, narrower at the tip
const BASE_HALF_ANGLE: f32 = 0.3;
const TIP_HALF_ANGLE: f32 = 0.2;

/// Draws the settings-menu gear icon: 8 trapezoidal teeth around a circular
/// body with a transparent hub hole, lit from the top-left.
fn main() {
	#[derive(Parser)]
	struct Args {
		#[clap(default_value = "menu_settings.png")]
		outPath: String,

		#[clap(long, default_value_t = 64)]
		size: usize,
	}
	let Args { outPath, size } = Args::parse();
	#[allow(clippy::cast_precision_loss)]
	let (center, innerRadius, outerRadius) =
		((size / 2) as f32, (size / 4) as f32, size as f32 / 2.5);
	let toothAngles = array![i => i as f32 * TAU / NUM_TEETH as f32; NUM_TEETH];

	let mut image = Image::fromWidthHeight(size, size);
	for y in 0..size {
		for x in 0..size {
			#[allow(clippy::cast_precision_loss)]
			let Δ = Vec2::new(x as f32 - center, y as f32 - center);
			let radius = Δ.length();
			if radius < innerRadius * 0.5 {
				continue; // hub hole stays transparent
			}
			let onGear = radius <= innerRadius * 1.5 || {
				radius <= outerRadius && {
					let angle = Δ.y.atan2(Δ.x);
					let angularDistance = toothAngles
						.map(|toothAngle| {
							let δ = (angle - toothAngle).rem_euclid(TAU);
							δ.min(TAU - δ)
						})
						.into_iter()
						.fold(f32::INFINITY, f32::min);
					let t = ((radius - innerRadius) / (outerRadius - innerRadius)).clamp(0., 1.);
					angularDistance <= BASE_HALF_ANGLE + (TIP_HALF_ANGLE - BASE_HALF_ANGLE) * t
				}
			};
			if onGear {
				let [r, g, b] = MAIN_COLOR;
				image.putPixel([x, y], [r, g, b, u8::MAX]);
			}
		}
	}

	// top-left highlight, bottom-right shadow
	let center = size / 2;
	for y in 0..size {
		for x in 0..size {
			let [r, g, b, a] = image.getPixel([x, y]);
			if a == 0 {
				continue;
			}
			let shaded = if x < center && y < center {
				[r, g, b].map(|channel| channel.saturating_add(20))
			} else if x > center && y > center {
				[r, g, b].map(|channel| channel.saturating_sub(20))
			} else {
				continue;
			};
			image.putPixel([x, y], [shaded[0], shaded[1], shaded[2], a]);
		}
	}

	image.intoPNGFile(&outPath);
	println!("Saved {outPath}");
}
