#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	base64::{engine::general_purpose::STANDARD as BASE64, Engine as _},
	clap::Parser,
	serde_json::{json, Value},
	std::{fs, thread, time::Duration},
};

// W3C WebDriver key code points
const KEY_ENTER: char = '\u{E007}';
const KEY_ARROW_RIGHT: char = '\u{E014}';

/// Captures the two review screenshots of the running game UI: the home
/// scene, then the settings scene reached with 3x ArrowRight + Enter. Talks
/// the WebDriver wire protocol to a chromedriver/geckodriver instance, which
/// must be running, like the dev server must.
fn main() {
	#[derive(Parser)]
	struct Args {
		/// WebDriver endpoint (chromedriver's default port)
		#[clap(long, default_value = "http://localhost:9515")]
		webdriverURL: String,

		/// the dev server serving the game
		#[clap(long, default_value = "http://localhost:5173/")]
		pageURL: String,

		#[clap(long, default_value = "verification")]
		outDir: String,

		/// wait after load for assets to render
		#[clap(long, default_value_t = 2000)]
		settleMs: u64,

		/// wait between menu key presses
		#[clap(long, default_value_t = 500)]
		keyDelayMs: u64,

		/// wait for the scene change after Enter
		#[clap(long, default_value_t = 1000)]
		sceneDelayMs: u64,

		/// give up waiting for the canvas after this long
		#[clap(long, default_value_t = 10000)]
		canvasTimeoutMs: u64,
	}
	let Args { webdriverURL, pageURL, outDir, settleMs, keyDelayMs, sceneDelayMs, canvasTimeoutMs } =
		Args::parse();
	fs::create_dir_all(&outDir).unwrap_or_else(|err| panic!("{outDir:?}: {err}"));

	let session = &WebDriverSession::new(&webdriverURL);
	session.navigate(&pageURL);
	session.awaitElement("canvas#screen", canvasTimeoutMs);
	thread::sleep(Duration::from_millis(settleMs));
	session.screenshot(&format!("{outDir}/home.png"));
	println!("Home screenshot taken");

	// menu order: Care(0), Gifts(1), Album(2), Settings(3), Games(4); the UI
	// starts on Care, so Settings is three presses to the right
	for _ in 0..3 {
		session.pressKey(KEY_ARROW_RIGHT);
		thread::sleep(Duration::from_millis(keyDelayMs));
	}
	session.pressKey(KEY_ENTER);
	thread::sleep(Duration::from_millis(sceneDelayMs));
	session.screenshot(&format!("{outDir}/settings.png"));
	println!("Settings screenshot taken");
}

/// One browser session; `baseURL` is `{webdriver}/session/{id}`.
struct WebDriverSession {
	baseURL: String,
}

impl WebDriverSession {
	fn new(webdriverURL: &str) -> WebDriverSession {
		let response = ureq::post(&format!("{webdriverURL}/session"))
			.send_json(json!({
				"capabilities": {"alwaysMatch": {"goog:chromeOptions": {"args": ["--headless=new"]}}}
			}))
			.unwrap_or_else(|err| panic!("{webdriverURL}: {err}"))
			.into_json::<Value>()
			.unwrap();
		let id = response["value"]["sessionId"]
			.as_str()
			.unwrap_or_else(|| panic!("no sessionId in {response}"))
			.to_owned();
		WebDriverSession { baseURL: format!("{webdriverURL}/session/{id}") }
	}

	fn post(&self, command: &str, body: Value) -> Value {
		ureq::post(&format!("{}/{command}", self.baseURL))
			.send_json(body)
			.unwrap_or_else(|err| panic!("{command}: {err}"))
			.into_json()
			.unwrap()
	}

	fn navigate(&self, pageURL: &str) {
		self.post("url", json!({ "url": pageURL }));
	}

	fn awaitElement(&self, cssSelector: &str, timeoutMs: u64) {
		let mut waitedMs = 0;
		loop {
			match ureq::post(&format!("{}/element", self.baseURL))
				.send_json(json!({ "using": "css selector", "value": cssSelector }))
			{
				Ok(_) => return,
				Err(ureq::Error::Status(404, _)) if waitedMs < timeoutMs => {
					thread::sleep(Duration::from_millis(500));
					waitedMs += 500;
				}
				Err(err) => panic!("waiting for {cssSelector:?}: {err}"),
			}
		}
	}

	fn pressKey(&self, key: char) {
		let key = key.to_string();
		self.post(
			"actions",
			json!({
				"actions": [{
					"type": "key",
					"id": "keyboard",
					"actions": [{"type": "keyDown", "value": key}, {"type": "keyUp", "value": key}]
				}]
			}),
		);
	}

	fn screenshot(&self, path: &str) {
		let response = ureq::get(&format!("{}/screenshot", self.baseURL))
			.call()
			.unwrap_or_else(|err| panic!("screenshot: {err}"))
			.into_json::<Value>()
			.unwrap();
		let pngBase64 = response["value"].as_str().unwrap_or_else(|| panic!("no screenshot in {response}"));
		fs::write(path, BASE64.decode(pngBase64).unwrap()).unwrap_or_else(|err| panic!("{path:?}: {err}"));
	}
}

impl Drop for WebDriverSession {
	fn drop(&mut self) {
		_ = ureq::delete(&self.baseURL).call();
	}
}
