//! Window-level helpers: dialogs, file download and file reading.

use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, File, FileReader, HtmlAnchorElement, Url};

use crate::error::{Error, Result};

fn js_error(err: JsValue) -> Error {
	Error::Browser(format!("{err:?}"))
}

fn window() -> Result<web_sys::Window> {
	web_sys::window().ok_or_else(|| Error::Browser("no window".into()))
}

pub fn alert(message: &str) {
	if let Err(err) = window().and_then(|w| w.alert_with_message(message).map_err(js_error)) {
		log::error!("alert failed: {err}");
	}
}

/// Asks the user; any failure to show the dialog counts as "no".
pub fn confirm(message: &str) -> bool {
	window()
		.and_then(|w| w.confirm_with_message(message).map_err(js_error))
		.unwrap_or(false)
}

/// Offers `text` as a JSON file download named `file_name`.
pub fn download_json(file_name: &str, text: &str) -> Result<()> {
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
	let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

	let anchor: HtmlAnchorElement = window()?
		.document()
		.ok_or_else(|| Error::Browser("no document".into()))?
		.create_element("a")
		.map_err(js_error)?
		.dyn_into()
		.map_err(|_| Error::Browser("anchor element expected".into()))?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	Url::revoke_object_url(&url).map_err(js_error)
}

/// Reads `file` as UTF-8 text and hands the result to `on_load`.
pub fn read_text(file: &File, on_load: impl FnOnce(Result<String>) + 'static) -> Result<()> {
	let reader = FileReader::new().map_err(js_error)?;
	let done = reader.clone();
	let callback = Closure::once_into_js(move || {
		let text = done
			.result()
			.map_err(js_error)
			.and_then(|value| {
				value
					.as_string()
					.ok_or_else(|| Error::Browser("file is not text".into()))
			});
		on_load(text);
	});
	reader.set_onload(Some(callback.unchecked_ref()));
	reader.read_as_text(file).map_err(js_error)
}
