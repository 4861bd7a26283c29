use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offers `contents` as a downloadable file via a temporary object URL and a
/// synthetic anchor click. Failures are swallowed; there is nothing useful to
/// do in the UI if the browser refuses a download.
pub fn offer_csv(filename: &str, contents: &str) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(document) => document,
        None => return,
    };

    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let mut options = BlobPropertyBag::new();
    options.type_("text/csv;charset=utf-8;");
    let blob = match Blob::new_with_str_sequence_and_options(&parts, &options) {
        Ok(blob) => blob,
        Err(_) => return,
    };
    let url = match Url::create_object_url_with_blob(&blob) {
        Ok(url) => url,
        Err(_) => return,
    };

    if let Some(anchor) = document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
    {
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();
    }
    let _ = Url::revoke_object_url(&url);
}
