use std::any::Any;
use std::cell::Cell;
use std::panic::{self, UnwindSafe};
use std::sync::Once;

use tracing::debug;

use super::ExtractionError;

/// How far into the stream the `%PDF-` marker may appear. Readers tolerate a
/// little leading garbage before the header.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Extracts the text layer of every page, in page order, concatenated.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !has_pdf_header(bytes) {
        return Err(ExtractionError::Pdf(
            "missing PDF header; the file is not a valid PDF".to_string(),
        ));
    }

    // pdf-extract panics on some malformed documents instead of returning an error.
    match catch_parser_panic(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(message) => {
            debug!("PDF parser panicked: {message}");
            Err(ExtractionError::Pdf(
                "the document structure could not be parsed".to_string(),
            ))
        }
    }
}

thread_local! {
    static SILENCE_PANICS: Cell<bool> = const { Cell::new(false) };
}

static INSTALL_PANIC_FILTER: Once = Once::new();

/// Runs `f`, turning a panic into `Err(message)`. The default hook's stderr
/// report is skipped for panics raised on this thread while `f` runs; panics
/// anywhere else still reach the previously installed hook.
fn catch_parser_panic<T>(f: impl FnOnce() -> T + UnwindSafe) -> Result<T, String> {
    INSTALL_PANIC_FILTER.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !SILENCE_PANICS.try_with(Cell::get).unwrap_or(false) {
                previous(info);
            }
        }));
    });

    SILENCE_PANICS.with(|silenced| silenced.set(true));
    let result = panic::catch_unwind(f);
    SILENCE_PANICS.with(|silenced| silenced.set(false));

    result.map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}
