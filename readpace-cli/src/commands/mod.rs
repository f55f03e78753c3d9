//! CLI command implementations

mod process;
mod read;
mod setup;
mod status;
mod test_email;

pub use process::process;
pub use read::read;
pub use setup::setup;
pub use status::status;
pub use test_email::test_email;

use crate::config::AppSettings;
use readpace_core::delivery::OutboxDelivery;
use readpace_core::storage::LocalStorage;
use readpace_core::Library;
use std::path::Path;
use std::sync::Arc;

/// Library stored directly in the data directory
fn open_library(data_dir: &Path) -> Library {
    Library::new(Arc::new(LocalStorage::new(data_dir)))
}

fn outbox_delivery(data_dir: &Path, settings: &AppSettings) -> OutboxDelivery {
    OutboxDelivery::new(
        settings.outbox_dir(data_dir),
        settings.sender_email.clone(),
        settings.user_email.clone(),
    )
}

fn display_or_unset(value: &str) -> &str {
    if value.trim().is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Progress key of a book: its file name, so `books/novel.txt` and
/// `novel.txt` name the same book
fn book_id(file: &str) -> String {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
        .to_string()
}
