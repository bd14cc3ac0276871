//! Object paths for product images.

use chrono::{DateTime, Utc};

/// Storage bucket holding product images.
pub const ASSET_BUCKET: &str = "imagenes-productos";

/// Folder inside the bucket.
pub const ASSET_PREFIX: &str = "productos";

/// Object path for an upload.
///
/// Uses `target_name` verbatim when given, otherwise
/// `<unix millis>-<file name with whitespace runs replaced by '-'>`.
pub fn upload_path(file_name: &str, target_name: Option<&str>, now: DateTime<Utc>) -> String {
    let name = match target_name {
        Some(name) => name.to_string(),
        None => format!(
            "{}-{}",
            now.timestamp_millis(),
            file_name.split_whitespace().collect::<Vec<_>>().join("-")
        ),
    };
    format!("{}/{}", ASSET_PREFIX, name)
}

/// Public URL for an object path under `base_url`.
pub fn public_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        ASSET_BUCKET,
        path
    )
}

/// Object path to remove for a public URL or relative name.
///
/// A full URL keeps only what follows the bucket name; anything else is taken
/// as a name inside the prefix folder.
pub fn relative_asset_path(path_or_url: &str) -> String {
    let marker = format!("{}/", ASSET_BUCKET);
    match path_or_url.split_once(&marker) {
        Some((_, relative)) => relative.to_string(),
        None => format!("{}/{}", ASSET_PREFIX, path_or_url),
    }
}
