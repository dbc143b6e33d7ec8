//! Rewrites document-search results so that S3-backed `DocumentURI` values
//! become pre-signed, time-limited download links.
//!
//! The payload shape belongs to the external search service, so it is handled
//! as loose JSON: anything that does not look like an S3 URI inside a
//! `ResultItems` entry passes through untouched.

use std::time::Duration;

use serde_json::Value;

use crate::errors::StorageError;
use crate::storage::ObjectStore;

const PRESIGN_TTL: Duration = Duration::from_secs(3600);

/// Replace each S3-style `DocumentURI` in `payload["ResultItems"]` with a
/// presigned GET URL valid for one hour.
///
/// Items are never added or removed. An item is left unchanged when its URI
/// is absent, does not point at S3, has too few segments to carry a
/// bucket/key pair, or when the store reports missing credentials (the
/// unsigned URI is still usable as an identifier). Any other storage failure
/// is returned to the caller.
pub async fn rewrite_result_uris(
    store: &dyn ObjectStore,
    payload: &mut Value,
) -> Result<(), StorageError> {
    let Some(items) = payload
        .get_mut("ResultItems")
        .and_then(|v| v.as_array_mut())
    else {
        return Ok(());
    };

    for item in items {
        let Some(uri) = item.get("DocumentURI").and_then(|v| v.as_str()) else {
            continue;
        };

        let Some((bucket, key)) = parse_s3_uri(uri) else {
            continue;
        };

        match store.presigned_get_url(&bucket, &key, PRESIGN_TTL).await {
            Ok(url) => {
                item["DocumentURI"] = Value::String(url);
            }
            // Without credentials the unsigned URI is the best we have.
            Err(StorageError::MissingCredentials) => {
                tracing::debug!("no storage credentials, leaving {} unsigned", uri);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

/// Extract (bucket, key) from a path-style S3 URI such as
/// `https://s3.us-west-2.amazonaws.com/bucket/path/to/key`.
///
/// Returns `None` for non-S3 hosts (already-reachable http(s) links are not
/// re-signed) and for URIs with too few segments to carry a bucket and key.
fn parse_s3_uri(uri: &str) -> Option<(String, String)> {
    let segments: Vec<&str> = uri.split('/').collect();

    if !segments.get(2)?.starts_with("s3") {
        return None;
    }
    if segments.len() < 5 {
        return None;
    }

    let bucket = segments[3].to_string();
    let key = segments[4..].join("/");
    Some((bucket, key))
}
