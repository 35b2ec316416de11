//! Guid fabrication and validation
//!
//! Two guid families exist: version-4 UUID strings (generic and Chrome
//! dialects) and the fixed-length 12 character tokens Firefox uses.

use rand::Rng;
use uuid::Uuid;

pub const MOZILLA_GUID_LENGTH: usize = 12;

const MOZILLA_GUID_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_";

/// A fresh random UUID in its 36 character hyphenated form.
pub fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

pub fn is_uuid(guid: &str) -> bool {
    Uuid::parse_str(guid).is_ok()
}

/// Keep `guid` when it parses as a UUID, otherwise fabricate a new one.
pub fn ensure_uuid(guid: &str) -> String {
    if is_uuid(guid) {
        guid.to_string()
    } else {
        new_uuid()
    }
}

/// A fresh Firefox style guid, see `makeGUID()` in Firefox sync utils.
pub fn new_mozilla_guid() -> String {
    let mut rng = rand::thread_rng();
    (0..MOZILLA_GUID_LENGTH)
        .map(|_| MOZILLA_GUID_ALPHABET[rng.gen_range(0..MOZILLA_GUID_ALPHABET.len())] as char)
        .collect()
}

/// Keep `guid` when it already has the Firefox length, otherwise fabricate.
pub fn ensure_mozilla_guid(guid: &str) -> String {
    if guid.chars().count() == MOZILLA_GUID_LENGTH {
        guid.to_string()
    } else {
        new_mozilla_guid()
    }
}
