//! Reversible text encoding of the save snapshot for manual backup and
//! transfer between machines.

use {
    crate::snapshot::SaveData,
    base64::{Engine as _, engine::general_purpose::STANDARD},
    bevy::log::warn,
};

/// Encodes the snapshot as a base64 token of its JSON form.
pub fn export_save(save: &SaveData) -> Option<String> {
    match serde_json::to_string(save) {
        Ok(json) => Some(STANDARD.encode(json)),
        Err(e) => {
            warn!("Failed to encode save for export: {e}");
            None
        }
    }
}

/// Decodes a token back into a snapshot. Returns `None` (leaving existing
/// state untouched) unless the three core numeric fields are present,
/// well-typed and sane.
pub fn import_save(token: &str) -> Option<SaveData> {
    let bytes = match STANDARD.decode(token.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Rejected import token: not base64 ({e})");
            return None;
        }
    };
    let save: SaveData = match serde_json::from_slice(&bytes) {
        Ok(save) => save,
        Err(e) => {
            warn!("Rejected import token: malformed snapshot ({e})");
            return None;
        }
    };
    if !save.is_valid() {
        warn!("Rejected import token: core fields out of range");
        return None;
    }
    Some(save)
}
