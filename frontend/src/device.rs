use uuid::Uuid;
use web_sys::Storage;

const DEVICE_ID_KEY: &str = "polling-desa-device-id";
const HAS_VOTED_KEY: &str = "polling-desa-hasVoted";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Returns the persisted device id, minting and storing one on first load.
/// When storage is unavailable (private mode, disabled cookies) the id is
/// ephemeral for this session; the backend constraint still holds per insert.
pub fn get_or_create_device_id() -> String {
    let fresh = Uuid::new_v4().to_string();
    match local_storage() {
        Some(store) => {
            if let Ok(Some(id)) = store.get_item(DEVICE_ID_KEY) {
                if !id.is_empty() {
                    return id;
                }
            }
            let _ = store.set_item(DEVICE_ID_KEY, &fresh);
            fresh
        }
        None => fresh,
    }
}

/// Advisory flag only. Authoritative duplicate rejection lives in the
/// backend's unique constraint on device_id.
pub fn has_voted() -> bool {
    local_storage()
        .and_then(|store| store.get_item(HAS_VOTED_KEY).ok().flatten())
        .map_or(false, |value| value == "1")
}

pub fn set_has_voted(value: bool) {
    if let Some(store) = local_storage() {
        let _ = store.set_item(HAS_VOTED_KEY, if value { "1" } else { "0" });
    }
}
