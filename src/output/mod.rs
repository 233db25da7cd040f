pub mod csv;
pub mod table;

use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
