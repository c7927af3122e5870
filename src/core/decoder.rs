// Payload decoder: one byte of the data field to physical pressure

use crate::core::config::DecodeConfig;

/// Raw byte at `offset` of a whitespace-separated hex payload.
pub fn payload_byte(payload: &str, offset: usize) -> Option<u8> {
    let token = payload.split_whitespace().nth(offset)?;
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(token, 16).ok()
}

/// Pressure for one payload, `None` when the byte is absent or not hex.
pub fn decode_pressure(payload: &str, config: &DecodeConfig) -> Option<f64> {
    payload_byte(payload, config.byte_offset)
        .map(|raw| f64::from(raw) * config.physical_factor())
}
