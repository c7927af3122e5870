// Immutable decode configuration passed into the pipeline

use crate::core::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub struct DecodeConfig {
    pub target_id: String,
    pub byte_offset: usize,
    pub full_scale: f64,
    pub header_rows: usize,
    pub dialects: Vec<Dialect>,
    pub max_files: usize,
}

impl DecodeConfig {
    /// Physical units per raw count.
    pub fn physical_factor(&self) -> f64 {
        self.full_scale / RAW_BYTE_FULL_SCALE
    }

    /// Target identifier in the form rows are compared against.
    pub fn normalized_target(&self) -> String {
        self.target_id.trim().to_uppercase()
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            target_id: TARGET_CAN_ID.to_string(),
            byte_offset: PAYLOAD_BYTE_OFFSET,
            full_scale: FULL_SCALE_PRESSURE,
            header_rows: HEADER_ROWS_TO_SKIP,
            dialects: Dialect::TRIAL_ORDER.to_vec(),
            max_files: MAX_FILES_PER_BATCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factor() {
        let config = DecodeConfig::default();
        assert_eq!(config.physical_factor(), 200.0 / 255.0);
        assert_eq!(config.header_rows, 5);
        assert_eq!(config.dialects, Dialect::TRIAL_ORDER.to_vec());
    }

    #[test]
    fn test_normalized_target() {
        let config = DecodeConfig {
            target_id: " 1a0 ".to_string(),
            ..DecodeConfig::default()
        };
        assert_eq!(config.normalized_target(), "1A0");
    }
}
