// Decode constants for CAN pressure captures

/// CAN identifier carrying the pressure byte (hex, no prefix).
pub const TARGET_CAN_ID: &str = "295";

/// 0-based index of the pressure byte inside the payload.
pub const PAYLOAD_BYTE_OFFSET: usize = 1;

/// Physical pressure (bar) mapped from the raw byte full scale.
pub const FULL_SCALE_PRESSURE: f64 = 200.0;

pub const RAW_BYTE_FULL_SCALE: f64 = 255.0;

/// Display ceiling for the pressure axis. Not a decode constraint.
pub const PLOT_Y_CEILING: f64 = 250.0;

/// Metadata lines at the top of every capture export.
pub const HEADER_ROWS_TO_SKIP: usize = 5;

pub const MAX_FILES_PER_BATCH: usize = 3;

/// Decoded captures kept by the result cache before the oldest is evicted.
pub const RESULT_CACHE_CAPACITY: usize = 32;

// Column layout: Bus, No, Time, State, ID (hex), DLC, Data (hex), ASCII
pub const COLUMN_COUNT: usize = 8;
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "Bus",
    "No",
    "Time",
    "State",
    "ID (hex)",
    "DLC",
    "Data (hex)",
    "ASCII",
];

pub const TIME_COLUMN: usize = 2;
pub const CAN_ID_COLUMN: usize = 4;
pub const DLC_COLUMN: usize = 5;
pub const DATA_COLUMN: usize = 6;

/// Largest DLC accepted when splitting whitespace captures (CAN FD).
pub const MAX_DLC: usize = 64;

// Compression magic numbers
pub const GZIP_MAGIC: &[u8; 2] = &[0x1f, 0x8b];
pub const ZSTD_MAGIC: &[u8; 4] = &[0x28, 0xb5, 0x2f, 0xfd];
pub const LZ4_FRAME_MAGIC: &[u8; 4] = &[0x04, 0x22, 0x4d, 0x18];

pub const UTF8_BOM: &str = "\u{feff}";

/// Delimiter dialects, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Comma,
    Whitespace,
    Tab,
    Semicolon,
}

impl Dialect {
    pub const TRIAL_ORDER: [Dialect; 4] = [
        Dialect::Comma,
        Dialect::Whitespace,
        Dialect::Tab,
        Dialect::Semicolon,
    ];

    /// Single-byte delimiter, `None` for whitespace runs.
    pub fn delimiter(self) -> Option<u8> {
        match self {
            Dialect::Comma => Some(b','),
            Dialect::Whitespace => None,
            Dialect::Tab => Some(b'\t'),
            Dialect::Semicolon => Some(b';'),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Comma => "comma",
            Dialect::Whitespace => "whitespace",
            Dialect::Tab => "tab",
            Dialect::Semicolon => "semicolon",
        }
    }
}
