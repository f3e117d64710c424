//! Golden vectors for the index file layout.

/// A small data file.
pub const FRUIT_DATA: &[u8] = b"cherry,3\napple,1\nbanana,2\n";

/// Key length used with [`FRUIT_DATA`].
pub const FRUIT_KEY_LENGTH: usize = 6;

/// The exact index [`FRUIT_DATA`] must produce with [`FRUIT_KEY_LENGTH`].
pub const FRUIT_INDEX: &[u8] = &[
    // "apple," -> 9
    b'a', b'p', b'p', b'l', b'e', b',', 0, 0, 0, 0, 0, 0, 0, 9, b'\n',
    // "banana" -> 17
    b'b', b'a', b'n', b'a', b'n', b'a', 0, 0, 0, 0, 0, 0, 0, 17, b'\n',
    // "cherry" -> 0
    b'c', b'h', b'e', b'r', b'r', b'y', 0, 0, 0, 0, 0, 0, 0, 0, b'\n',
];

/// The mirror file [`FRUIT_DATA`] must produce.
pub const FRUIT_MIRROR: &str = "apple,[9]\nbanana[17]\ncherry[0]\n";

/// Data with short lines, which get padded keys.
pub const SHORT_LINES_DATA: &[u8] = b"figs and dates\nfig\n\n";

/// Key length used with [`SHORT_LINES_DATA`].
pub const SHORT_LINES_KEY_LENGTH: usize = 4;

/// The exact index [`SHORT_LINES_DATA`] must produce.
pub const SHORT_LINES_INDEX: &[u8] = &[
    // "    " (empty line) -> 19
    b' ', b' ', b' ', b' ', 0, 0, 0, 0, 0, 0, 0, 19, b'\n',
    // "fig " -> 15
    b'f', b'i', b'g', b' ', 0, 0, 0, 0, 0, 0, 0, 15, b'\n',
    // "figs" -> 0
    b'f', b'i', b'g', b's', 0, 0, 0, 0, 0, 0, 0, 0, b'\n',
];

/// The mirror file [`SHORT_LINES_DATA`] must produce; padding is not shown.
pub const SHORT_LINES_MIRROR: &str = "[19]\nfig[15]\nfigs[0]\n";
