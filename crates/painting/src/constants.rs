/// Screen units one grid pixel covers at scale 1.0 (an unstyled canvas).
pub const CELL_SIZE: f32 = 1.0;

/// Setup places the canvas this many screen units up/left of the window center.
pub const SETUP_INSET: f32 = 8.0;

/// Default palette (PICO-8), RGB.
pub const PICO8_COLORS: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0x1d, 0x2b, 0x53],
    [0x7e, 0x25, 0x53],
    [0x00, 0x87, 0x51],
    [0xab, 0x52, 0x36],
    [0x5f, 0x57, 0x4f],
    [0xc2, 0xc3, 0xc7],
    [0xff, 0xf1, 0xe8],
    [0xff, 0x00, 0x4d],
    [0xff, 0xa3, 0x00],
    [0xff, 0xec, 0x27],
    [0x00, 0xe4, 0x36],
    [0x29, 0xad, 0xff],
    [0x83, 0x76, 0x9c],
    [0xff, 0x77, 0xa8],
    [0xff, 0xcc, 0xaa],
];
