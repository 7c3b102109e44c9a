use serde::{Deserialize, Serialize};

/// Length of the brightness ramp and of the traveling wave window.
pub const WAVE_SIZE: usize = 22;

// Glyph identifiers index into a shared 16-column atlas space:
// row 1 (16..=25) digits, rows 2-3 (33..=58) Latin capitals,
// rows 4-6 (64..=111) half-width katakana.
const DIGIT_BASE: u16 = 16;
const LETTER_BASE: u16 = 33;
const KATAKANA_BASE: u16 = 64;

static DECIMAL_TABLE: [u16; 10] = [16, 17, 18, 19, 20, 21, 22, 23, 24, 25];

static HEX_TABLE: [u16; 16] = [
    16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 33, 34, 35, 36, 37, 38,
];

static BINARY_TABLE: [u16; 2] = [16, 17];

// A, C, G, T
static DNA_TABLE: [u16; 4] = [33, 35, 39, 52];

// Digits plus the 48-glyph katakana block.
static MATRIX_TABLE: [u16; 58] = [
    16, 17, 18, 19, 20, 21, 22, 23, 24, 25, //
    64, 65, 66, 67, 68, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79, //
    80, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95, //
    96, 97, 98, 99, 100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 110, 111,
];

/// Half-width katakana used by the Matrix mode, in atlas order.
static KATAKANA: [char; 48] = [
    'ｦ', 'ｧ', 'ｨ', 'ｩ', 'ｪ', 'ｫ', 'ｬ', 'ｭ', 'ｮ', 'ｯ', 'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ',
    'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ', 'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ', 'ﾉ', 'ﾊ',
    'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ', 'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ', 'ﾕ', 'ﾖ',
];

/// Character set driving which glyph identifiers populate strips.
/// Selected at construction; the table is immutable for the session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GlyphMode {
    #[default]
    Matrix,
    Dna,
    Binary,
    Hexadecimal,
    Decimal,
}

impl GlyphMode {
    pub fn name(&self) -> &str {
        match self {
            GlyphMode::Matrix => "Matrix",
            GlyphMode::Dna => "DNA",
            GlyphMode::Binary => "Binary",
            GlyphMode::Hexadecimal => "Hex",
            GlyphMode::Decimal => "Decimal",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            GlyphMode::Matrix => GlyphMode::Dna,
            GlyphMode::Dna => GlyphMode::Binary,
            GlyphMode::Binary => GlyphMode::Hexadecimal,
            GlyphMode::Hexadecimal => GlyphMode::Decimal,
            GlyphMode::Decimal => GlyphMode::Matrix,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            GlyphMode::Matrix => GlyphMode::Decimal,
            GlyphMode::Dna => GlyphMode::Matrix,
            GlyphMode::Binary => GlyphMode::Dna,
            GlyphMode::Hexadecimal => GlyphMode::Binary,
            GlyphMode::Decimal => GlyphMode::Hexadecimal,
        }
    }

    /// The glyph identifiers this mode draws from.
    pub fn table(&self) -> &'static [u16] {
        match self {
            GlyphMode::Matrix => &MATRIX_TABLE,
            GlyphMode::Dna => &DNA_TABLE,
            GlyphMode::Binary => &BINARY_TABLE,
            GlyphMode::Hexadecimal => &HEX_TABLE,
            GlyphMode::Decimal => &DECIMAL_TABLE,
        }
    }
}

/// Displayable symbol for a glyph identifier. Rendering concern only;
/// the simulation core never calls this.
pub fn symbol(id: u16) -> char {
    match id {
        16..=25 => (b'0' + (id - DIGIT_BASE) as u8) as char,
        33..=58 => (b'A' + (id - LETTER_BASE) as u8) as char,
        64..=111 => KATAKANA[(id - KATAKANA_BASE) as usize],
        _ => '?',
    }
}

/// Precompute the brightness ramp: an easing curve from 1.0 down to 0.2,
/// used for the traveling wave and for near-camera fade-out.
pub fn build_ramp() -> [f32; WAVE_SIZE] {
    let mut ramp = [0.0f32; WAVE_SIZE];
    for (i, v) in ramp.iter_mut().enumerate() {
        let t = (WAVE_SIZE - i) as f32 / (WAVE_SIZE - 1) as f32;
        *v = 0.2 + 0.8 * (t * std::f32::consts::FRAC_PI_2).sin();
    }
    ramp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_has_a_symbol() {
        for mode in [
            GlyphMode::Matrix,
            GlyphMode::Dna,
            GlyphMode::Binary,
            GlyphMode::Hexadecimal,
            GlyphMode::Decimal,
        ] {
            assert!(!mode.table().is_empty());
            for &id in mode.table() {
                assert_ne!(symbol(id), '?', "mode {} id {}", mode.name(), id);
            }
        }
    }

    #[test]
    fn dna_table_spells_acgt() {
        let chars: Vec<char> = DNA_TABLE.iter().map(|&id| symbol(id)).collect();
        assert_eq!(chars, vec!['A', 'C', 'G', 'T']);
    }

    #[test]
    fn hex_table_covers_digits_and_af() {
        let chars: Vec<char> = HEX_TABLE.iter().map(|&id| symbol(id)).collect();
        assert_eq!(chars[..10], ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9']);
        assert_eq!(chars[10..], ['A', 'B', 'C', 'D', 'E', 'F']);
    }

    #[test]
    fn mode_cycling_round_trips() {
        let mut mode = GlyphMode::Matrix;
        for _ in 0..5 {
            mode = mode.next();
        }
        assert_eq!(mode, GlyphMode::Matrix);
        assert_eq!(GlyphMode::Dna.next().prev(), GlyphMode::Dna);
    }

    #[test]
    fn ramp_eases_from_one_to_dim() {
        let ramp = build_ramp();
        // The sine argument passes pi/2 at i = 1, so the peak sits there.
        assert!((ramp[1] - 1.0).abs() < 1e-5);
        assert!(ramp[0] > 0.99);
        // Last entry: t = 1/(WAVE_SIZE-1), close to the 0.2 floor.
        assert!(ramp[WAVE_SIZE - 1] > 0.2 && ramp[WAVE_SIZE - 1] < 0.3);
        for w in ramp[1..].windows(2) {
            assert!(w[1] < w[0], "ramp must decrease monotonically past the peak");
        }
        for v in ramp {
            assert!((0.2..=1.0).contains(&v));
        }
    }
}
