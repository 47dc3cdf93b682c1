// Helvetica advance widths (1/1000 em) for ASCII 32..=126.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

// Helvetica advance widths for Latin-1 0xA0..=0xFF.
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..macron
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // degree..questiondown
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // Agrave..Idieresis
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Eth..germandbls
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // agrave..idieresis
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // eth..ydieresis
];

// The cp1252 block WinAnsi puts at 0x80..=0x9F: (char, byte, Helvetica width).
const WIN_ANSI_HIGH: [(char, u8, u16); 27] = [
    ('\u{20ac}', 0x80, 556),  // Euro
    ('\u{201a}', 0x82, 222),  // quotesinglbase
    ('\u{0192}', 0x83, 556),  // florin
    ('\u{201e}', 0x84, 333),  // quotedblbase
    ('\u{2026}', 0x85, 1000), // ellipsis
    ('\u{2020}', 0x86, 556),  // dagger
    ('\u{2021}', 0x87, 556),  // daggerdbl
    ('\u{02c6}', 0x88, 333),  // circumflex
    ('\u{2030}', 0x89, 1000), // perthousand
    ('\u{0160}', 0x8a, 667),  // Scaron
    ('\u{2039}', 0x8b, 333),  // guilsinglleft
    ('\u{0152}', 0x8c, 1000), // OE
    ('\u{017d}', 0x8e, 611),  // Zcaron
    ('\u{2018}', 0x91, 222),  // quoteleft
    ('\u{2019}', 0x92, 222),  // quoteright
    ('\u{201c}', 0x93, 333),  // quotedblleft
    ('\u{201d}', 0x94, 333),  // quotedblright
    ('\u{2022}', 0x95, 350),  // bullet
    ('\u{2013}', 0x96, 556),  // endash
    ('\u{2014}', 0x97, 1000), // emdash
    ('\u{02dc}', 0x98, 333),  // tilde
    ('\u{2122}', 0x99, 1000), // trademark
    ('\u{0161}', 0x9a, 500),  // scaron
    ('\u{203a}', 0x9b, 333),  // guilsinglright
    ('\u{0153}', 0x9c, 944),  // oe
    ('\u{017e}', 0x9e, 500),  // zcaron
    ('\u{0178}', 0x9f, 667),  // Ydieresis
];

const BOLD_FACTOR: f32 = 1.06;
const ELLIPSIS: &str = "...";

/// WinAnsi byte and Helvetica width for `ch`, if the encoding has it.
fn encode(ch: char) -> Option<(u8, u16)> {
    let cp = ch as u32;
    match cp {
        0x20..=0x7e => Some((cp as u8, HELVETICA_ASCII[(cp - 0x20) as usize])),
        0xa0..=0xff => Some((cp as u8, HELVETICA_LATIN1[(cp - 0xa0) as usize])),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(c, _, _)| *c == ch)
            .map(|&(_, byte, width)| (byte, width)),
    }
}

/// WinAnsi bytes for `text`. Anything the encoding lacks becomes `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| encode(ch).map_or(b'?', |(byte, _)| byte))
        .collect()
}

fn char_width(ch: char) -> u16 {
    // Unencodable text is drawn as '?'.
    encode(ch).or_else(|| encode('?')).map_or(0, |(_, width)| width)
}

/// Approximate rendered width in points.
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    let w = units as f32 * size / 1000.0;
    if bold {
        w * BOLD_FACTOR
    } else {
        w
    }
}

/// Cuts `text` so it fits `max_width`, marking the cut with an ellipsis.
pub fn fit(text: &str, max_width: f32, size: f32, bold: bool) -> String {
    if text_width(text, size, bold) <= max_width {
        return text.to_string();
    }
    let budget = max_width - text_width(ELLIPSIS, size, bold);
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if text_width(&out, size, bold) > budget {
            out.pop();
            break;
        }
    }
    let trimmed = out.trim_end().to_string();
    format!("{}{}", trimmed, ELLIPSIS)
}
