#![no_main]

use libfuzzer_sys::fuzz_target;

use cdx_binary::{ObjectStore, PropertyDecoder};
use cdx_model::{Charset, ColorTable, Font, FontTable, Property};

const MAX_INPUT_BYTES: usize = 1 << 20;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_BYTES {
        return;
    }

    let mut fonts = FontTable::default();
    // A mix of mapped, unknown, and unmapped charsets so fallback paths run.
    for (id, charset) in [
        (0u16, Charset::WIN_LATIN_1),
        (1, Charset::UNKNOWN),
        (2, Charset(777)),
        (3, Charset::SHIFT_JIS),
    ] {
        fonts.insert(Font {
            id,
            charset,
            name: "Fuzz".to_string(),
        });
    }
    let colors = ColorTable::default();
    let objects = ObjectStore::new();

    let prop = Property::new(0, 0, data.to_vec());
    let mut decoder = PropertyDecoder::new(&fonts, &colors, &objects);
    if let Ok(text) = decoder.styled_string(&prop) {
        // Chunks must reassemble into a well-formed string.
        let _ = text.plain_text();
    }
});
