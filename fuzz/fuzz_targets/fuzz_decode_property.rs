#![no_main]

use libfuzzer_sys::fuzz_target;

use cdx_binary::{decode_color_table, decode_font_table, ObjectStore, PropertyDecoder};
use cdx_model::{ColorTable, FontTable, Property};

// Keep pathological inputs from driving very large allocations.
const MAX_INPUT_BYTES: usize = 1 << 20;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_BYTES {
        return;
    }

    let fonts = FontTable::default();
    let colors = ColorTable::default();
    let mut objects = ObjectStore::new();
    objects.register(1u32, 42u8);

    let prop = Property::new(0, 0, data.to_vec());
    let mut decoder = PropertyDecoder::new(&fonts, &colors, &objects);

    // Every accessor must reject or decode arbitrary bytes without panicking.
    let _ = decoder.boolean(&prop);
    let _ = decoder.unsigned(&prop);
    let _ = decoder.signed(&prop);
    let _ = decoder.uint64(&prop);
    let _ = decoder.float64(&prop);
    let _ = decoder.float64_array(&prop);
    let _ = decoder.int16_array(&prop);
    let _ = decoder.int16_list(&prop);
    let _ = decoder.coordinate(&prop);
    let _ = decoder.point2(&prop);
    let _ = decoder.point3(&prop, false);
    let _ = decoder.rect(&prop);
    let _ = decoder.point2_list(&prop);
    let _ = decoder.point3_list(&prop, true);
    let _ = decoder.date(&prop);
    let _ = decoder.object_ref::<u8>(&prop);
    let _ = decoder.object_ref_array::<u8>(&prop);
    let _ = decoder.object_ref_list::<u8>(&prop);
    let _ = decoder.object_ref_map::<u8, u8>(&prop);
    let _ = decoder.font_ref(&prop);
    let _ = decoder.color_ref(&prop);
    let _ = decoder.font_style(&prop);
    let _ = decoder.element_list(&prop);
    let _ = decoder.generic_list(&prop);
    let _ = decode_font_table(&prop);
    let _ = decode_color_table(&prop);
});
