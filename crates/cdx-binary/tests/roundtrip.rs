//! Decode-then-reencode round-trips for fixed-width integer payloads.

use cdx_binary::{ObjectStore, PropertyDecoder};
use cdx_model::{ColorTable, FontTable, Property};
use proptest::prelude::*;

fn prop(bytes: &[u8]) -> Property {
    Property::new(0, 0, bytes.to_vec())
}

macro_rules! roundtrip {
    ($name:ident, $ty:ty, $accessor:ident) => {
        proptest! {
            #[test]
            fn $name(value: $ty) {
                let fonts = FontTable::default();
                let colors = ColorTable::default();
                let objects = ObjectStore::new();
                let decoder = PropertyDecoder::new(&fonts, &colors, &objects);

                let p = prop(&value.to_le_bytes());
                let decoded = decoder.$accessor(&p).unwrap();
                prop_assert_eq!(decoded, value);
                let reencoded = decoded.to_le_bytes();
                prop_assert_eq!(reencoded.as_slice(), p.data());
            }
        }
    };
}

roundtrip!(u8_payloads_roundtrip, u8, uint8);
roundtrip!(i8_payloads_roundtrip, i8, int8);
roundtrip!(u16_payloads_roundtrip, u16, uint16);
roundtrip!(i16_payloads_roundtrip, i16, int16);
roundtrip!(u32_payloads_roundtrip, u32, uint32);
roundtrip!(i32_payloads_roundtrip, i32, int32);
roundtrip!(u64_payloads_roundtrip, u64, uint64);
roundtrip!(i64_payloads_roundtrip, i64, int64);

proptest! {
    /// Any payload length other than the exact width must fail, never return
    /// a value.
    #[test]
    fn off_width_payloads_never_decode(bytes in proptest::collection::vec(any::<u8>(), 0..16)) {
        let fonts = FontTable::default();
        let colors = ColorTable::default();
        let objects = ObjectStore::new();
        let decoder = PropertyDecoder::new(&fonts, &colors, &objects);

        let p = prop(&bytes);
        if bytes.len() != 2 {
            prop_assert!(decoder.uint16(&p).is_err());
        }
        if bytes.len() != 4 {
            prop_assert!(decoder.int32(&p).is_err());
        }
        if bytes.len() != 8 {
            prop_assert!(decoder.float64(&p).is_err());
        }
    }
}
