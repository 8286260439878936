//! Styled string assembly and legacy code-page text decoding.
//!
//! A CDX styled string is a u16 style-run count, `count` 10-byte runs (a u16
//! start offset followed by an 8-byte font style), then the raw text bytes.
//! Runs are not guaranteed to arrive sorted; each run's segment extends to the
//! next sorted run's start offset and is decoded with the character set of the
//! run's font.

use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock};

use encoding_rs::{
    Encoding, BIG5, EUC_KR, GBK, MACINTOSH, SHIFT_JIS, UTF_16LE, UTF_8, WINDOWS_1250,
    WINDOWS_1251, WINDOWS_1252, WINDOWS_1253, WINDOWS_1254, WINDOWS_1255, WINDOWS_1256,
    WINDOWS_1257, WINDOWS_1258, WINDOWS_874,
};

use cdx_model::{Charset, Font, FontStyle, FontTable, StyledText, TextChunk, FACE_PLAIN};

use crate::error::{DecodeError, DecodeWarning};
use crate::primitives;

/// Bytes per style run: u16 start offset + 8-byte font style.
pub(crate) const STYLE_RUN_BYTES: usize = 10;

/// Default size (1/20 pt) used when a styled string carries no runs: 12 pt.
const DEFAULT_SIZE_20PT: u16 = 240;

pub(crate) fn encoding_for_charset(charset: Charset) -> Option<&'static Encoding> {
    Some(match charset {
        Charset::THAI => WINDOWS_874,
        Charset::SHIFT_JIS => SHIFT_JIS,
        Charset::GB_2312 => GBK,
        Charset::KSC_5601 => EUC_KR,
        Charset::BIG5 => BIG5,
        Charset::UTF_16 => UTF_16LE,
        Charset::WIN_EASTERN_EUROPEAN => WINDOWS_1250,
        Charset::WIN_CYRILLIC => WINDOWS_1251,
        Charset::WIN_LATIN_1 => WINDOWS_1252,
        Charset::WIN_GREEK => WINDOWS_1253,
        Charset::WIN_TURKISH => WINDOWS_1254,
        Charset::WIN_HEBREW => WINDOWS_1255,
        Charset::WIN_ARABIC => WINDOWS_1256,
        Charset::WIN_BALTIC => WINDOWS_1257,
        Charset::WIN_VIETNAMESE => WINDOWS_1258,
        Charset::MAC_ROMAN => MACINTOSH,
        Charset::UTF_8 => UTF_8,
        _ => return None,
    })
}

fn warn_charset_fallback(charset: u16) {
    static WARNED: OnceLock<Mutex<BTreeSet<u16>>> = OnceLock::new();

    let warned = WARNED.get_or_init(|| Mutex::new(BTreeSet::new()));
    let mut warned = match warned.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if warned.insert(charset) {
        log::warn!("charset {charset} has no mapped decoder; decoding text as Windows-1252");
    }
}

/// Decode `bytes` using the charset of `font`, falling back to Windows-1252
/// when the charset is unknown (value 0) or unmapped. Both fallbacks record a
/// distinct warning; neither is a hard failure.
pub(crate) fn decode_with_font(
    bytes: &[u8],
    font: &Font,
    warnings: &mut Vec<DecodeWarning>,
) -> String {
    let encoding = if font.charset == Charset::UNKNOWN {
        warnings.push(DecodeWarning::UnknownCharset { font: font.id });
        warn_charset_fallback(font.charset.0);
        WINDOWS_1252
    } else {
        match encoding_for_charset(font.charset) {
            Some(encoding) => encoding,
            None => {
                warnings.push(DecodeWarning::UnsupportedCharset {
                    charset: font.charset.0,
                    font: font.id,
                });
                warn_charset_fallback(font.charset.0);
                WINDOWS_1252
            }
        }
    };

    let (cow, _, _) = encoding.decode(bytes);
    cow.into_owned()
}

fn warn_missing_font(index: u16) {
    static WARNED: OnceLock<Mutex<BTreeSet<u16>>> = OnceLock::new();

    let warned = WARNED.get_or_init(|| Mutex::new(BTreeSet::new()));
    let mut warned = match warned.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if warned.insert(index) {
        log::warn!("font index {index} is not in the font table; substituting Arial");
    }
}

/// Look up a font by table index, synthesizing a default font (Windows-1252
/// "Arial") with a recorded warning when the index is absent. Missing fonts
/// are never a hard failure.
pub(crate) fn font_or_default(
    index: u16,
    fonts: &FontTable,
    position: usize,
    warnings: &mut Vec<DecodeWarning>,
) -> Font {
    if let Some(font) = fonts.get(index) {
        return font.clone();
    }
    warnings.push(DecodeWarning::MissingFont { index, position });
    warn_missing_font(index);
    Font {
        id: index,
        charset: Charset::WIN_LATIN_1,
        name: "Arial".to_string(),
    }
}

/// Assemble a styled string payload into ordered text chunks.
pub(crate) fn decode_styled_string(
    data: &[u8],
    position: usize,
    fonts: &FontTable,
    warnings: &mut Vec<DecodeWarning>,
) -> Result<StyledText, DecodeError> {
    let size_mismatch = || DecodeError::SizeMismatch {
        kind: "styled string",
        expected: "a u16 run count followed by 10-byte runs and text",
        actual: data.len(),
        position,
    };

    let run_count =
        usize::from(primitives::read_u16(data, 0).ok_or_else(size_mismatch)?);
    let runs_end = run_count
        .checked_mul(STYLE_RUN_BYTES)
        .and_then(|n| n.checked_add(2))
        .ok_or_else(size_mismatch)?;
    if runs_end > data.len() {
        return Err(size_mismatch());
    }
    let text = &data[runs_end..];

    // Zero runs: the whole text is one chunk styled with the table defaults.
    if run_count == 0 {
        let font = font_or_default(0, fonts, position, warnings);
        let chunk = TextChunk {
            style: FontStyle {
                font: 0,
                face: FACE_PLAIN,
                size_20pt: DEFAULT_SIZE_20PT,
                color: 0,
            },
            text: decode_with_font(text, &font, warnings),
        };
        return Ok(StyledText::from_chunks(vec![chunk]));
    }

    let mut runs = Vec::with_capacity(run_count);
    for i in 0..run_count {
        let offset = 2 + i * STYLE_RUN_BYTES;
        let start = primitives::read_u16(data, offset).ok_or_else(size_mismatch)?;
        let style = primitives::read_font_style(data, offset + 2).ok_or_else(size_mismatch)?;
        runs.push((start, style));
    }

    // Runs are not guaranteed to be pre-sorted; ties keep declaration order.
    runs.sort_by_key(|(start, _)| *start);

    let mut chunks = Vec::with_capacity(runs.len());
    for (i, (start, style)) in runs.iter().enumerate() {
        let begin = usize::from(*start).min(text.len());
        let end = match runs.get(i + 1) {
            Some((next_start, _)) => usize::from(*next_start).min(text.len()),
            None => text.len(),
        };
        // Degenerate zero-length spans carry no text.
        if begin >= end {
            continue;
        }

        let font = font_or_default(style.font, fonts, position, warnings);
        chunks.push(TextChunk {
            style: *style,
            text: decode_with_font(&text[begin..end], &font, warnings),
        });
    }

    Ok(StyledText::from_chunks(chunks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(start: u16, style: FontStyle) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&start.to_le_bytes());
        out.extend_from_slice(&style.font.to_le_bytes());
        out.extend_from_slice(&style.face.to_le_bytes());
        out.extend_from_slice(&style.size_20pt.to_le_bytes());
        out.extend_from_slice(&style.color.to_le_bytes());
        out
    }

    fn styled_string(runs: &[(u16, FontStyle)], text: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(runs.len() as u16).to_le_bytes());
        for (start, style) in runs {
            out.extend_from_slice(&run(*start, *style));
        }
        out.extend_from_slice(text);
        out
    }

    fn latin1_fonts() -> FontTable {
        let mut fonts = FontTable::default();
        fonts.insert(Font {
            id: 0,
            charset: Charset::WIN_LATIN_1,
            name: "Arial".to_string(),
        });
        fonts.insert(Font {
            id: 1,
            charset: Charset::WIN_LATIN_1,
            name: "Times".to_string(),
        });
        fonts
    }

    fn style_with_font(font: u16) -> FontStyle {
        FontStyle {
            font,
            size_20pt: 200,
            ..Default::default()
        }
    }

    #[test]
    fn out_of_order_runs_are_sorted_by_start_offset() {
        let data = styled_string(
            &[(5, style_with_font(1)), (0, style_with_font(0))],
            b"HelloWorld",
        );
        let mut warnings = Vec::new();
        let text = decode_styled_string(&data, 0, &latin1_fonts(), &mut warnings).unwrap();

        assert_eq!(text.chunks.len(), 2);
        assert_eq!(text.chunks[0].text, "Hello");
        assert_eq!(text.chunks[0].style.font, 0);
        assert_eq!(text.chunks[1].text, "World");
        assert_eq!(text.chunks[1].style.font, 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn zero_length_spans_are_skipped() {
        let data = styled_string(
            &[
                (0, style_with_font(0)),
                (3, style_with_font(1)),
                (3, style_with_font(0)),
            ],
            b"abcdef",
        );
        let mut warnings = Vec::new();
        let text = decode_styled_string(&data, 0, &latin1_fonts(), &mut warnings).unwrap();
        let segments: Vec<&str> = text.chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(segments, vec!["abc", "def"]);
    }

    #[test]
    fn zero_runs_yields_one_default_chunk() {
        let data = styled_string(&[], b"plain");
        let mut warnings = Vec::new();
        let text = decode_styled_string(&data, 0, &latin1_fonts(), &mut warnings).unwrap();
        assert_eq!(text.chunks.len(), 1);
        assert_eq!(text.chunks[0].text, "plain");
        assert_eq!(text.chunks[0].style.size_points(), 12.0);
        assert_eq!(text.chunks[0].style.face, FACE_PLAIN);
    }

    #[test]
    fn missing_font_and_unknown_charset_record_distinct_warnings() {
        let mut fonts = FontTable::default();
        fonts.insert(Font {
            id: 0,
            charset: Charset::UNKNOWN,
            name: "Mystery".to_string(),
        });

        // Font 0 exists but has an unknown charset; font 9 is absent.
        let data = styled_string(
            &[(0, style_with_font(0)), (2, style_with_font(9))],
            b"abcd",
        );
        let mut warnings = Vec::new();
        let text = decode_styled_string(&data, 7, &fonts, &mut warnings).unwrap();
        assert_eq!(text.plain_text(), "abcd");
        assert_eq!(
            warnings,
            vec![
                DecodeWarning::UnknownCharset { font: 0 },
                DecodeWarning::MissingFont {
                    index: 9,
                    position: 7
                },
            ]
        );
    }

    #[test]
    fn charset_selects_code_page() {
        let mut fonts = FontTable::default();
        fonts.insert(Font {
            id: 0,
            charset: Charset::WIN_CYRILLIC,
            name: "Arial Cyr".to_string(),
        });

        // 0xC0 is Cyrillic 'А' (U+0410) in Windows-1251.
        let data = styled_string(&[(0, style_with_font(0))], &[0xC0]);
        let mut warnings = Vec::new();
        let text = decode_styled_string(&data, 0, &fonts, &mut warnings).unwrap();
        assert_eq!(text.plain_text(), "А");
        assert!(warnings.is_empty());
    }

    #[test]
    fn truncated_run_region_is_a_size_mismatch() {
        // Declares 2 runs but only provides one.
        let mut data = Vec::new();
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&run(0, style_with_font(0)));
        let mut warnings = Vec::new();
        let err = decode_styled_string(&data, 3, &latin1_fonts(), &mut warnings).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SizeMismatch { position: 3, .. }
        ));
    }
}
