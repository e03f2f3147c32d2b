use std::fmt::Write as _;
use std::io::Write;

use image::RgbImage;
use tracing::debug;

use crate::asset_pipeline::common::error::{ConversionError, Result};
use crate::asset_pipeline::header::rgb565;
use crate::asset_pipeline::header::types::HeaderSpec;
use crate::asset_pipeline::header::writer::HeaderWriter;

/// Bytes of text per table entry: `0xFFFF, `
const ENTRY_TEXT_LEN: usize = 8;

/// Writes an Arduino-style header with a `const uint16_t ...[] PROGMEM` table.
pub struct ProgmemHeaderWriter;

impl ProgmemHeaderWriter {
    fn check_limits(image: &RgbImage, spec: &HeaderSpec) -> Result<()> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 || width > u16::MAX as u32 || height > u16::MAX as u32 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        let i16_range = i16::MIN as i32..=i16::MAX as i32;
        if !i16_range.contains(&spec.offset_x) || !i16_range.contains(&spec.offset_y) {
            return Err(ConversionError::EncodeError(format!(
                "offsets ({}, {}) do not fit int16_t",
                spec.offset_x, spec.offset_y
            )));
        }
        Ok(())
    }

    /// Renders the full header text in memory.
    pub fn render(&self, image: &RgbImage, spec: &HeaderSpec) -> Result<String> {
        Self::check_limits(image, spec)?;

        let (width, height) = image.dimensions();
        let naming = &spec.naming;
        let var = &naming.var_name;
        let guard = &naming.include_guard;
        let label = spec.label.as_deref().unwrap_or("image");

        let mut out = String::with_capacity(512 + (width as usize + 1) * height as usize * ENTRY_TEXT_LEN);
        let fmt_err = |e: std::fmt::Error| ConversionError::EncodeError(e.to_string());

        writeln!(out, "// Image: {}", label).map_err(fmt_err)?;
        writeln!(out, "// Size: {}x{}", width, height).map_err(fmt_err)?;
        writeln!(out, "// Generated automatically - do not edit by hand").map_err(fmt_err)?;
        writeln!(out, "#ifndef {}", guard).map_err(fmt_err)?;
        writeln!(out, "#define {}\n", guard).map_err(fmt_err)?;
        writeln!(
            out,
            "// {} is defined first so it can be checked before use",
            naming.feature_flag
        )
        .map_err(fmt_err)?;
        writeln!(out, "#define {}\n", naming.feature_flag).map_err(fmt_err)?;
        writeln!(out, "const uint16_t {}[] PROGMEM = {{", var).map_err(fmt_err)?;

        for row in image.rows() {
            out.push_str("  ");
            for pixel in row {
                let [r, g, b] = pixel.0;
                write!(out, "0x{:04X}, ", rgb565::pack(r, g, b)).map_err(fmt_err)?;
            }
            out.push('\n');
        }

        out.push_str("};\n");
        writeln!(out, "const uint16_t {}_width = {};", var, width).map_err(fmt_err)?;
        writeln!(out, "const uint16_t {}_height = {};", var, height).map_err(fmt_err)?;
        writeln!(out, "const int16_t {}_offset_x = {};", var, spec.offset_x).map_err(fmt_err)?;
        writeln!(out, "const int16_t {}_offset_y = {};\n", var, spec.offset_y).map_err(fmt_err)?;
        writeln!(out, "#endif // {}", guard).map_err(fmt_err)?;

        Ok(out)
    }
}

impl HeaderWriter for ProgmemHeaderWriter {
    fn write_header(&self, image: &RgbImage, spec: &HeaderSpec, output: &mut dyn Write) -> Result<()> {
        debug!("Rendering header table: {}x{}", image.width(), image.height());

        let text = self.render(image, spec)?;
        output
            .write_all(text.as_bytes())
            .map_err(|e| ConversionError::OutputWriteError(e.to_string()))?;

        debug!("Header rendering complete, {} bytes", text.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_pipeline::config::HeaderNaming;
    use image::Rgb;

    fn spec(offset_x: i32, offset_y: i32) -> HeaderSpec {
        HeaderSpec::new(HeaderNaming::default(), offset_x, offset_y).with_label("boot_logo.png")
    }

    fn table_entries(text: &str) -> Vec<u16> {
        let start = text.find("PROGMEM = {").unwrap();
        let end = text[start..].find("};").unwrap() + start;
        text[start..end]
            .split_whitespace()
            .filter_map(|tok| tok.strip_prefix("0x"))
            .map(|hex| u16::from_str_radix(hex.trim_end_matches(','), 16).unwrap())
            .collect()
    }

    #[test]
    fn test_layout_of_small_header() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 0, 255]));

        let text = ProgmemHeaderWriter.render(&image, &spec(119, 120)).unwrap();

        let expected = concat!(
            "// Image: boot_logo.png\n",
            "// Size: 2x1\n",
            "// Generated automatically - do not edit by hand\n",
            "#ifndef BOOT_LOGO_H\n",
            "#define BOOT_LOGO_H\n",
            "\n",
            "// BOOT_LOGO_DATA_AVAILABLE is defined first so it can be checked before use\n",
            "#define BOOT_LOGO_DATA_AVAILABLE\n",
            "\n",
            "const uint16_t boot_logo_data[] PROGMEM = {\n",
            "  0xF800, 0x001F, \n",
            "};\n",
            "const uint16_t boot_logo_data_width = 2;\n",
            "const uint16_t boot_logo_data_height = 1;\n",
            "const int16_t boot_logo_data_offset_x = 119;\n",
            "const int16_t boot_logo_data_offset_y = 120;\n",
            "\n",
            "#endif // BOOT_LOGO_H\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_entries_are_row_major() {
        let image = RgbImage::from_fn(5, 3, |x, y| Rgb([(x * 40) as u8, (y * 80) as u8, 0]));
        let text = ProgmemHeaderWriter.render(&image, &spec(0, 0)).unwrap();
        let entries = table_entries(&text);

        assert_eq!(entries.len(), 15);
        for y in 0..3u32 {
            for x in 0..5u32 {
                let idx = (y * 5 + x) as usize;
                assert_eq!(entries[idx], rgb565::pack((x * 40) as u8, (y * 80) as u8, 0));
            }
        }
        // one text line per source row
        let rows = text.lines().filter(|l| l.starts_with("  0x")).count();
        assert_eq!(rows, 3);
    }

    #[test]
    fn test_negative_offsets_are_emitted() {
        let image = RgbImage::new(1, 1);
        let text = ProgmemHeaderWriter.render(&image, &spec(-5, -1)).unwrap();

        assert!(text.contains("const int16_t boot_logo_data_offset_x = -5;"));
        assert!(text.contains("const int16_t boot_logo_data_offset_y = -1;"));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let image = RgbImage::new(0, 4);
        let result = ProgmemHeaderWriter.render(&image, &spec(0, 0));

        assert!(matches!(result, Err(ConversionError::InvalidDimensions(0, 4))));
    }

    #[test]
    fn test_write_header_to_sink() {
        let image = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        let mut sink = Vec::new();
        ProgmemHeaderWriter
            .write_header(&image, &spec(0, 0), &mut sink)
            .unwrap();

        let text = String::from_utf8(sink).unwrap();
        assert!(table_entries(&text).iter().all(|&p| p == 0xFFFF));
    }
}
