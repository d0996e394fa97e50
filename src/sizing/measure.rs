//! Conversion of samples into pixel widths.
//!
//! Glyph measurement itself is delegated to an injected [`TextMeasurer`];
//! [`WidthMeasurer`] decides which text to measure, which font to use and how
//! the results combine.

use super::sampling::RawSample;
use crate::model::ColumnSpec;
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

/// Font description used to measure text.
///
/// Must match the font of the rendered cell or header; a mismatch produces
/// truncated or oversized columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f64,
}

impl FontSpec {
    /// Font from family and size.
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }

    /// Terminal cell grid: one pixel per cell.
    pub fn terminal() -> Self {
        Self::new("monospace", 1.0)
    }
}

/// Text measurement backend.
pub trait TextMeasurer {
    /// Width of `text` rendered in `font`, in pixels.
    fn measure(&self, text: &str, font: &FontSpec) -> f64;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        (**self).measure(text, font)
    }
}

/// Fixed-advance measurement from Unicode display width.
///
/// Wide (CJK) characters count as two cells, combining marks as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance of one cell as a fraction of the font size.
    pub advance_em: f64,
}

impl MonospaceMeasurer {
    /// Measurer with the given advance.
    pub fn new(advance_em: f64) -> Self {
        Self { advance_em }
    }

    /// One cell per unit of font size; with [`FontSpec::terminal`] widths are cell counts.
    pub fn terminal_cells() -> Self {
        Self::new(1.0)
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        UnicodeWidthStr::width(text) as f64 * font.size_px * self.advance_em
    }
}

/// Live layout metrics of an attached grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutContext {
    /// Font of body cells.
    pub cell_font: FontSpec,
    /// Font of header cells.
    pub header_font: FontSpec,
    /// Horizontal padding and border of a cell.
    pub cell_padding_px: u32,
    /// Horizontal padding, border and sort/menu affordances of a header.
    pub header_padding_px: u32,
}

impl LayoutContext {
    /// Same font for cells and headers, no padding.
    pub fn new(font: FontSpec) -> Self {
        Self {
            cell_font: font.clone(),
            header_font: font,
            cell_padding_px: 0,
            header_padding_px: 0,
        }
    }

    /// One cell per pixel, no padding.
    pub fn terminal() -> Self {
        Self::new(FontSpec::terminal())
    }

    /// Set cell and header padding.
    pub fn with_padding(mut self, cell_padding_px: u32, header_padding_px: u32) -> Self {
        self.cell_padding_px = cell_padding_px;
        self.header_padding_px = header_padding_px;
        self
    }
}

/// Result of measuring every sample of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Widest sample plus the safety pad.
    pub widest_px: u32,
    /// Rendered header width, when the header was sampled.
    pub header_px: Option<u32>,
    /// Widest value sample without the pad, when any value was sampled.
    pub content_px: Option<u32>,
}

/// Measures samples with the injected backend and the live layout metrics.
pub struct WidthMeasurer<'a> {
    backend: &'a dyn TextMeasurer,
    context: &'a LayoutContext,
    padding_px: u32,
}

impl<'a> WidthMeasurer<'a> {
    /// Measurer over `backend` with the live metrics and the safety pad.
    pub fn new(backend: &'a dyn TextMeasurer, context: &'a LayoutContext, padding_px: u32) -> Self {
        Self {
            backend,
            context,
            padding_px,
        }
    }

    /// Text a value sample renders as.
    ///
    /// Highest precedence first: the formatter override, the column's
    /// formatter, the raw value. A formatter that yields empty text falls back
    /// to the raw value.
    pub fn display_text<'s>(sample: &RawSample<'s>, column: &ColumnSpec) -> Cow<'s, str> {
        match *sample {
            RawSample::Header(text) => Cow::Borrowed(text),
            RawSample::Value { value, row } => {
                let formatter = column
                    .auto_size
                    .formatter_override
                    .as_ref()
                    .or(column.formatter.as_ref());
                match formatter.map(|f| f.format(value, row)) {
                    Some(text) if !text.is_empty() => Cow::Owned(text),
                    _ => Cow::Owned(value.to_display_string()),
                }
            }
        }
    }

    /// Rendered width of one sample, rounded up to whole pixels.
    pub fn measure(&self, sample: &RawSample<'_>, column: &ColumnSpec) -> u32 {
        let text = Self::display_text(sample, column);
        let (font, padding) = match sample {
            RawSample::Header(_) => (&self.context.header_font, self.context.header_padding_px),
            RawSample::Value { .. } => (&self.context.cell_font, self.context.cell_padding_px),
        };
        let raw = if text.is_empty() {
            0.0
        } else {
            self.backend.measure(&text, font)
        };
        to_whole_px(raw).saturating_add(padding)
    }

    /// Widest sample plus the safety pad, or `None` if there were no samples.
    pub fn measure_max<'s, I>(&self, samples: I, column: &ColumnSpec) -> Option<Measurement>
    where
        I: IntoIterator<Item = RawSample<'s>>,
    {
        let mut widest: Option<u32> = None;
        let mut header_px = None;
        let mut content_px: Option<u32> = None;

        for sample in samples {
            let width = self.measure(&sample, column);
            match sample {
                RawSample::Header(_) => header_px = Some(width),
                RawSample::Value { .. } => content_px = content_px.max(Some(width)),
            }
            widest = widest.max(Some(width));
        }

        widest.map(|widest| Measurement {
            widest_px: widest.saturating_add(self.padding_px),
            header_px,
            content_px,
        })
    }

    /// Rendered width of the column header.
    pub fn header_width(&self, column: &ColumnSpec) -> u32 {
        self.measure(&RawSample::Header(column.name.as_str()), column)
    }
}

fn to_whole_px(raw: f64) -> u32 {
    if raw.is_finite() && raw > 0.0 {
        raw.ceil().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, ColumnId, Row, ValueFormatter};
    use std::collections::HashMap;

    /// Measurer with fixed widths per text; unknown text is 10px per char.
    struct TableMeasurer(HashMap<&'static str, f64>);

    impl TextMeasurer for TableMeasurer {
        fn measure(&self, text: &str, _font: &FontSpec) -> f64 {
            self.0
                .get(text)
                .copied()
                .unwrap_or(text.chars().count() as f64 * 10.0)
        }
    }

    fn col() -> ColumnSpec {
        ColumnSpec::new(ColumnId::new("name").unwrap())
    }

    #[test]
    fn monospace_counts_display_cells() {
        let m = MonospaceMeasurer::terminal_cells();
        let font = FontSpec::terminal();
        assert_eq!(m.measure("abc", &font), 3.0);
        assert_eq!(m.measure("日本", &font), 4.0);
        assert_eq!(m.measure("", &font), 0.0);
    }

    #[test]
    fn monospace_scales_with_font_size() {
        let m = MonospaceMeasurer::new(0.5);
        assert_eq!(m.measure("abcd", &FontSpec::new("mono", 16.0)), 32.0);
    }

    #[test]
    fn display_text_prefers_override_then_formatter_then_raw() {
        let value = CellValue::Int(7);
        let sample = RawSample::Value { value: &value, row: None };

        let plain = col();
        assert_eq!(WidthMeasurer::display_text(&sample, &plain), "7");

        let formatted = col().with_formatter(ValueFormatter::new(|v, _| format!("#{}", v)));
        assert_eq!(WidthMeasurer::display_text(&sample, &formatted), "#7");

        let mut overridden = formatted.clone();
        overridden.auto_size.formatter_override =
            Some(ValueFormatter::new(|v, _| format!("$${}", v)));
        assert_eq!(WidthMeasurer::display_text(&sample, &overridden), "$$7");
    }

    #[test]
    fn empty_formatter_output_falls_back_to_raw_text() {
        let value = CellValue::from("raw");
        let sample = RawSample::Value { value: &value, row: None };
        let column = col().with_formatter(ValueFormatter::new(|_, _| String::new()));
        assert_eq!(WidthMeasurer::display_text(&sample, &column), "raw");
    }

    #[test]
    fn formatter_sees_row() {
        let row = Row::new().with("name", "x").with("unit", "kg");
        let value = CellValue::from("x");
        let sample = RawSample::Value { value: &value, row: Some(&row) };
        let column = col().with_formatter(ValueFormatter::new(|v, row| {
            let unit = row.and_then(|r| r.get("unit")).map(|u| u.to_string());
            format!("{} {}", v, unit.unwrap_or_default())
        }));
        assert_eq!(WidthMeasurer::display_text(&sample, &column), "x kg");
    }

    #[test]
    fn measure_max_adds_pad_once_and_reports_header() {
        let backend = TableMeasurer(HashMap::from([("Al", 16.0), ("Alexandria", 80.0), ("Name", 40.0)]));
        let ctx = LayoutContext::new(FontSpec::new("sans", 13.0));
        let measurer = WidthMeasurer::new(&backend, &ctx, 1);
        let al = CellValue::from("Al");
        let alex = CellValue::from("Alexandria");
        let samples = vec![
            RawSample::Value { value: &al, row: None },
            RawSample::Value { value: &alex, row: None },
            RawSample::Header("Name"),
        ];

        let m = measurer.measure_max(samples, &col()).expect("has samples");
        assert_eq!(m.widest_px, 81);
        assert_eq!(m.header_px, Some(40));
        assert_eq!(m.content_px, Some(80));
    }

    #[test]
    fn wide_header_does_not_count_as_content() {
        let backend = TableMeasurer(HashMap::new());
        let ctx = LayoutContext::new(FontSpec::terminal());
        let measurer = WidthMeasurer::new(&backend, &ctx, 1);
        let v = CellValue::from("ab");
        let column = col().with_name("Longer header");

        let m = measurer
            .measure_max(
                [RawSample::Value { value: &v, row: None }, RawSample::Header("Longer header")],
                &column,
            )
            .unwrap();
        assert_eq!(m.widest_px, 131);
        assert_eq!(m.content_px, Some(20));
        assert_eq!(measurer.header_width(&column), 130);
    }

    #[test]
    fn measure_rounds_fractional_widths_up() {
        let backend = TableMeasurer(HashMap::from([("x", 7.2)]));
        let ctx = LayoutContext::new(FontSpec::new("sans", 13.0));
        let measurer = WidthMeasurer::new(&backend, &ctx, 0);
        let x = CellValue::from("x");
        assert_eq!(measurer.measure(&RawSample::Value { value: &x, row: None }, &col()), 8);
    }

    #[test]
    fn header_and_cell_use_their_own_font_and_padding() {
        let backend = MonospaceMeasurer::terminal_cells();
        let ctx = LayoutContext {
            cell_font: FontSpec::new("mono", 1.0),
            header_font: FontSpec::new("mono", 2.0),
            cell_padding_px: 1,
            header_padding_px: 3,
        };
        let measurer = WidthMeasurer::new(&backend, &ctx, 0);
        let v = CellValue::from("abc");
        assert_eq!(measurer.measure(&RawSample::Value { value: &v, row: None }, &col()), 4);
        assert_eq!(measurer.measure(&RawSample::Header("abc"), &col()), 9);
    }

    #[test]
    fn no_samples_measures_nothing() {
        let backend = MonospaceMeasurer::default();
        let ctx = LayoutContext::terminal();
        let measurer = WidthMeasurer::new(&backend, &ctx, 1);
        assert_eq!(measurer.measure_max(std::iter::empty(), &col()), None);
    }

    #[test]
    fn bogus_backend_output_is_zero() {
        assert_eq!(to_whole_px(f64::NAN), 0);
        assert_eq!(to_whole_px(-3.0), 0);
        assert_eq!(to_whole_px(2.0), 2);
    }
}
