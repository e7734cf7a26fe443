use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::error::AppError;

/// Prefix for money amounts
const CURRENCY: &str = "R$";

#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberFormat {
    group_sep: char,
    decimal_sep: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            group_sep: ',',
            decimal_sep: '.',
        }
    }
}

impl NumberFormat {
    pub(crate) fn from_locale(locale: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = locale else {
            return Ok(NumberFormat::default());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(NumberFormat::default());
        }
        let base = trimmed
            .split(['-', '_'])
            .next()
            .unwrap_or(trimmed)
            .to_ascii_lowercase();

        let format = match base.as_str() {
            "pt" | "de" | "es" | "it" => NumberFormat {
                group_sep: '.',
                decimal_sep: ',',
            },
            "fr" | "ru" => NumberFormat {
                group_sep: ' ',
                decimal_sep: ',',
            },
            "en" | "zh" => NumberFormat::default(),
            _ => {
                return Err(AppError::UnsupportedLocale {
                    input: trimmed.to_string(),
                });
            }
        };

        Ok(format)
    }

    fn localize_decimal(self, s: &str) -> String {
        if self.decimal_sep == '.' {
            s.to_string()
        } else {
            s.replace('.', &self.decimal_sep.to_string())
        }
    }
}

/// Insert the group separator every three digits from the right
fn group_digits(digits: &str, sep: char) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

pub(super) fn format_number(n: i64, format: NumberFormat) -> String {
    let sign = if n < 0 { "-" } else { "" };
    let grouped = group_digits(&n.unsigned_abs().to_string(), format.group_sep);
    format!("{sign}{grouped}")
}

/// Grouped integer part and `decimals` fraction digits
pub(super) fn format_decimal(value: f64, decimals: usize, format: NumberFormat) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let grouped = group_digits(int_part, format.group_sep);
    // "-0.00" reads oddly; only signal negatives that survive rounding
    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{frac_part}", format.decimal_sep)
    }
}

/// Money with two decimals, e.g. `R$ 1,234.50`
pub(super) fn format_currency(value: f64, format: NumberFormat) -> String {
    format!("{CURRENCY} {}", format_decimal(value, 2, format))
}

/// Format number in compact form (K, M, B suffixes)
pub(super) fn format_compact(value: f64, format: NumberFormat) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1_000_000_000.0 {
        (abs / 1_000_000_000.0, "B")
    } else if abs >= 1_000_000.0 {
        (abs / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (abs / 1_000.0, "K")
    } else {
        return format!("{sign}{}", format_decimal(abs, 2, format));
    };
    let s = format.localize_decimal(&format!("{scaled:.1}"));
    format!("{sign}{s}{suffix}")
}

/// Money in compact form, e.g. `R$ 12.3K`
pub(super) fn format_currency_compact(value: f64, format: NumberFormat) -> String {
    format!("{CURRENCY} {}", format_compact(value, format))
}

/// Whole numbers without fraction digits, anything else with one
pub(super) fn format_amount(value: f64, format: NumberFormat) -> String {
    if value.fract() == 0.0 {
        format_decimal(value, 0, format)
    } else {
        format_decimal(value, 1, format)
    }
}

/// Kilograms, with tonnes appended from 1000 kg up
pub(super) fn format_weight(kg: f64, format: NumberFormat) -> String {
    let base = format!("{}kg", format_amount(kg, format));
    if kg >= 1000.0 {
        format!("{base} - {}t", format_decimal(kg / 1000.0, 1, format))
    } else {
        base
    }
}

/// Minutes as `1h 05m`, or `45m` under an hour
pub(super) fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() || minutes < 0.0 {
        return "-".to_string();
    }
    let total = minutes.round() as u64;
    let (h, m) = (total / 60, total % 60);
    if h == 0 {
        format!("{m}m")
    } else {
        format!("{h}h {m:02}m")
    }
}

pub(super) fn format_percent(value: f64, format: NumberFormat) -> String {
    format!("{}%", format_decimal(value, 1, format))
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt() -> NumberFormat {
        NumberFormat::from_locale(Some("pt-BR")).unwrap()
    }

    #[test]
    fn format_number_with_commas() {
        let fmt = NumberFormat::default();
        assert_eq!(format_number(0, fmt), "0");
        assert_eq!(format_number(999, fmt), "999");
        assert_eq!(format_number(1000, fmt), "1,000");
        assert_eq!(format_number(1_234_567, fmt), "1,234,567");
        assert_eq!(format_number(-1234, fmt), "-1,234");
    }

    #[test]
    fn format_decimal_groups_and_rounds() {
        let fmt = NumberFormat::default();
        assert_eq!(format_decimal(4200.75, 2, fmt), "4,200.75");
        assert_eq!(format_decimal(0.006, 2, fmt), "0.01");
        assert_eq!(format_decimal(-1234.5, 1, fmt), "-1,234.5");
        assert_eq!(format_decimal(-0.001, 2, fmt), "0.00");
        assert_eq!(format_decimal(12.0, 0, fmt), "12");
        assert_eq!(format_decimal(f64::NAN, 2, fmt), "N/A");
    }

    #[test]
    fn format_decimal_beyond_i64_keeps_digits() {
        let fmt = NumberFormat::default();
        assert_eq!(format_decimal(1e19, 0, fmt), "10,000,000,000,000,000,000");
        assert_eq!(format_decimal(-2e20, 1, pt()), "-200.000.000.000.000.000.000,0");
    }

    #[test]
    fn format_currency_pt_br() {
        assert_eq!(format_currency(1850.5, pt()), "R$ 1.850,50");
        assert_eq!(format_currency(1850.5, NumberFormat::default()), "R$ 1,850.50");
    }

    #[test]
    fn format_compact_units() {
        let fmt = NumberFormat::default();
        assert_eq!(format_compact(999.0, fmt), "999.00");
        assert_eq!(format_compact(1_000.0, fmt), "1.0K");
        assert_eq!(format_compact(1_500.0, fmt), "1.5K");
        assert_eq!(format_compact(2_500_000.0, fmt), "2.5M");
        assert_eq!(format_compact(1_000_000_000.0, fmt), "1.0B");
        assert_eq!(format_compact(1_500.0, pt()), "1,5K");
        assert_eq!(format_currency_compact(12_345.0, fmt), "R$ 12.3K");
    }

    #[test]
    fn format_weight_adds_tonnes() {
        let fmt = NumberFormat::default();
        assert_eq!(format_weight(85.0, fmt), "85kg");
        assert_eq!(format_weight(12.5, fmt), "12.5kg");
        assert_eq!(format_weight(1500.0, fmt), "1,500kg - 1.5t");
    }

    #[test]
    fn format_minutes_hours_and_minutes() {
        assert_eq!(format_minutes(45.0), "45m");
        assert_eq!(format_minutes(65.0), "1h 05m");
        assert_eq!(format_minutes(180.0), "3h 00m");
        assert_eq!(format_minutes(f64::NAN), "-");
    }

    #[test]
    fn format_percent_one_decimal() {
        assert_eq!(format_percent(7.7, NumberFormat::default()), "7.7%");
        assert_eq!(format_percent(33.333, pt()), "33,3%");
    }

    #[test]
    fn from_locale_none_or_empty_returns_default() {
        let fmt = NumberFormat::from_locale(None).unwrap();
        assert_eq!(format_number(1000, fmt), "1,000");
        let fmt = NumberFormat::from_locale(Some("")).unwrap();
        assert_eq!(format_number(1000, fmt), "1,000");
    }

    #[test]
    fn from_locale_variants() {
        assert_eq!(format_number(1000, pt()), "1.000");
        let fr = NumberFormat::from_locale(Some("fr")).unwrap();
        assert_eq!(format_number(1000, fr), "1 000");
        let de = NumberFormat::from_locale(Some("de_DE")).unwrap();
        assert_eq!(format_number(1000, de), "1.000");
    }

    #[test]
    fn from_locale_unsupported_returns_error() {
        assert!(NumberFormat::from_locale(Some("ja")).is_err());
    }
}
