use hud_core::ValueFormat;

/// Two decimals below 10, one below 100, whole numbers above.
pub fn precision_round(n: f64) -> String {
    if n < 10.0 {
        format!("{n:.2}")
    } else if n < 100.0 {
        format!("{n:.1}")
    } else {
        format!("{:.0}", n.round())
    }
}

/// Format a count with SI suffixes (e.g. `"2.50M"`).
pub fn format_count(count: f64) -> String {
    const UNITS: [&str; 5] = ["K", "M", "B", "T", "Q"];

    let mut value = count;
    let mut unit = "";
    for next in UNITS {
        if value <= 1000.0 {
            break;
        }
        value /= 1000.0;
        unit = next;
    }
    format!("{}{unit}", precision_round(value))
}

/// Format a byte count as a human-readable string (e.g. `"1.50KB"`).
pub fn format_data_size_bytes(bytes: f64) -> String {
    const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

    if bytes == 0.0 {
        return "0B".to_string();
    }

    let mut value = bytes;
    let mut unit = "B";
    for next in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{}{unit}", precision_round(value))
}

/// Render `value` the way a metric of this format is displayed.
pub fn format_value(format: ValueFormat, value: f64) -> String {
    match format {
        ValueFormat::Integer => format!("{:.0}", value.round()),
        ValueFormat::Decimal => precision_round(value),
        ValueFormat::Count   => format_count(value),
        ValueFormat::Bytes   => format_data_size_bytes(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_steps() {
        assert_eq!(precision_round(3.14159), "3.14");
        assert_eq!(precision_round(42.26), "42.3");
        assert_eq!(precision_round(123.6), "124");
    }

    #[test]
    fn count_suffixes() {
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1_500.0), "1.50K");
        assert_eq!(format_count(2_500_000.0), "2.50M");
        assert_eq!(format_count(7e18), "7000Q");
    }

    #[test]
    fn data_size_zero() {
        assert_eq!(format_data_size_bytes(0.0), "0B");
    }

    #[test]
    fn data_size_units() {
        assert_eq!(format_data_size_bytes(512.0), "512B");
        assert_eq!(format_data_size_bytes(1_536.0), "1.50KB");
        assert_eq!(format_data_size_bytes(1_073_741_824.0), "1.00GB");
    }

    #[test]
    fn value_formats() {
        assert_eq!(format_value(ValueFormat::Integer, 6.6), "7");
        assert_eq!(format_value(ValueFormat::Decimal, 1.0), "1.00");
        assert_eq!(format_value(ValueFormat::Bytes, 2_048.0), "2.00KB");
    }
}
