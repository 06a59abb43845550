//! Human-readable formatting of sizes, throughput and latency
//!
//! Sizes follow the common "natural size" convention: one decimal place and a
//! magnitude suffix, with plain byte counts below the first unit.

use crate::types::SizeUnits;

const DECIMAL_SUFFIXES: &[&str] = &["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const BINARY_SUFFIXES: &[&str] = &["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];
const GNU_SUFFIXES: &[&str] = &["K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Formats a byte count with a magnitude suffix
///
/// # Examples
///
/// ```
/// use speedtest_report::output::size::natural_size;
/// use speedtest_report::types::SizeUnits;
///
/// assert_eq!(natural_size(1.0, SizeUnits::Decimal), "1 Byte");
/// assert_eq!(natural_size(512.0, SizeUnits::Decimal), "512 Bytes");
/// assert_eq!(natural_size(13107200.0, SizeUnits::Decimal), "13.1 MB");
/// assert_eq!(natural_size(13107200.0, SizeUnits::Binary), "12.5 MiB");
/// assert_eq!(natural_size(13107200.0, SizeUnits::Gnu), "12.5M");
/// ```
pub fn natural_size(bytes: f64, units: SizeUnits) -> String {
    let (base, suffixes) = match units {
        SizeUnits::Decimal => (1000.0_f64, DECIMAL_SUFFIXES),
        SizeUnits::Binary => (1024.0_f64, BINARY_SUFFIXES),
        SizeUnits::Gnu => (1024.0_f64, GNU_SUFFIXES),
    };
    let gnu = units == SizeUnits::Gnu;
    let magnitude = bytes.abs();

    if magnitude == 1.0 && !gnu {
        return format!("{} Byte", bytes as i64);
    }
    if magnitude < base {
        return if gnu {
            format!("{}B", bytes as i64)
        } else {
            format!("{} Bytes", bytes as i64)
        };
    }

    let mut unit = base;
    for suffix in suffixes {
        unit *= base;
        if magnitude < unit {
            return scaled(bytes, base, unit, suffix, gnu);
        }
    }

    // Beyond the largest suffix the value keeps growing in that unit
    let last = suffixes[suffixes.len() - 1];
    scaled(bytes, base, unit, last, gnu)
}

fn scaled(bytes: f64, base: f64, unit: f64, suffix: &str, gnu: bool) -> String {
    let value = base * bytes / unit;
    if gnu {
        format!("{:.1}{}", value, suffix)
    } else {
        format!("{:.1} {}", value, suffix)
    }
}

/// Formats a throughput given in bits per second as bytes per second
///
/// ```
/// use speedtest_report::output::size::format_rate;
/// use speedtest_report::types::SizeUnits;
///
/// assert_eq!(format_rate(104857600.0, SizeUnits::Decimal), "13.1 MB/s");
/// ```
pub fn format_rate(bits_per_second: f64, units: SizeUnits) -> String {
    format!("{}/s", natural_size(bits_per_second / 8.0, units))
}

/// Formats a latency in milliseconds.
///
/// Without a precision the value is shown as-is, keeping one decimal for
/// whole numbers (`15.0 ms`).
pub fn format_ping(ping_ms: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{:.*} ms", digits, ping_ms),
        None if ping_ms.is_finite() && ping_ms.fract() == 0.0 && ping_ms.abs() < 1e16 => {
            format!("{:.1} ms", ping_ms)
        }
        None => format!("{} ms", ping_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_sizes() {
        assert_eq!(natural_size(0.0, SizeUnits::Decimal), "0 Bytes");
        assert_eq!(natural_size(1.0, SizeUnits::Decimal), "1 Byte");
        assert_eq!(natural_size(999.9, SizeUnits::Decimal), "999 Bytes");
        assert_eq!(natural_size(1000.0, SizeUnits::Decimal), "1.0 kB");
        assert_eq!(natural_size(1500.0, SizeUnits::Decimal), "1.5 kB");
        assert_eq!(natural_size(13107200.0, SizeUnits::Decimal), "13.1 MB");
        assert_eq!(natural_size(3.0e9, SizeUnits::Decimal), "3.0 GB");
        assert_eq!(natural_size(1.0e12, SizeUnits::Decimal), "1.0 TB");
    }

    #[test]
    fn test_binary_sizes() {
        assert_eq!(natural_size(1023.0, SizeUnits::Binary), "1023 Bytes");
        assert_eq!(natural_size(1024.0, SizeUnits::Binary), "1.0 KiB");
        assert_eq!(natural_size(1536.0, SizeUnits::Binary), "1.5 KiB");
        assert_eq!(natural_size(1048576.0, SizeUnits::Binary), "1.0 MiB");
        assert_eq!(natural_size(1073741824.0, SizeUnits::Binary), "1.0 GiB");
    }

    #[test]
    fn test_gnu_sizes() {
        assert_eq!(natural_size(1.0, SizeUnits::Gnu), "1B");
        assert_eq!(natural_size(512.0, SizeUnits::Gnu), "512B");
        assert_eq!(natural_size(1536.0, SizeUnits::Gnu), "1.5K");
        assert_eq!(natural_size(1048576.0, SizeUnits::Gnu), "1.0M");
    }

    #[test]
    fn test_negative_and_huge_sizes() {
        assert_eq!(natural_size(-1.0, SizeUnits::Decimal), "-1 Byte");
        assert_eq!(natural_size(-2500.0, SizeUnits::Decimal), "-2.5 kB");
        assert_eq!(natural_size(1.0e24, SizeUnits::Decimal), "1.0 YB");
        assert_eq!(natural_size(5.0e27, SizeUnits::Decimal), "5000.0 YB");
    }

    #[test]
    fn test_format_rate_divides_by_eight() {
        assert_eq!(format_rate(104857600.0, SizeUnits::Decimal), "13.1 MB/s");
        assert_eq!(format_rate(8000.0, SizeUnits::Decimal), "1.0 kB/s");
        assert_eq!(format_rate(8.0, SizeUnits::Decimal), "1 Byte/s");
        assert_eq!(format_rate(0.0, SizeUnits::Decimal), "0 Bytes/s");
        assert_eq!(format_rate(83886080.0, SizeUnits::Binary), "10.0 MiB/s");
    }

    #[test]
    fn test_format_ping() {
        assert_eq!(format_ping(14.7, None), "14.7 ms");
        assert_eq!(format_ping(15.0, None), "15.0 ms");
        assert_eq!(format_ping(0.123456789, None), "0.123456789 ms");
        assert_eq!(format_ping(12.3456, Some(2)), "12.35 ms");
        assert_eq!(format_ping(12.0, Some(0)), "12 ms");
    }
}
