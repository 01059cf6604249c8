use std::fmt;

const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// Byte count formatted for humans, base 1024 (e.g. `1536` -> "1.5 KB").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanReadableByteSize(pub u64);

impl fmt::Display for HumanReadableByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 1024 {
            return write!(f, "{} bytes", self.0);
        }

        let mut value = self.0 as f64 / 1024.0;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        write!(f, "{:.1} {}", value, UNITS[unit])
    }
}
