use std::collections::BTreeMap;

/// Report sizes whose averages can be recovered. Later sizes win on a shared
/// rounded key.
pub const SUPPORTED_REPORT_SIZES: [u32; 2] = [13, 14];

const MIN_MARK: u32 = 1;
const MAX_MARK: u32 = 7;
const DECIMAL_TOLERANCE: f64 = 1e-6;

/// Maps two-decimal report averages back to the exact averages that produce
/// them.
///
/// Every achievable `sum / size` for 13 and 14 marked attributes is
/// enumerated up front, so a value transcribed from a rounded record can be
/// expanded before it feeds the incremental profile updates.
#[derive(Debug, Clone)]
pub struct UnroundingLookup {
    by_hundredths: BTreeMap<i64, f64>,
}

impl Default for UnroundingLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl UnroundingLookup {
    pub fn new() -> Self {
        let mut by_hundredths = BTreeMap::new();

        for size in SUPPORTED_REPORT_SIZES {
            for sum in (size * MIN_MARK)..=(size * MAX_MARK) {
                let exact = f64::from(sum) / f64::from(size);
                by_hundredths.insert(hundredths(exact), exact);
            }
        }

        Self { by_hundredths }
    }

    /// Returns the exact average behind `rounded`, or `rounded` unchanged
    /// when it is not a rounded 13/14-mark average.
    pub fn unround(&self, rounded: f64) -> f64 {
        self.exact(rounded).unwrap_or(rounded)
    }

    /// Exact 13/14-mark average that rounds to `rounded`, if there is one.
    pub fn exact(&self, rounded: f64) -> Option<f64> {
        if !rounded.is_finite() {
            return None;
        }

        let scaled = rounded * 100.0;
        if (scaled - scaled.round()).abs() > DECIMAL_TOLERANCE {
            return None;
        }

        self.by_hundredths.get(&hundredths(rounded)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_hundredths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hundredths.is_empty()
    }
}

fn hundredths(value: f64) -> i64 {
    (value * 100.0).round() as i64
}
