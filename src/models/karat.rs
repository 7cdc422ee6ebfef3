/// A purity grade offered by the storefront
///
/// Static configuration, not runtime state: the grade set is fixed for
/// the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Karat {
    /// Display label ("18k")
    pub label: &'static str,
    /// Karat value, 9-24
    pub value: u32,
    /// Fraction of pure gold by mass (value / 24)
    pub purity: f64,
}

/// The ordered grade set, lowest purity first.
pub const KARATS: [Karat; 7] = [
    Karat { label: "9k", value: 9, purity: 9.0 / 24.0 },
    Karat { label: "10k", value: 10, purity: 10.0 / 24.0 },
    Karat { label: "14k", value: 14, purity: 14.0 / 24.0 },
    Karat { label: "18k", value: 18, purity: 18.0 / 24.0 },
    Karat { label: "21k", value: 21, purity: 21.0 / 24.0 },
    Karat { label: "22k", value: 22, purity: 22.0 / 24.0 },
    Karat { label: "24k", value: 24, purity: 24.0 / 24.0 },
];
