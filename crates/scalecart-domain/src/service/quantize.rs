//! Weight quantization

/// Captured weights are multiples of this many grams
pub const DEFAULT_QUANTUM_GRAMS: u32 = 5;

/// Round grams to the nearest multiple of `quantum` (ties to even)
///
/// Negative and non-finite inputs clamp to 0. A zero quantum is treated as 1.
pub fn quantize_grams(grams: f64, quantum: u32) -> u32 {
    if !grams.is_finite() || grams <= 0.0 {
        return 0;
    }
    let quantum = quantum.max(1);
    let steps = (grams / f64::from(quantum)).round_ties_even();
    let max_steps = f64::from(u32::MAX / quantum);
    (steps.min(max_steps) as u32) * quantum
}
