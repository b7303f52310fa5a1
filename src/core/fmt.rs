/// Float formatting helpers for CSS values.
///
/// Rust's core float-to-decimal formatting has had wasm-facing panics in some
/// toolchain/browser combinations. These helpers never call `format!` on a
/// float: finite values are scaled and rounded into an `i64` first, then the
/// integer parts are printed.

#[inline]
pub fn fmt_f64_fixed(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        // CSS has no NaN/Inf lengths; zero is the least surprising fallback.
        return "0".to_string();
    }

    let decimals = decimals.min(9);
    let scale_i64 = 10_i64.checked_pow(decimals as u32).unwrap_or(1_i64);
    let scale_f = scale_i64 as f64;

    let scaled = (v * scale_f).round();
    if !scaled.is_finite() || scaled.abs() > (i64::MAX as f64) {
        return "0".to_string();
    }

    let scaled_i = scaled as i64;
    let negative = scaled_i < 0;
    let abs_i = scaled_i.abs();
    let int_part = abs_i / scale_i64;
    let frac_part = abs_i % scale_i64;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&int_part.to_string());

    if decimals > 0 {
        out.push('.');
        let frac_str = frac_part.to_string();
        for _ in 0..decimals.saturating_sub(frac_str.len()) {
            out.push('0');
        }
        out.push_str(&frac_str);
    }

    out
}

/// `12.5` → `"12.50px"`.
#[inline]
pub fn px(v: f64) -> String {
    let mut s = fmt_f64_fixed(v, 2);
    s.push_str("px");
    s
}

/// `-30` → `"-30.00deg"`.
#[inline]
pub fn deg(v: f64) -> String {
    let mut s = fmt_f64_fixed(v, 2);
    s.push_str("deg");
    s
}
