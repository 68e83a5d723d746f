//! Performance metrics over a daily-return series
//!
//! Statistics are plain f64: these numbers feed reports, not order sizing.
//! Ratios that are undefined for the input (no variance, no drawdown) come
//! back as NaN rather than a made-up zero.

/// Trading days per year used for annualization
pub const ANN_DAYS: f64 = 252.0;

/// Headline performance statistics
#[derive(Debug, Clone)]
pub struct Perf {
    /// Annualized mean return
    pub ann_ret: f64,
    /// Annualized volatility
    pub ann_vol: f64,
    pub sharpe: f64,
    pub sortino: f64,
    /// Maximum drawdown (negative fraction)
    pub max_dd: f64,
    pub calmar: f64,
    /// Fraction of non-zero days that were positive
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    /// Non-zero return days, a proxy for trade count
    pub n_trades: usize,
}

impl Perf {
    fn zeroed() -> Self {
        Self {
            ann_ret: 0.0,
            ann_vol: 0.0,
            sharpe: f64::NAN,
            sortino: f64::NAN,
            max_dd: 0.0,
            calmar: f64::NAN,
            win_rate: 0.0,
            avg_win: 0.0,
            avg_loss: 0.0,
            n_trades: 0,
        }
    }
}

/// Cumulative growth of 1 unit through the return series.
pub fn cum_returns(returns: &[f64]) -> Vec<f64> {
    let mut cum = Vec::with_capacity(returns.len());
    let mut acc = 1.0;
    for r in returns {
        acc *= 1.0 + r;
        cum.push(acc);
    }
    cum
}

/// Drawdown from the running peak, per point (0 at new highs, negative below).
pub fn drawdown(cum: &[f64]) -> Vec<f64> {
    let mut peak = f64::MIN;
    cum.iter()
        .map(|&c| {
            peak = peak.max(c);
            c / peak - 1.0
        })
        .collect()
}

/// Sample standard deviation (n-1 denominator); NaN below two samples.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Compute headline performance statistics from daily returns.
pub fn performance(returns: &[f64]) -> Perf {
    let r: Vec<f64> = returns.iter().copied().filter(|v| v.is_finite()).collect();
    if r.is_empty() {
        return Perf::zeroed();
    }

    let mu = r.iter().sum::<f64>() / r.len() as f64 * ANN_DAYS;
    let vol = std_dev(&r) * ANN_DAYS.sqrt();
    let sharpe = if vol > 0.0 { mu / vol } else { f64::NAN };

    let neg: Vec<f64> = r.iter().copied().filter(|v| *v < 0.0).collect();
    let downside = if neg.len() > 1 {
        std_dev(&neg) * ANN_DAYS.sqrt()
    } else {
        f64::NAN
    };
    let sortino = if downside > 0.0 { mu / downside } else { f64::NAN };

    let dd = drawdown(&cum_returns(&r));
    let max_dd = dd.iter().copied().fold(0.0_f64, f64::min);
    let calmar = if max_dd < 0.0 { mu / max_dd.abs() } else { f64::NAN };

    let nz: Vec<f64> = r.iter().copied().filter(|v| *v != 0.0).collect();
    let wins: Vec<f64> = nz.iter().copied().filter(|v| *v > 0.0).collect();
    let losses: Vec<f64> = nz.iter().copied().filter(|v| *v < 0.0).collect();
    let win_rate = if nz.is_empty() {
        0.0
    } else {
        wins.len() as f64 / nz.len() as f64
    };
    let avg = |v: &[f64]| {
        if v.is_empty() {
            0.0
        } else {
            v.iter().sum::<f64>() / v.len() as f64
        }
    };

    Perf {
        ann_ret: mu,
        ann_vol: vol,
        sharpe,
        sortino,
        max_dd,
        calmar,
        win_rate,
        avg_win: avg(&wins),
        avg_loss: avg(&losses),
        n_trades: nz.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_returns_zeroed() {
        let perf = performance(&[]);
        assert_eq!(perf.ann_ret, 0.0);
        assert_eq!(perf.n_trades, 0);
        assert!(perf.sharpe.is_nan());
    }

    #[test]
    fn test_cum_returns_compound() {
        let cum = cum_returns(&[0.10, -0.50]);
        assert!((cum[0] - 1.10).abs() < 1e-12);
        assert!((cum[1] - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_drawdown_from_peak() {
        let dd = drawdown(&[1.0, 1.2, 0.9, 1.3]);
        assert_eq!(dd[0], 0.0);
        assert_eq!(dd[1], 0.0);
        assert!((dd[2] - (0.9 / 1.2 - 1.0)).abs() < 1e-12);
        assert_eq!(dd[3], 0.0);
    }

    #[test]
    fn test_win_loss_accounting() {
        let perf = performance(&[0.02, 0.0, -0.01, 0.04, -0.03]);
        assert_eq!(perf.n_trades, 4);
        assert!((perf.win_rate - 0.5).abs() < 1e-12);
        assert!((perf.avg_win - 0.03).abs() < 1e-12);
        assert!((perf.avg_loss - (-0.02)).abs() < 1e-12);
    }

    #[test]
    fn test_positive_series_has_positive_sharpe() {
        let returns: Vec<f64> = (0..100).map(|i| 0.001 + 0.0001 * (i % 7) as f64).collect();
        let perf = performance(&returns);
        assert!(perf.ann_ret > 0.0);
        assert!(perf.sharpe > 0.0);
        assert_eq!(perf.max_dd, 0.0);
        assert!(perf.calmar.is_nan());
    }

    #[test]
    fn test_max_dd_negative_on_losses() {
        let perf = performance(&[0.05, -0.20, 0.01]);
        assert!(perf.max_dd < 0.0);
        assert!(perf.calmar.is_finite() || perf.calmar.is_nan());
    }
}
