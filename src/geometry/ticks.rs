/// Y-axis tick values for an axis running from 0 to `max`.
///
/// Small integer maxima get one tick per integer. Anything else gets five
/// evenly spaced rounded ticks plus 0 and the exact max, deduplicated and
/// ascending. No tick lies above `max`.
pub fn axis_ticks(max: f64) -> Vec<f64> {
    let max = if max.is_finite() && max > 0.0 { max } else { 1.0 };

    if max.fract() == 0.0 && max <= 10.0 {
        return (0..=max as u64).map(|tick| tick as f64).collect();
    }

    let mut ticks: Vec<f64> = (0..5).map(|i| (max * i as f64 / 4.0).round()).collect();
    ticks.push(0.0);
    ticks.push(max);
    ticks.retain(|tick| *tick <= max);
    ticks.sort_by(|a, b| a.total_cmp(b));
    ticks.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    ticks
}
