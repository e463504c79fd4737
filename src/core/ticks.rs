//! 1-2-5 nice-number tick generation for linear domains.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Integer tick bounds plus increment.
///
/// A negative `increment` encodes `1 / -increment` so sub-unit steps stay exact.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    first: f64,
    last: f64,
    increment: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> TickSpec {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        first = (start * inc).round();
        last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        first = (start / inc).round();
        last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    TickSpec {
        first,
        last,
        increment,
    }
}

/// Roughly `count` evenly spaced round values covering `[start, stop]`.
///
/// Reversed bounds produce descending ticks. Non-finite input or a
/// non-positive count yields no ticks.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let spec = tick_spec(lo, hi, count as f64);
    if !(spec.last >= spec.first) {
        return Vec::new();
    }

    let n = (spec.last - spec.first + 1.0) as usize;
    let mut out: Vec<f64> = (0..n)
        .map(|offset| {
            let i = spec.first + offset as f64;
            if spec.increment < 0.0 {
                i / -spec.increment
            } else {
                i * spec.increment
            }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Signed tick increment; see [`TickSpec`] for the negative encoding.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).increment
}

/// Expands `[start, stop]` outwards to round tick values.
#[must_use]
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || count == 0 || start == stop {
        return (start, stop);
    }

    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut previous_step: Option<f64> = None;

    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    if reverse { (hi, lo) } else { (lo, hi) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_use_round_steps() {
        assert_eq!(ticks(0.0, 10.0, 10), vec![
            0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0
        ]);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn nice_domain_rounds_outwards() {
        assert_eq!(nice_domain(0.0, 212.4, 10), (0.0, 220.0));
        assert_eq!(nice_domain(0.3, 9.7, 10), (0.0, 10.0));
        assert_eq!(nice_domain(5.0, 5.0, 10), (5.0, 5.0));
    }
}
