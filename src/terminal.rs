use hud_core::{Metric, Sparkline};
use hud_metrics::format::format_value;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Prints one line per redraw: title, current value and a block-character
/// sparkline of the most recent samples.
#[derive(Debug, Clone)]
pub struct TerminalSparkline {
    width: usize,
}

impl TerminalSparkline {
    pub fn new(width: usize) -> Self {
        Self { width: width.max(1) }
    }
}

impl Sparkline for TerminalSparkline {
    fn draw(&mut self, metric: Metric, values: &[f64]) {
        let current = values
            .last()
            .map(|v| format_value(metric.value_format(), *v))
            .unwrap_or_else(|| "-".to_string());
        let start = values.len().saturating_sub(self.width);
        let line = sparkline(&values[start..], metric.range_floor());
        println!("{:<20} {:>10}  {line}", metric.title(), current);
    }
}

/// Scale `values` onto the bar glyphs. `floor` pins the bottom of the range.
fn sparkline(values: &[f64], floor: Option<f64>) -> String {
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = floor.unwrap_or_else(|| values.iter().copied().fold(f64::MAX, f64::min));
    let span = max - min;

    values
        .iter()
        .map(|v| {
            if span <= 0.0 || !span.is_finite() {
                return BARS[0];
            }
            let level = ((v - min) / span * (BARS.len() - 1) as f64).round();
            BARS[level.clamp(0.0, (BARS.len() - 1) as f64) as usize]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_between_min_and_max() {
        assert_eq!(sparkline(&[0.0, 7.0], None), "▁█");
        assert_eq!(sparkline(&[10.0, 20.0, 30.0], None), "▁▅█");
    }

    #[test]
    fn floor_pins_range_bottom() {
        assert_eq!(sparkline(&[7.0, 7.0], Some(0.0)), "██");
    }

    #[test]
    fn flat_or_empty_series() {
        assert_eq!(sparkline(&[3.0, 3.0], None), "▁▁");
        assert_eq!(sparkline(&[], None), "");
    }
}
