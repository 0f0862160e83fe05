use crate::analytics::ChannelCounts;

/// Otsu's threshold over a 256-bin histogram.
///
/// Values `<= threshold` form the background class.
pub(crate) fn otsu_threshold(lane: &ChannelCounts) -> u8 {
    let histogram = &lane.counts;
    let total = lane.total() as f64;
    let mut weighted_sum = 0.0_f64;
    for (index, count) in histogram.iter().enumerate() {
        weighted_sum += (index as f64) * (*count as f64);
    }

    let mut sum_background = 0.0_f64;
    let mut weight_background = 0.0_f64;
    let mut best_variance = -1.0_f64;
    let mut best_threshold = 0usize;

    for (index, count) in histogram.iter().enumerate() {
        weight_background += *count as f64;
        if weight_background == 0.0 {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground == 0.0 {
            break;
        }

        sum_background += (index as f64) * (*count as f64);
        let mean_background = sum_background / weight_background;
        let mean_foreground = (weighted_sum - sum_background) / weight_foreground;
        let between =
            weight_background * weight_foreground * (mean_background - mean_foreground).powi(2);
        if between > best_variance {
            best_variance = between;
            best_threshold = index;
        }
    }

    best_threshold as u8
}
