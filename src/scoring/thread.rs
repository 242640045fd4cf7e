//! Thread-only factors layered on top of the mean individual post score.

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|value| (value - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn spread(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

/// Stylistic continuity: posts of similar length and similar quality read as one
/// piece. `texts` and `totals` are the non-blank posts and their individual totals.
pub fn flow_coherence(texts: &[&str], totals: &[f64]) -> f64 {
    let lengths: Vec<f64> = texts
        .iter()
        .map(|text| text.chars().count() as f64)
        .collect();

    let mut score = 0.0;

    let length_range = spread(&lengths);
    if length_range <= 150.0 {
        score += 5.0;
    } else if length_range > 250.0 {
        score -= 5.0;
    }

    let score_range = spread(totals);
    if score_range <= 20.0 {
        score += 10.0;
    } else if score_range > 40.0 {
        score -= 10.0;
    }

    score
}

/// Momentum toward the end: compares the first third of the thread with the last
/// third. Threads shorter than three posts have no pacing.
pub fn pacing(totals: &[f64]) -> f64 {
    if totals.len() < 3 {
        return 0.0;
    }

    let third = totals.len() / 3;
    let opening = mean(&totals[..third]);
    let closing = mean(&totals[totals.len() - third..]);

    if closing > opening {
        10.0
    } else if closing < opening - 15.0 {
        -5.0
    } else {
        0.0
    }
}

/// Rewards threads whose posts are of even quality.
pub fn consistency(totals: &[f64]) -> f64 {
    let deviation = std_dev(totals);
    if deviation < 10.0 {
        10.0
    } else if deviation < 20.0 {
        5.0
    } else if deviation > 30.0 {
        -5.0
    } else {
        0.0
    }
}
