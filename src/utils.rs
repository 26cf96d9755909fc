/// Rounds to one decimal place.
///
/// Rounds the exact decimal expansion of `value`, so `10.65` (stored as
/// `10.6500000000000003...`) becomes `10.7` while `10.35` becomes `10.3`.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Converts a probability (`0.0..=1.0`) to a whole percentage, ties to even.
///
/// Out-of-range and NaN inputs are clamped into `0..=100`.
pub fn probability_to_percent(probability: f64) -> u8 {
    let percent = (probability * 100.0).round_ties_even();
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0) as u8
}

/// Replaces the value of the `appid` query parameter so URLs can be logged.
pub fn redact_api_key(url: &reqwest::Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "appid" { "REDACTED".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
