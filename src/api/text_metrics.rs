/// Backend-independent text width estimate used for legend and tooltip layout.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.56,
            '.' | ',' | ':' => 0.28,
            ' ' => 0.28,
            'A'..='Z' => 0.67,
            '℉' | '$' => 0.62,
            _ => 0.52,
        }
    });
    units * font_size_px
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_grows_with_length_and_size() {
        let short = estimate_text_width_px("Oct", 11.0);
        let long = estimate_text_width_px("October", 11.0);
        assert!(long > short);
        assert!(estimate_text_width_px("Oct", 22.0) > short);
        assert_eq!(estimate_text_width_px("", 14.0), 0.0);
    }
}
