/// Discount of `price` relative to `original`, as a whole percentage.
///
/// Zero when there is no original price or it is not above the current one.
pub fn discount_percent(price: f64, original: Option<f64>) -> u32 {
    match original {
        Some(orig) if orig > price && orig > 0.0 => {
            (((orig - price) / orig) * 100.0).round() as u32
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount() {
        assert_eq!(discount_percent(75.0, Some(100.0)), 25);
        assert_eq!(discount_percent(2.0, Some(3.0)), 33);
        assert_eq!(discount_percent(100.0, Some(100.0)), 0);
        assert_eq!(discount_percent(120.0, Some(100.0)), 0);
        assert_eq!(discount_percent(10.0, None), 0);
    }
}
