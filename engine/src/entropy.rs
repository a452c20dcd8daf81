/// Shannon entropy in bits of the UTF-8 bytes of `text`.
pub fn shannon_entropy(text: &str) -> f64 {
    shannon_entropy_bytes(text.as_bytes())
}

/// Shannon entropy in bits of the byte-value distribution of `data`.
///
/// Returns exactly `0.0` for empty input. The result lies in `[0, 8]`.
pub fn shannon_entropy_bytes(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut frequency = [0usize; 256];
    for &b in data {
        frequency[b as usize] += 1;
    }

    let len = data.len() as f64;
    frequency
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy_bytes(&[]), 0.0);
    }

    #[test]
    fn test_single_symbol_is_zero() {
        assert_eq!(shannon_entropy("a"), 0.0);
        assert_eq!(shannon_entropy("aaaaaaaa"), 0.0);
    }

    #[test]
    fn test_two_equiprobable_symbols() {
        assert!((shannon_entropy("abab") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_bytes_reach_eight_bits() {
        let all: Vec<u8> = (0..=255).collect();
        assert!((shannon_entropy_bytes(&all) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_counts_bytes_not_chars() {
        // "é" is two UTF-8 bytes, each appearing once.
        assert!((shannon_entropy("é") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_utf8_is_measured() {
        assert!((shannon_entropy_bytes(&[0xff, 0xfe, 0xff, 0xfe]) - 1.0).abs() < 1e-12);
    }
}
