/// 計算平均分布的縮圖時間點
///
/// 第 i 個時間點為 `duration / (count + 1) * i`（i = 1..=count），
/// 不含影片的開頭與結尾。長度未知（0、負值、NaN、無限大）時回傳空列表。
#[must_use]
pub fn select_timestamps(duration: f64, count: usize) -> Vec<f64> {
    if !duration.is_finite() || duration <= 0.0 || count == 0 {
        return Vec::new();
    }

    let interval = duration / (count + 1) as f64;
    (1..=count).map(|i| interval * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_timestamps_over_thirty_seconds() {
        let timestamps = select_timestamps(30.0, 10);

        assert_eq!(timestamps.len(), 10);
        for (i, t) in timestamps.iter().enumerate() {
            let expected = 30.0 * (i + 1) as f64 / 11.0;
            assert!((t - expected).abs() < 1e-6, "第 {i} 個時間點 {t} != {expected}");
            assert!(*t > 0.0 && *t < 30.0);
        }
        for pair in timestamps.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_unknown_duration_yields_nothing() {
        assert!(select_timestamps(0.0, 10).is_empty());
        assert!(select_timestamps(-5.0, 10).is_empty());
        assert!(select_timestamps(f64::NAN, 10).is_empty());
        assert!(select_timestamps(f64::INFINITY, 10).is_empty());
    }

    #[test]
    fn test_zero_count() {
        assert!(select_timestamps(30.0, 0).is_empty());
    }

    #[test]
    fn test_single_timestamp_is_midpoint() {
        let timestamps = select_timestamps(8.0, 1);
        assert_eq!(timestamps.len(), 1);
        assert!((timestamps[0] - 4.0).abs() < 1e-9);
    }
}
