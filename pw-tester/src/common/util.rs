use chrono::Utc;

/// Split a comma-separated argument, dropping blanks.
pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// UTC timestamp stamped on every report.
pub fn run_stamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_skips_empty() {
        assert_eq!(
            split_csv(" purchase-success, ,network-failure,"),
            vec!["purchase-success", "network-failure"]
        );
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn run_stamp_is_utc() {
        assert!(run_stamp().ends_with('Z'));
    }
}
