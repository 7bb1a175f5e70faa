//! End-of-run summary.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{DegradedType, ProcessingStats, SkipType};

/// Logs skipped-token and degraded-lookup counts, omitting zero counters.
pub fn print_processing_statistics(stats: &ProcessingStats) {
    let total_skipped = stats.total_skipped();
    if total_skipped > 0 {
        info!("Skipped tokens ({} total):", total_skipped);
        for skip in SkipType::iter() {
            let count = stats.get_skip_count(skip);
            if count > 0 {
                info!("   {}: {}", skip.as_str(), count);
            }
        }
    }

    let total_degraded = stats.total_degraded();
    if total_degraded > 0 {
        info!("Degraded lookups ({} total):", total_degraded);
        for kind in DegradedType::iter() {
            let count = stats.get_degraded_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}

/// One-line summary of the run.
pub fn summary_line(tokens: usize, rows: usize, skipped: usize) -> String {
    format!(
        "✅ Checked {} token{} ({} row{} written, {} skipped)",
        tokens,
        if tokens == 1 { "" } else { "s" },
        rows,
        if rows == 1 { "" } else { "s" },
        skipped
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_processing_statistics_empty() {
        print_processing_statistics(&ProcessingStats::new());
    }

    #[test]
    fn test_print_processing_statistics_with_counts() {
        let stats = ProcessingStats::new();
        stats.increment_skip(SkipType::UnresolvableDomain);
        stats.increment_degraded(DegradedType::ReputationUnavailable);
        print_processing_statistics(&stats);
    }

    #[test]
    fn test_summary_line_plurals() {
        assert_eq!(
            summary_line(1, 1, 0),
            "✅ Checked 1 token (1 row written, 0 skipped)"
        );
        assert_eq!(
            summary_line(3, 2, 1),
            "✅ Checked 3 tokens (2 rows written, 1 skipped)"
        );
    }
}
