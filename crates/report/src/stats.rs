use extract::{DocumentMentions, TypeCounts};
use serde::{Deserialize, Serialize};

/// Run-wide counters. Owned by the aggregator, threaded through the batch loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub total_files: usize,
    pub processed: usize,
    pub skipped_no_text: usize,
    pub total_mentions_raw: usize,
    pub total_mentions_deduped: usize,
    pub by_type: TypeCounts,
}

impl RunStats {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            ..Self::default()
        }
    }

    pub fn record_skipped(&mut self) {
        self.skipped_no_text += 1;
    }

    pub fn record_processed(&mut self, extraction: &DocumentMentions) {
        self.processed += 1;
        self.total_mentions_raw += extraction.raw_count;
        self.total_mentions_deduped += extraction.deduped_count();
        self.by_type.add(&extraction.counts_by_type);
    }

    /// Every input document is either processed or skipped.
    pub fn is_balanced(&self) -> bool {
        self.processed + self.skipped_no_text == self.total_files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::EntityType;

    #[test]
    fn test_accumulation() {
        let mut counts = TypeCounts::default();
        counts.increment(EntityType::Person);
        counts.increment(EntityType::Organization);

        let extraction = DocumentMentions {
            mentions: Vec::new(),
            counts_by_type: counts,
            raw_count: 3,
        };

        let mut stats = RunStats::new(3);
        stats.record_processed(&extraction);
        stats.record_processed(&extraction);
        stats.record_skipped();

        assert_eq!(stats.processed, 2);
        assert_eq!(stats.skipped_no_text, 1);
        assert_eq!(stats.total_mentions_raw, 6);
        assert_eq!(stats.by_type.get(EntityType::Person), 2);
        assert!(stats.is_balanced());
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(RunStats::new(4)).unwrap();

        assert_eq!(json["totalFiles"], 4);
        assert_eq!(json["skippedNoText"], 0);
        assert_eq!(json["totalMentionsDeduped"], 0);
        assert_eq!(json["byType"]["ORGANIZATION"], 0);
    }
}
