//! Per-tag performance breakdown.

use std::collections::BTreeMap;

use crate::model::Bet;

use super::stats::{flat_units, totals};

/// Umbrella tags present on nearly every market; they carry no signal and are
/// always excluded from the breakdown.
const STRUCTURAL_TAGS: [&str; 2] = ["Games", "Sports"];

/// Aggregated performance of one tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSummary {
    pub tag: String,
    pub profit: f64,
    pub volume: f64,
    pub roi: Option<f64>,
    /// Flat-staking profit in units.
    pub units: f64,
    pub bets: usize,
}

/// Explodes bets by tag and aggregates per tag.
///
/// A bet carrying several tags counts once under each. Tags with fewer than
/// `min_bets` bets are dropped, as are the structural tags and any in
/// `exclude`. Result is sorted by ROI descending; tags without an ROI sort
/// last.
pub fn tag_analysis(bets: &[Bet], min_bets: usize, exclude: &[String]) -> Vec<TagSummary> {
    let mut per_tag: BTreeMap<&str, Vec<&Bet>> = BTreeMap::new();
    for bet in bets {
        for tag in &bet.tags {
            let tag = tag.trim();
            if tag.is_empty()
                || STRUCTURAL_TAGS.contains(&tag)
                || exclude.iter().any(|e| e == tag)
            {
                continue;
            }
            per_tag.entry(tag).or_default().push(bet);
        }
    }

    let mut result: Vec<TagSummary> = per_tag
        .into_iter()
        .filter(|(_, bucket)| bucket.len() >= min_bets)
        .map(|(tag, bucket)| {
            let t = totals(bucket.iter().copied());
            TagSummary {
                tag: tag.to_string(),
                profit: t.profit,
                volume: t.volume,
                roi: t.roi,
                units: flat_units(bucket.iter().copied()),
                bets: bucket.len(),
            }
        })
        .collect();

    result.sort_by(|a, b| {
        let (a, b) = (a.roi.unwrap_or(f64::NEG_INFINITY), b.roi.unwrap_or(f64::NEG_INFINITY));
        b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bet(tags: &[&str], profit: f64, staked: f64) -> Bet {
        Bet {
            end_date: Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
            title: "event".into(),
            outcome: "Yes".into(),
            slug: String::new(),
            total_bought: staked * 2.0,
            avg_price: 0.5,
            cur_price: None,
            realized_pnl: profit,
            cash_pnl: None,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            condition_id: String::new(),
            asset: String::new(),
            start_time: None,
            closing_price: None,
        }
    }

    #[test]
    fn structural_tags_are_dropped() {
        let bets = vec![bet(&["Sports", "NBA"], 10.0, 50.0)];
        let summary = tag_analysis(&bets, 1, &[]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].tag, "NBA");
    }

    #[test]
    fn min_bets_threshold_filters_thin_tags() {
        let bets = vec![
            bet(&["NBA"], 10.0, 50.0),
            bet(&["NBA"], -5.0, 50.0),
            bet(&["NHL"], 3.0, 50.0),
        ];
        let summary = tag_analysis(&bets, 2, &[]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].tag, "NBA");
        assert_eq!(summary[0].bets, 2);
        assert_eq!(summary[0].profit, 5.0);
    }

    #[test]
    fn multi_tag_bets_count_under_each_tag() {
        let bets = vec![bet(&["NBA", "Playoffs"], 10.0, 50.0)];
        let summary = tag_analysis(&bets, 1, &[]);
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn sorted_by_roi_descending() {
        let bets = vec![
            bet(&["Low"], 1.0, 50.0),
            bet(&["High"], 25.0, 50.0),
        ];
        let summary = tag_analysis(&bets, 1, &[]);
        assert_eq!(summary[0].tag, "High");
        assert_eq!(summary[1].tag, "Low");
    }

    #[test]
    fn caller_exclusions_apply() {
        let bets = vec![bet(&["NBA", "Politics"], 10.0, 50.0)];
        let summary = tag_analysis(&bets, 1, &["Politics".to_string()]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].tag, "NBA");
    }
}
