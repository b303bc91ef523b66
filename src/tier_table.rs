// User tiers are half-open [min, max) over [0, 3200); problem grades are closed
// [min, max], one per grade 0..=30. Keep the two conventions separate.

use serde::{Deserialize, Serialize};

use crate::error::RatingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryConvention {
    /// `min_rating <= r < max_rating`
    HalfOpen,
    /// `min_rating <= r <= max_rating`
    Closed,
}

impl BoundaryConvention {
    fn contains(self, bucket: &TierBucket, rating: i32) -> bool {
        match self {
            BoundaryConvention::HalfOpen => {
                bucket.min_rating <= rating && rating < bucket.max_rating
            }
            BoundaryConvention::Closed => {
                bucket.min_rating <= rating && rating <= bucket.max_rating
            }
        }
    }

    // The min_rating the next bucket must start at for the ranges to touch.
    fn next_min(self, bucket: &TierBucket) -> Option<i32> {
        match self {
            BoundaryConvention::HalfOpen => Some(bucket.max_rating),
            BoundaryConvention::Closed => bucket.max_rating.checked_add(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBucket {
    pub name: String,
    pub level: Option<u8>,
    pub min_rating: i32,
    pub max_rating: i32,
    pub score: i32,
}

impl TierBucket {
    pub fn new(
        name: &str,
        level: Option<u8>,
        min_rating: i32,
        max_rating: i32,
        score: i32,
    ) -> Self {
        Self {
            name: name.to_string(),
            level,
            min_rating,
            max_rating,
            score,
        }
    }

    /// "Gold2", or just the name for buckets without a level.
    pub fn label(&self) -> String {
        match self.level {
            Some(level) => format!("{}{}", self.name, level),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    buckets: Vec<TierBucket>,
    convention: BoundaryConvention,
}

impl TierTable {
    /// Builds a table from buckets already sorted ascending by `min_rating`.
    ///
    /// Fails unless the buckets form one contiguous, non-overlapping run.
    pub fn new(
        buckets: Vec<TierBucket>,
        convention: BoundaryConvention,
    ) -> Result<Self, RatingError> {
        if buckets.is_empty() {
            return Err(RatingError::TierTableConfiguration("no buckets supplied".to_string()));
        }

        for b in &buckets {
            let non_empty = match convention {
                BoundaryConvention::HalfOpen => b.min_rating < b.max_rating,
                BoundaryConvention::Closed => b.min_rating <= b.max_rating,
            };
            if !non_empty {
                return Err(RatingError::TierTableConfiguration(format!(
                    "bucket {} has an empty range {}..{}",
                    b.label(), b.min_rating, b.max_rating
                )));
            }
        }

        for pair in buckets.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let expected = convention.next_min(prev);
            if expected != Some(next.min_rating) {
                // No representable next start means prev already reaches i32::MAX.
                let overlaps = expected.map_or(true, |e| next.min_rating < e);
                let problem = if overlaps { "overlaps" } else { "leaves a gap after" };
                return Err(RatingError::TierTableConfiguration(format!(
                    "bucket {} (starting at {}) {} bucket {} (ending at {})",
                    next.label(), next.min_rating, problem, prev.label(), prev.max_rating
                )));
            }
        }

        Ok(Self { buckets, convention })
    }

    /// First bucket whose range contains `rating`.
    pub fn lookup(&self, rating: i32) -> Result<&TierBucket, RatingError> {
        self.buckets
            .iter()
            .find(|b| self.convention.contains(b, rating))
            .ok_or(RatingError::RatingOutOfRange { rating })
    }

    pub fn tier_label(&self, rating: i32) -> Result<String, RatingError> {
        self.lookup(rating).map(TierBucket::label)
    }

    pub fn contains(&self, rating: i32) -> bool {
        self.lookup(rating).is_ok()
    }

    pub fn buckets(&self) -> &[TierBucket] {
        &self.buckets
    }

    pub fn convention(&self) -> BoundaryConvention {
        self.convention
    }

    pub fn min_rating(&self) -> i32 {
        self.buckets[0].min_rating
    }

    /// Upper bound as stored: exclusive for half-open tables, inclusive for closed ones.
    pub fn max_rating(&self) -> i32 {
        self.buckets[self.buckets.len() - 1].max_rating
    }

    /// The coarse user tier table over `[0, 3200)`.
    pub fn user_tiers() -> Result<Self, RatingError> {
        const LADDER: [(&str, [i32; 5]); 6] = [
            ("Bronze",   [30, 60, 90, 120, 150]),
            ("Silver",   [200, 300, 400, 500, 650]),
            ("Gold",     [800, 950, 1100, 1250, 1400]),
            ("Platinum", [1600, 1750, 1900, 2000, 2100]),
            ("Diamond",  [2200, 2300, 2400, 2500, 2600]),
            ("Ruby",     [2700, 2800, 2850, 2900, 2950]),
        ];
        const MASTER_MIN: i32 = 3000;
        const DOMAIN_END: i32 = 3200;

        let mut starts: Vec<(&str, Option<u8>, i32)> = vec![("Unrated", None, 0)];
        for (name, mins) in LADDER {
            for (i, min) in mins.into_iter().enumerate() {
                starts.push((name, Some(5 - i as u8), min));
            }
        }
        starts.push(("Master", None, MASTER_MIN));

        let mut buckets = Vec::with_capacity(starts.len());
        for (idx, &(name, level, min)) in starts.iter().enumerate() {
            let max = starts.get(idx + 1).map_or(DOMAIN_END, |next| next.2);
            // User tier scores are a display ordinal only; nothing sums them.
            buckets.push(TierBucket::new(name, level, min, max, idx as i32));
        }

        Self::new(buckets, BoundaryConvention::HalfOpen)
    }

    /// Problem grades 0 through 30, one closed bucket per grade scoring its own value.
    pub fn problem_grades() -> Result<Self, RatingError> {
        const NAMES: [&str; 6] = ["Bronze", "Silver", "Gold", "Platinum", "Diamond", "Ruby"];

        let mut buckets = vec![TierBucket::new("Unrated", None, 0, 0, 0)];
        for grade in 1..=30 {
            let idx = (grade - 1) as usize;
            let level = 5 - (idx % 5) as u8;
            buckets.push(TierBucket::new(NAMES[idx / 5], Some(level), grade, grade, grade));
        }

        Self::new(buckets, BoundaryConvention::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_open(ranges: &[(i32, i32)]) -> Result<TierTable, RatingError> {
        let buckets = ranges
            .iter()
            .enumerate()
            .map(|(i, &(min, max))| TierBucket::new("T", Some(i as u8), min, max, i as i32))
            .collect();
        TierTable::new(buckets, BoundaryConvention::HalfOpen)
    }

    #[test]
    fn user_tiers_cover_domain() {
        let table = TierTable::user_tiers().unwrap();
        assert_eq!(table.buckets().len(), 32);
        assert_eq!(table.min_rating(), 0);
        assert_eq!(table.max_rating(), 3200);
        for r in 0..3200 {
            assert!(table.contains(r), "rating {r} not covered");
        }
        assert_eq!(table.lookup(-1), Err(RatingError::RatingOutOfRange { rating: -1 }));
        assert_eq!(table.lookup(3200), Err(RatingError::RatingOutOfRange { rating: 3200 }));
    }

    #[test]
    fn user_tier_labels() {
        let table = TierTable::user_tiers().unwrap();
        assert_eq!(table.tier_label(0).unwrap(), "Unrated");
        assert_eq!(table.tier_label(29).unwrap(), "Unrated");
        assert_eq!(table.tier_label(30).unwrap(), "Bronze5");
        assert_eq!(table.tier_label(1300).unwrap(), "Gold2");
        assert_eq!(table.tier_label(2999).unwrap(), "Ruby1");
        assert_eq!(table.tier_label(3000).unwrap(), "Master");
    }

    #[test]
    fn problem_grades_are_closed_single_values() {
        let table = TierTable::problem_grades().unwrap();
        assert_eq!(table.convention(), BoundaryConvention::Closed);
        assert_eq!(table.lookup(0).unwrap().label(), "Unrated");
        assert_eq!(table.lookup(1).unwrap().label(), "Bronze5");
        assert_eq!(table.lookup(15).unwrap().label(), "Gold1");
        assert_eq!(table.lookup(30).unwrap().label(), "Ruby1");
        for g in 0..=30 {
            assert_eq!(table.lookup(g).unwrap().score, g);
        }
        assert!(table.lookup(31).is_err());
        assert!(table.lookup(-1).is_err());
    }

    #[test]
    fn rejects_gap() {
        let err = half_open(&[(0, 10), (11, 20)]).unwrap_err();
        assert!(matches!(err, RatingError::TierTableConfiguration(msg) if msg.contains("gap")));
    }

    #[test]
    fn rejects_overlap() {
        let err = half_open(&[(0, 10), (5, 20)]).unwrap_err();
        assert!(matches!(
            err,
            RatingError::TierTableConfiguration(msg) if msg.contains("overlaps")
        ));
    }

    #[test]
    fn rejects_empty_and_degenerate() {
        assert!(half_open(&[]).is_err());
        assert!(half_open(&[(0, 0)]).is_err());
        let single = vec![TierBucket::new("A", None, 3, 3, 1)];
        let closed = TierTable::new(single, BoundaryConvention::Closed);
        assert!(closed.is_ok());
    }

    #[test]
    fn closed_bucket_ending_at_max_reports_overlap() {
        let buckets = vec![
            TierBucket::new("A", None, 0, i32::MAX, 1),
            TierBucket::new("B", None, 10, 20, 2),
        ];
        let err = TierTable::new(buckets, BoundaryConvention::Closed).unwrap_err();
        assert!(matches!(
            err,
            RatingError::TierTableConfiguration(msg) if msg.contains("overlaps")
        ));
    }

    #[test]
    fn closed_tables_need_adjacent_integers() {
        let buckets = vec![
            TierBucket::new("A", None, 0, 4, 1),
            TierBucket::new("B", None, 4, 9, 2),
        ];
        assert!(TierTable::new(buckets, BoundaryConvention::Closed).is_err());

        let buckets = vec![
            TierBucket::new("A", None, 0, 4, 1),
            TierBucket::new("B", None, 5, 9, 2),
        ];
        let table = TierTable::new(buckets, BoundaryConvention::Closed).unwrap();
        assert_eq!(table.lookup(4).unwrap().name, "A");
        assert_eq!(table.lookup(9).unwrap().name, "B");
    }
}
