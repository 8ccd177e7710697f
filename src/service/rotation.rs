use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Manual navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Next,
    #[serde(alias = "prev")]
    Previous,
}

impl Step {
    fn delta(self) -> i64 {
        match self {
            Step::Next => 1,
            Step::Previous => -1,
        }
    }
}

/// Clamp `index` into `[0, count - 1]`. `None` when there is nothing to show.
pub fn clamp_index(index: usize, count: usize) -> Option<usize> {
    (count > 0).then(|| index.min(count - 1))
}

/// Cyclic position over the live banner set.
///
/// The live set is recomputed on every refresh and may shrink as dates roll
/// over, so every operation takes the current `count` and clamps first.
/// Stored in the session between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerRotation {
    index: usize,
    last_advance: DateTime<Utc>,
}

impl BannerRotation {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            index: 0,
            last_advance: started_at,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_advance(&self) -> DateTime<Utc> {
        self.last_advance
    }

    pub fn clamp(&mut self, count: usize) -> Option<usize> {
        let idx = clamp_index(self.index, count)?;
        self.index = idx;
        Some(idx)
    }

    /// Move one banner forward or back, wrapping at both ends.
    pub fn advance(&mut self, step: Step, count: usize) -> Option<usize> {
        let idx = self.clamp(count)?;
        let n = count as i64;
        self.index = (idx as i64 + step.delta()).rem_euclid(n) as usize;
        Some(self.index)
    }

    /// Polling tick, called once per refresh. Advances at most once, however
    /// long it has been since the last advance. Returns whether it advanced.
    pub fn auto_advance(&mut self, now: DateTime<Utc>, count: usize, interval: Duration) -> bool {
        if count == 0 || now - self.last_advance <= interval {
            return false;
        }
        let idx = clamp_index(self.index, count).unwrap_or(0);
        self.index = (idx + 1) % count;
        self.last_advance = now;
        true
    }
}
