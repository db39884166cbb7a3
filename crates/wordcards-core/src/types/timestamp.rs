// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::NaiveDateTime;
use chrono::SubsecRound;

/// A timestamp without a timezone and millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(ndt: NaiveDateTime) -> Self {
        Self(ndt.trunc_subsecs(3))
    }

    /// The current timestamp in the user's local time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self::new(chrono::Local::now().naive_local())
    }

    /// Whole seconds from `self` until `later`, clamped at zero.
    pub fn seconds_until(self, later: Timestamp) -> u64 {
        (later.0 - self.0).num_seconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32, milli: u32) -> Timestamp {
        let ndt = NaiveDate::from_ymd_opt(2023, 10, 5)
            .and_then(|d| d.and_hms_milli_opt(h, m, s, milli))
            .unwrap();
        Timestamp::new(ndt)
    }

    #[test]
    fn test_truncates_to_milliseconds() {
        let ndt = NaiveDate::from_ymd_opt(2023, 10, 5)
            .and_then(|d| d.and_hms_micro_opt(14, 30, 15, 123_456))
            .unwrap();
        assert_eq!(Timestamp::new(ndt), at(14, 30, 15, 123));
    }

    #[test]
    fn test_seconds_until() {
        let start = at(14, 30, 15, 0);
        let end = at(14, 31, 0, 500);
        assert_eq!(start.seconds_until(end), 45);
        assert_eq!(end.seconds_until(start), 0);
    }
}
