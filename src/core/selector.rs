use crate::core::location::{matches_interest, matches_location, LocationMatchMode};
use crate::models::{Event, InterestSet, UserLocationPreference};

/// Priority bucket of an event relative to one user, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriorityTier {
    BothMatch,
    LocationMatch,
    InterestMatch,
    NoMatch,
}

impl PriorityTier {
    /// All tiers in drain order
    pub const ALL: [PriorityTier; 4] = [
        PriorityTier::BothMatch,
        PriorityTier::LocationMatch,
        PriorityTier::InterestMatch,
        PriorityTier::NoMatch,
    ];

    pub fn classify(location_match: bool, interest_match: bool) -> Self {
        match (location_match, interest_match) {
            (true, true) => PriorityTier::BothMatch,
            (true, false) => PriorityTier::LocationMatch,
            (false, true) => PriorityTier::InterestMatch,
            (false, false) => PriorityTier::NoMatch,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Events grouped by tier; input order is kept inside each bucket
#[derive(Debug, Default)]
pub struct TierBuckets<'a> {
    buckets: [Vec<&'a Event>; 4],
}

impl<'a> TierBuckets<'a> {
    pub fn tier(&self, tier: PriorityTier) -> &[&'a Event] {
        &self.buckets[tier.index()]
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, tier: PriorityTier, event: &'a Event) {
        self.buckets[tier.index()].push(event);
    }

    /// Append whole tiers in priority order until at least `min_count` events are gathered
    ///
    /// The first tier is always taken. A `min_count` of zero still keeps going
    /// while nothing has been gathered, so an empty `BothMatch` tier does not
    /// yield an empty feed.
    pub fn drain(self, min_count: usize) -> Vec<&'a Event> {
        let floor = min_count.max(1);
        let mut drained = Vec::with_capacity(self.len());

        for bucket in self.buckets {
            if drained.len() >= floor {
                break;
            }
            drained.extend(bucket);
        }

        drained
    }
}

/// Builds the featured events feed
///
/// # Pipeline Stages
/// 1. Partition candidates into priority tiers
/// 2. Drain whole tiers until the minimum pool size is reached
/// 3. Rank the pool by registration count (stable on ties)
/// 4. Truncate to the requested limit
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredSelector {
    mode: LocationMatchMode,
}

impl TieredSelector {
    pub fn new(mode: LocationMatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> LocationMatchMode {
        self.mode
    }

    /// Tier of a single event for the given preference and interests
    pub fn tier_of(
        &self,
        event: &Event,
        preference: Option<&UserLocationPreference>,
        interests: Option<&InterestSet>,
    ) -> PriorityTier {
        let location_match = preference.is_some_and(|p| matches_location(event, p, self.mode));
        let interest_match = matches_interest(event, interests);

        PriorityTier::classify(location_match, interest_match)
    }

    /// Place every event into exactly one tier
    pub fn partition<'a>(
        &self,
        events: &'a [Event],
        preference: Option<&UserLocationPreference>,
        interests: Option<&InterestSet>,
    ) -> TierBuckets<'a> {
        let mut buckets = TierBuckets::default();
        for event in events {
            buckets.push(self.tier_of(event, preference, interests), event);
        }
        buckets
    }

    /// Select and rank events for a user
    ///
    /// # Arguments
    /// * `events` - Upcoming events, already filtered by start date
    /// * `preference` - The user's home location, if known
    /// * `interests` - The user's interest categories, if any
    /// * `min_count` - Soft floor on the ranking pool size
    /// * `limit` - Maximum number of events to return
    ///
    /// # Returns
    /// Borrowed events ordered by registration count, best first
    pub fn select_ranked<'a>(
        &self,
        events: &'a [Event],
        preference: Option<&UserLocationPreference>,
        interests: Option<&InterestSet>,
        min_count: usize,
        limit: usize,
    ) -> Vec<&'a Event> {
        if limit == 0 || events.is_empty() {
            return Vec::new();
        }

        let buckets = self.partition(events, preference, interests);

        tracing::trace!(
            both = buckets.tier(PriorityTier::BothMatch).len(),
            location = buckets.tier(PriorityTier::LocationMatch).len(),
            interest = buckets.tier(PriorityTier::InterestMatch).len(),
            none = buckets.tier(PriorityTier::NoMatch).len(),
            "Partitioned candidates into tiers"
        );

        let mut ranked = buckets.drain(min_count);

        // sort_by is stable, ties keep tier order then input order
        ranked.sort_by(|a, b| b.registration_count.cmp(&a.registration_count));
        ranked.truncate(limit);

        ranked
    }
}
