//! Per-entity statistics over a classified record set.
//!
//! [`aggregate`] is pure: it reads the records and never mutates them.
//! All maps are keyed by entity name and ordered by name, so they do not
//! depend on record order. The only order-sensitive rule is the tie-break
//! for the best-of selections, which favours the entity whose first record
//! appears earliest.

use std::collections::{BTreeMap, HashMap};

use placerev_core::{ClassifiedReview, Sentiment};
use rust_decimal::prelude::*;
use serde::Serialize;

/// Entity with the highest average rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRated {
    pub name: String,
    pub average_rating: f64,
}

/// Entity with the most positive reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostPositive {
    pub name: String,
    pub count: usize,
}

/// Review counts per sentiment label for one entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    /// Mean rating per entity, rounded half-up to 2 decimals.
    pub average_rating_by_entity: BTreeMap<String, f64>,
    /// `None` only for an empty record set.
    pub top_rated_entity: Option<TopRated>,
    /// Positive review count per entity; entities without any are present with `0`.
    pub positive_count_by_entity: BTreeMap<String, usize>,
    /// `None` when no entity has a positive review.
    pub most_positive_entity: Option<MostPositive>,
    pub sentiment_counts_by_entity: BTreeMap<String, SentimentCounts>,
}

struct Group {
    first_index: usize,
    rating_sum: u64,
    count: u64,
    sentiments: SentimentCounts,
}

impl Group {
    fn rounded_mean(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.rating_sum) / Decimal::from(self.count))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Computes the aggregate report for `records`.
#[must_use]
pub fn aggregate(records: &[ClassifiedReview]) -> AggregateReport {
    let mut groups: HashMap<&str, Group> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        let group = groups.entry(record.entity_name()).or_insert(Group {
            first_index: index,
            rating_sum: 0,
            count: 0,
            sentiments: SentimentCounts::default(),
        });
        group.rating_sum += u64::from(record.rating());
        group.count += 1;
        group.sentiments.record(record.sentiment);
    }

    let means: HashMap<&str, Decimal> = groups
        .iter()
        .map(|(name, g)| (*name, g.rounded_mean()))
        .collect();

    let average_rating_by_entity = means
        .iter()
        .map(|(name, mean)| ((*name).to_owned(), mean.to_f64().unwrap_or(0.0)))
        .collect();

    let top_rated_entity = pick_first_max(&groups, |name, _| Some(means[name]))
        .map(|(name, mean)| TopRated {
            name: name.to_owned(),
            average_rating: mean.to_f64().unwrap_or(0.0),
        });

    let positive_count_by_entity = groups
        .iter()
        .map(|(name, g)| ((*name).to_owned(), g.sentiments.positive))
        .collect();

    let most_positive_entity = pick_first_max(&groups, |_, g| {
        (g.sentiments.positive > 0).then_some(g.sentiments.positive)
    })
    .map(|(name, count)| MostPositive {
        name: name.to_owned(),
        count,
    });

    let sentiment_counts_by_entity = groups
        .iter()
        .map(|(name, g)| ((*name).to_owned(), g.sentiments))
        .collect();

    AggregateReport {
        average_rating_by_entity,
        top_rated_entity,
        positive_count_by_entity,
        most_positive_entity,
        sentiment_counts_by_entity,
    }
}

/// Returns the group with the largest key, breaking ties by earliest first
/// record. Groups for which `key` returns `None` are not eligible.
fn pick_first_max<'a, K, F>(groups: &HashMap<&'a str, Group>, key: F) -> Option<(&'a str, K)>
where
    K: PartialOrd + Copy,
    F: Fn(&str, &Group) -> Option<K>,
{
    let mut best: Option<(&'a str, K, usize)> = None;
    for (&name, group) in groups {
        let Some(k) = key(name, group) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((_, best_k, best_first)) => {
                k > best_k || (k == best_k && group.first_index < best_first)
            }
        };
        if better {
            best = Some((name, k, group.first_index));
        }
    }
    best.map(|(name, k, _)| (name, k))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
#[path = "aggregate_test.rs"]
mod tests;
