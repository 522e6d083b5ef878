use chrono::{DateTime, Utc};
use placerev_core::RawReview;

use super::*;

fn review(entity: &str, rating: u8, sentiment: Sentiment) -> ClassifiedReview {
    ClassifiedReview::new(
        RawReview {
            text: format!("{entity} {rating}"),
            rating,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            entity_name: entity.to_owned(),
        },
        sentiment,
        0.9,
    )
}

#[test]
fn two_entity_scenario() {
    let records = vec![
        review("Centro A", 5, Sentiment::Positive),
        review("Centro B", 1, Sentiment::Negative),
    ];

    let report = aggregate(&records);

    assert_eq!(report.average_rating_by_entity["Centro A"], 5.0);
    assert_eq!(report.average_rating_by_entity["Centro B"], 1.0);
    assert_eq!(
        report.top_rated_entity,
        Some(TopRated {
            name: "Centro A".to_owned(),
            average_rating: 5.0
        })
    );
    assert_eq!(report.positive_count_by_entity["Centro A"], 1);
    assert_eq!(report.positive_count_by_entity["Centro B"], 0);
    assert_eq!(
        report.most_positive_entity,
        Some(MostPositive {
            name: "Centro A".to_owned(),
            count: 1
        })
    );
}

#[test]
fn empty_records_produce_empty_report() {
    let report = aggregate(&[]);
    assert!(report.average_rating_by_entity.is_empty());
    assert!(report.top_rated_entity.is_none());
    assert!(report.positive_count_by_entity.is_empty());
    assert!(report.most_positive_entity.is_none());
}

#[test]
fn averages_round_half_up_to_two_decimals() {
    let mut records = Vec::new();
    // 5+5+5+5+4+4+4+1 = 33 over 8 reviews = 4.125
    for rating in [5, 5, 5, 5, 4, 4, 4, 1] {
        records.push(review("Centro A", rating, Sentiment::Neutral));
    }
    // 4+4+5 = 13 over 3 = 4.333...
    for rating in [4, 4, 5] {
        records.push(review("Centro B", rating, Sentiment::Neutral));
    }

    let report = aggregate(&records);

    assert_eq!(report.average_rating_by_entity["Centro A"], 4.13);
    assert_eq!(report.average_rating_by_entity["Centro B"], 4.33);
}

#[test]
fn top_rated_tie_goes_to_first_encountered_entity() {
    let records = vec![
        review("Centro B", 4, Sentiment::Neutral),
        review("Centro A", 4, Sentiment::Neutral),
        review("Centro C", 2, Sentiment::Neutral),
    ];

    let report = aggregate(&records);
    assert_eq!(report.top_rated_entity.unwrap().name, "Centro B");

    let swapped = vec![
        review("Centro A", 4, Sentiment::Neutral),
        review("Centro B", 4, Sentiment::Neutral),
        review("Centro C", 2, Sentiment::Neutral),
    ];
    assert_eq!(aggregate(&swapped).top_rated_entity.unwrap().name, "Centro A");
}

#[test]
fn most_positive_absent_without_positive_reviews() {
    let records = vec![
        review("Centro A", 3, Sentiment::Neutral),
        review("Centro B", 1, Sentiment::Negative),
    ];

    let report = aggregate(&records);

    assert!(report.most_positive_entity.is_none());
    assert_eq!(report.positive_count_by_entity.len(), 2);
    assert!(report.positive_count_by_entity.values().all(|&c| c == 0));
}

#[test]
fn most_positive_tie_goes_to_first_encountered_entity() {
    let records = vec![
        review("Centro B", 5, Sentiment::Positive),
        review("Centro A", 5, Sentiment::Positive),
    ];
    let report = aggregate(&records);
    assert_eq!(
        report.most_positive_entity,
        Some(MostPositive {
            name: "Centro B".to_owned(),
            count: 1
        })
    );
}

#[test]
fn sentiment_counts_cover_every_label() {
    let records = vec![
        review("Centro A", 5, Sentiment::Positive),
        review("Centro A", 3, Sentiment::Neutral),
        review("Centro A", 1, Sentiment::Negative),
        review("Centro A", 1, Sentiment::Negative),
    ];
    let counts = aggregate(&records).sentiment_counts_by_entity["Centro A"];
    assert_eq!(
        counts,
        SentimentCounts {
            positive: 1,
            neutral: 1,
            negative: 2
        }
    );
    assert_eq!(counts.total(), 4);
}

#[test]
fn zero_ratings_from_missing_fields_are_averaged() {
    let records = vec![
        review("Centro A", 0, Sentiment::Neutral),
        review("Centro A", 4, Sentiment::Positive),
    ];
    let report = aggregate(&records);
    assert_eq!(report.average_rating_by_entity["Centro A"], 2.0);
}

#[test]
fn grouping_preserving_permutation_yields_same_report() {
    let records = vec![
        review("Centro A", 5, Sentiment::Positive),
        review("Centro B", 3, Sentiment::Neutral),
        review("Centro A", 2, Sentiment::Negative),
        review("Centro C", 4, Sentiment::Positive),
        review("Centro B", 5, Sentiment::Positive),
    ];
    // Reverse the order within each entity and interleave differently,
    // keeping each entity's first-appearance rank (A, B, C).
    let permuted = vec![
        review("Centro A", 2, Sentiment::Negative),
        review("Centro A", 5, Sentiment::Positive),
        review("Centro B", 5, Sentiment::Positive),
        review("Centro C", 4, Sentiment::Positive),
        review("Centro B", 3, Sentiment::Neutral),
    ];

    assert_eq!(aggregate(&records), aggregate(&permuted));
}

#[test]
fn statistics_other_than_tie_break_ignore_order() {
    let records = vec![
        review("Centro A", 4, Sentiment::Positive),
        review("Centro B", 4, Sentiment::Positive),
    ];
    let reversed: Vec<_> = records.iter().rev().cloned().collect();

    let a = aggregate(&records);
    let b = aggregate(&reversed);

    assert_eq!(a.average_rating_by_entity, b.average_rating_by_entity);
    assert_eq!(a.positive_count_by_entity, b.positive_count_by_entity);
    assert_eq!(a.sentiment_counts_by_entity, b.sentiment_counts_by_entity);
    assert_ne!(a.top_rated_entity, b.top_rated_entity, "tie-break follows first occurrence");
}

#[test]
fn aggregate_is_idempotent_and_leaves_input_untouched() {
    let records = vec![
        review("Centro A", 5, Sentiment::Positive),
        review("Centro B", 2, Sentiment::Negative),
    ];
    let before = records.clone();

    let first = aggregate(&records);
    let second = aggregate(&records);

    assert_eq!(first, second);
    assert_eq!(records, before);
}

#[test]
fn report_serializes_with_camel_case_keys() {
    let records = vec![review("Centro A", 5, Sentiment::Positive)];
    let json = serde_json::to_value(aggregate(&records)).unwrap();
    assert_eq!(json["averageRatingByEntity"]["Centro A"], 5.0);
    assert_eq!(json["topRatedEntity"]["name"], "Centro A");
    assert_eq!(json["mostPositiveEntity"]["count"], 1);
}
