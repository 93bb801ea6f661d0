//! Price-ordered ranking of catalog results.
//!
//! Results are sorted by an explicit bottom-up merge so the ordering rules
//! stay visible: ascending price, items without a usable price treated as
//! infinitely expensive, and equal prices keeping their original relative
//! order. When both merge heads lack a price the merge stops comparing and
//! appends the remainders as-is, left side first, so unpriced listings
//! always trail the priced ones in their original order.

use std::collections::VecDeque;

use crate::catalog::CatalogItem;

struct PricedItem {
    price: Option<f64>,
    item: CatalogItem,
}

/// Sorts catalog results by ascending price, unpriced items last.
pub fn sort_by_price(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let priced = items
        .into_iter()
        .map(|item| PricedItem {
            price: item.price_value(),
            item,
        })
        .collect();
    merge_sort(priced).into_iter().map(|p| p.item).collect()
}

/// Takes the leading run of `sorted` results priced at or below
/// `target_price`. The scan stops at the first result that exceeds the
/// target or carries no price, which on sorted input means everything
/// after it is out of reach too.
pub fn results_at_or_below(sorted: &[CatalogItem], target_price: f64) -> Vec<CatalogItem> {
    let mut hits = Vec::new();
    for item in sorted {
        match item.price_value() {
            Some(price) if price <= target_price => hits.push(item.clone()),
            _ => break,
        }
    }
    hits
}

fn merge_sort(items: Vec<PricedItem>) -> Vec<PricedItem> {
    if items.len() <= 1 {
        return items;
    }
    let mid = items.len() / 2;
    let mut left = items;
    let right = left.split_off(mid);
    merge(merge_sort(left), merge_sort(right))
}

fn merge(left: Vec<PricedItem>, right: Vec<PricedItem>) -> Vec<PricedItem> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = VecDeque::from(left);
    let mut right = VecDeque::from(right);

    while let (Some(l), Some(r)) = (left.front(), right.front()) {
        let take_left = match (l.price, r.price) {
            (None, None) => break,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            // Ties take the left head, which keeps the sort stable.
            (Some(lp), Some(rp)) => lp <= rp,
        };
        let next = if take_left {
            left.pop_front()
        } else {
            right.pop_front()
        };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemPrice;

    fn item(title: &str, price: Option<f64>) -> CatalogItem {
        CatalogItem {
            title: title.to_string(),
            price: price.map(ItemPrice::Plain),
            ..CatalogItem::default()
        }
    }

    fn titles(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn sorts_ascending_with_unpriced_last() {
        let sorted = sort_by_price(vec![
            item("no-price-1", None),
            item("mid", Some(120.0)),
            item("no-price-2", None),
            item("cheap", Some(80.0)),
        ]);
        assert_eq!(titles(&sorted), ["cheap", "mid", "no-price-1", "no-price-2"]);
    }

    #[test]
    fn equal_prices_keep_original_order() {
        let sorted = sort_by_price(vec![
            item("expensive", Some(200.0)),
            item("first", Some(100.0)),
            item("second", Some(100.0)),
        ]);
        assert_eq!(titles(&sorted), ["first", "second", "expensive"]);
    }

    #[test]
    fn single_and_empty_inputs_pass_through() {
        assert!(sort_by_price(Vec::new()).is_empty());
        let sorted = sort_by_price(vec![item("only", None)]);
        assert_eq!(titles(&sorted), ["only"]);
    }

    #[test]
    fn threshold_includes_exact_target() {
        let sorted = vec![
            item("a", Some(50.0)),
            item("b", Some(99.99)),
            item("c", Some(100.0)),
            item("d", Some(150.0)),
            item("e", None),
        ];
        let hits = results_at_or_below(&sorted, 100.0);
        assert_eq!(titles(&hits), ["a", "b", "c"]);
    }

    #[test]
    fn threshold_stops_at_first_unpriced_result() {
        let sorted = vec![item("a", Some(50.0)), item("b", None), item("c", Some(60.0))];
        let hits = results_at_or_below(&sorted, 100.0);
        assert_eq!(titles(&hits), ["a"]);
    }

    #[test]
    fn threshold_with_no_affordable_results_is_empty() {
        let sorted = vec![item("a", Some(500.0))];
        assert!(results_at_or_below(&sorted, 100.0).is_empty());
    }

    #[test]
    fn sort_then_threshold_yields_deals_cheapest_first() {
        let sorted = sort_by_price(vec![
            item("over", Some(520.0)),
            item("unpriced", None),
            item("best", Some(480.0)),
            item("exact", Some(500.0)),
        ]);
        let hits = results_at_or_below(&sorted, 500.0);
        assert_eq!(titles(&hits), ["best", "exact"]);
    }
}
