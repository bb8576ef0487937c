//! The calendar data returned by the `GetCalendar` endpoint and the filter applied to it.

use serde::{Deserialize, Serialize};

pub static TYPE_ALTERNATE_SIDE_PARKING: &str = "Alternate Side Parking";
pub static STATUS_SUSPENDED: &str = "SUSPENDED";

/// The decoded body of a calendar response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Response {
    #[serde(default)]
    pub days: Vec<Day>,
}

/// A single calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Day {
    #[serde(default)]
    pub today_id: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// One entry of a calendar day, e.g. the parking or the collections status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Item {
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "type")]
    pub item_type: String,
}

/// Matches items of one type carrying one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFilter {
    pub item_type: String,
    pub status: String,
}

impl ItemFilter {
    pub fn new(item_type: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            status: status.into(),
        }
    }

    /// Both the type and the status have to match.
    ///
    /// Matching on the type alone reports every day on which parking rules are in effect.
    pub fn matches(&self, item: &Item) -> bool {
        item.item_type == self.item_type && item.status == self.status
    }
}

impl Default for ItemFilter {
    /// Suspended Alternate Side Parking.
    fn default() -> Self {
        Self::new(TYPE_ALTERNATE_SIDE_PARKING, STATUS_SUSPENDED)
    }
}

/// Collect the items of all days matching the predicate, in day order and then item order.
pub fn filter_items<F>(response: &Response, predicate: F) -> Vec<Item>
where
    F: Fn(&Item) -> bool,
{
    response
        .days
        .iter()
        .flat_map(|day| day.items.iter())
        .filter(|&item| predicate(item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::calendar::{filter_items, Day, Item, ItemFilter, Response};

    fn item(item_type: &str, status: &str, details: &str) -> Item {
        Item {
            details: details.to_string(),
            status: status.to_string(),
            item_type: item_type.to_string(),
        }
    }

    fn parse(json: &str) -> Response {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize() {
        let response = parse(include_str!("calendar/tests/valid-suspended-day-response.json"));
        assert_eq!(response.days.len(), 1);
        assert_eq!(response.days[0].today_id, "20231110");
        assert_eq!(response.days[0].items.len(), 3);
        assert_eq!(
            response.days[0].items[0],
            item(
                "Alternate Side Parking",
                "SUSPENDED",
                "Alternate side parking is suspended for Veterans Day. Meters are in effect."
            )
        );
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let response = parse(r#"{"days":[{"items":[{"status":"SUSPENDED"}]},{}]}"#);
        assert_eq!(response.days[0].today_id, "");
        assert_eq!(response.days[0].items[0].item_type, "");
        assert!(response.days[1].items.is_empty());
        assert!(parse("{}").days.is_empty());
    }

    #[test]
    fn test_default_filter() {
        let filter = ItemFilter::default();
        assert!(filter.matches(&item("Alternate Side Parking", "SUSPENDED", "")));
        assert!(!filter.matches(&item("Alternate Side Parking", "IN EFFECT", "")));
        assert!(!filter.matches(&item("Collections", "SUSPENDED", "")));
        assert!(!filter.matches(&item("alternate side parking", "suspended", "")));
    }

    #[test]
    fn test_filter_items_suspended_day() {
        let response = parse(include_str!("calendar/tests/valid-suspended-day-response.json"));
        let filter = ItemFilter::default();
        let items = filter_items(&response, |item| filter.matches(item));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, "SUSPENDED");
    }

    #[test]
    fn test_filter_items_no_suspended_day() {
        let response = parse(include_str!("calendar/tests/valid-no-suspended-day-response.json"));
        let filter = ItemFilter::default();
        let items = filter_items(&response, |item| filter.matches(item));
        assert!(items.is_empty());
    }

    #[test]
    fn test_filter_items_preserves_order() {
        let response = parse(include_str!("calendar/tests/valid-multiple-days-response.json"));
        let filter = ItemFilter::default();
        let items = filter_items(&response, |item| filter.matches(item));
        assert_eq!(items.len(), 2);
        assert!(items[0].details.contains("Christmas"));
        assert!(items[1].details.contains("snow removal"));

        let suspended = filter_items(&response, |item| item.status == "SUSPENDED");
        let types: Vec<&str> = suspended.iter().map(|item| item.item_type.as_str()).collect();
        assert_eq!(
            types,
            vec!["Alternate Side Parking", "Collections", "Alternate Side Parking"]
        );
    }

    #[test]
    fn test_filter_items_empty_days() {
        let response = Response {
            days: vec![Day::default(), Day::default()],
        };
        assert_eq!(filter_items(&response, |_| true), Vec::<Item>::new());
    }

    #[test]
    fn test_filter_items_idempotent() {
        let json = include_str!("calendar/tests/valid-multiple-days-response.json");
        let filter = ItemFilter::default();
        let first = filter_items(&parse(json), |item| filter.matches(item));
        let second = filter_items(&parse(json), |item| filter.matches(item));
        assert_eq!(first, second);
    }
}
