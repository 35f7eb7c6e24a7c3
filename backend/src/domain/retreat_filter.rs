//! Composable retreat and booking filters.
//!
//! A [`RetreatFilter`] is the storage-neutral form of the list-retreats query
//! parameters. Every supplied criterion must hold (logical AND); absent
//! criteria impose nothing. Persistence adapters translate the filter into
//! SQL predicates, while [`RetreatFilter::matches`] evaluates the same rules
//! in memory.

use super::{Booking, Retreat, UserId};

/// Criteria restricting the retreat listing.
///
/// # Examples
/// ```
/// use retreat_backend::domain::RetreatFilter;
///
/// let filter = RetreatFilter::default()
///     .with_search("yoga  beach")
///     .with_min_price(Some(100.0));
/// assert_eq!(filter.search_terms(), ["yoga", "beach"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetreatFilter {
    search_terms: Vec<String>,
    text: Option<String>,
    location: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    min_duration: Option<i32>,
    max_duration: Option<i32>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl RetreatFilter {
    /// Free-text search: every whitespace-separated token must appear in the
    /// title, description or location.
    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.search_terms = search.split_whitespace().map(str::to_owned).collect();
        self
    }

    /// Substring that must appear in the title or description.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = non_empty(text);
        self
    }

    /// Substring that must appear in the location.
    #[must_use]
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = non_empty(location);
        self
    }

    /// Inclusive lower price bound. Non-finite bounds are ignored.
    #[must_use]
    pub fn with_min_price(mut self, min_price: Option<f64>) -> Self {
        self.min_price = min_price.filter(|bound| bound.is_finite());
        self
    }

    /// Inclusive upper price bound. Non-finite bounds are ignored.
    #[must_use]
    pub fn with_max_price(mut self, max_price: Option<f64>) -> Self {
        self.max_price = max_price.filter(|bound| bound.is_finite());
        self
    }

    /// Inclusive lower duration bound.
    #[must_use]
    pub fn with_min_duration(mut self, min_duration: Option<i32>) -> Self {
        self.min_duration = min_duration;
        self
    }

    /// Inclusive upper duration bound.
    #[must_use]
    pub fn with_max_duration(mut self, max_duration: Option<i32>) -> Self {
        self.max_duration = max_duration;
        self
    }

    pub fn search_terms(&self) -> &[String] {
        &self.search_terms
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn min_price(&self) -> Option<f64> {
        self.min_price
    }

    pub fn max_price(&self) -> Option<f64> {
        self.max_price
    }

    pub fn min_duration(&self) -> Option<i32> {
        self.min_duration
    }

    pub fn max_duration(&self) -> Option<i32> {
        self.max_duration
    }

    /// Evaluate the filter against one retreat.
    #[must_use]
    pub fn matches(&self, retreat: &Retreat) -> bool {
        let search_ok = self.search_terms.iter().all(|term| {
            contains_ci(&retreat.title, term)
                || contains_ci(&retreat.description, term)
                || contains_ci(&retreat.location, term)
        });
        let text_ok = self.text.as_deref().is_none_or(|text| {
            contains_ci(&retreat.title, text) || contains_ci(&retreat.description, text)
        });
        let location_ok = self
            .location
            .as_deref()
            .is_none_or(|location| contains_ci(&retreat.location, location));
        let price_ok = self.min_price.is_none_or(|min| retreat.price >= min)
            && self.max_price.is_none_or(|max| retreat.price <= max);
        let duration_ok = self.min_duration.is_none_or(|min| retreat.duration >= min)
            && self.max_duration.is_none_or(|max| retreat.duration <= max);

        search_ok && text_ok && location_ok && price_ok && duration_ok
    }
}

/// Criteria restricting the booking listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Exact user to list bookings for; `None` lists every booking.
    pub user_id: Option<UserId>,
}

impl BookingFilter {
    /// Restrict the listing to one user.
    #[must_use]
    pub const fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Evaluate the filter against one booking.
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        self.user_id.is_none_or(|user_id| booking.user_id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RetreatId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn retreat() -> Retreat {
        Retreat {
            id: RetreatId::new(1),
            title: "Mindful Mountains".into(),
            description: "Meditation and hiking in the Alps".into(),
            location: "Chamonix, France".into(),
            price: 1200.0,
            duration: 7,
            capacity: 15,
        }
    }

    #[rstest]
    #[case::title("mindful")]
    #[case::description("HIKING")]
    #[case::location("chamonix")]
    #[case::partial_word("medit")]
    fn search_token_matches_any_text_field(retreat: Retreat, #[case] search: &str) {
        assert!(RetreatFilter::default().with_search(search).matches(&retreat));
    }

    #[rstest]
    fn every_search_token_must_match(retreat: Retreat) {
        let hit = RetreatFilter::default().with_search("alps france");
        let miss = RetreatFilter::default().with_search("alps beach");
        assert!(hit.matches(&retreat));
        assert!(!miss.matches(&retreat));
    }

    #[rstest]
    #[case("")]
    #[case("   \t ")]
    fn blank_search_imposes_nothing(retreat: Retreat, #[case] search: &str) {
        let filter = RetreatFilter::default().with_search(search);
        assert!(filter.search_terms().is_empty());
        assert!(filter.matches(&retreat));
    }

    #[rstest]
    fn text_filter_ignores_location(retreat: Retreat) {
        assert!(RetreatFilter::default().with_text("alps").matches(&retreat));
        assert!(!RetreatFilter::default().with_text("chamonix").matches(&retreat));
    }

    #[rstest]
    fn location_filter_is_case_insensitive(retreat: Retreat) {
        assert!(RetreatFilter::default().with_location("FRANCE").matches(&retreat));
        assert!(!RetreatFilter::default().with_location("Spain").matches(&retreat));
    }

    #[rstest]
    #[case(Some(1200.0), Some(1200.0), true)]
    #[case(Some(1200.01), None, false)]
    #[case(None, Some(1199.99), false)]
    #[case(Some(0.0), Some(5000.0), true)]
    fn price_bounds_are_inclusive(
        retreat: Retreat,
        #[case] min: Option<f64>,
        #[case] max: Option<f64>,
        #[case] expected: bool,
    ) {
        let filter = RetreatFilter::default().with_min_price(min).with_max_price(max);
        assert_eq!(filter.matches(&retreat), expected);
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinity(f64::INFINITY)]
    #[case::negative_infinity(f64::NEG_INFINITY)]
    fn non_finite_price_bounds_are_ignored(retreat: Retreat, #[case] bound: f64) {
        let filter = RetreatFilter::default()
            .with_min_price(Some(bound))
            .with_max_price(Some(bound));

        assert_eq!(filter, RetreatFilter::default());
        assert!(filter.matches(&retreat));
    }

    #[rstest]
    #[case(Some(7), Some(7), true)]
    #[case(Some(8), None, false)]
    #[case(None, Some(6), false)]
    fn duration_bounds_are_inclusive(
        retreat: Retreat,
        #[case] min: Option<i32>,
        #[case] max: Option<i32>,
        #[case] expected: bool,
    ) {
        let filter = RetreatFilter::default()
            .with_min_duration(min)
            .with_max_duration(max);
        assert_eq!(filter.matches(&retreat), expected);
    }

    #[rstest]
    fn criteria_combine_with_and(retreat: Retreat) {
        let filter = RetreatFilter::default()
            .with_search("alps")
            .with_location("france")
            .with_max_price(Some(100.0));
        assert!(!filter.matches(&retreat));
    }
}
