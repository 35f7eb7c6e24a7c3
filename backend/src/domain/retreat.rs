//! Retreat records and creation drafts.

use serde::{Deserialize, Serialize};

/// Maximum length of a retreat title, in characters.
pub const TITLE_MAX: usize = 100;
/// Maximum length of a retreat location, in characters.
pub const LOCATION_MAX: usize = 100;

/// Store-assigned retreat identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetreatId(i32);

impl RetreatId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for RetreatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted retreat offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retreat {
    pub id: RetreatId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub duration: i32,
    pub capacity: i32,
}

/// Validation failures for [`NewRetreat`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetreatValidationError {
    /// The title exceeds [`TITLE_MAX`] characters.
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    /// The location exceeds [`LOCATION_MAX`] characters.
    #[error("location must be at most {max} characters")]
    LocationTooLong { max: usize },
    /// The price is NaN or infinite.
    #[error("price must be a finite number")]
    NonFinitePrice,
}

impl RetreatValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::TitleTooLong { .. } => "title",
            Self::LocationTooLong { .. } => "location",
            Self::NonFinitePrice => "price",
        }
    }
}

/// Unvalidated retreat fields collected from a request.
#[derive(Debug, Clone, PartialEq)]
pub struct RetreatDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub duration: i32,
    pub capacity: i32,
}

/// A validated retreat awaiting its store-assigned identifier.
///
/// # Examples
/// ```
/// use retreat_backend::domain::{NewRetreat, RetreatDraft};
///
/// let retreat = NewRetreat::new(RetreatDraft {
///     title: "Forest Reset".into(),
///     description: "Three days of silence".into(),
///     location: "Black Forest".into(),
///     price: 450.0,
///     duration: 3,
///     capacity: 12,
/// })
/// .expect("valid retreat");
/// assert_eq!(retreat.title(), "Forest Reset");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewRetreat {
    draft: RetreatDraft,
}

impl NewRetreat {
    /// Validate a draft.
    ///
    /// # Errors
    ///
    /// Returns [`RetreatValidationError`] when a text field is too long or
    /// the price is not finite.
    pub fn new(draft: RetreatDraft) -> Result<Self, RetreatValidationError> {
        if draft.title.chars().count() > TITLE_MAX {
            return Err(RetreatValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if draft.location.chars().count() > LOCATION_MAX {
            return Err(RetreatValidationError::LocationTooLong { max: LOCATION_MAX });
        }
        if !draft.price.is_finite() {
            return Err(RetreatValidationError::NonFinitePrice);
        }
        Ok(Self { draft })
    }

    pub fn title(&self) -> &str {
        &self.draft.title
    }

    pub fn description(&self) -> &str {
        &self.draft.description
    }

    pub fn location(&self) -> &str {
        &self.draft.location
    }

    pub fn price(&self) -> f64 {
        self.draft.price
    }

    pub fn duration(&self) -> i32 {
        self.draft.duration
    }

    pub fn capacity(&self) -> i32 {
        self.draft.capacity
    }

    /// Attach the store-assigned identifier.
    #[must_use]
    pub fn into_retreat(self, id: RetreatId) -> Retreat {
        let RetreatDraft {
            title,
            description,
            location,
            price,
            duration,
            capacity,
        } = self.draft;
        Retreat {
            id,
            title,
            description,
            location,
            price,
            duration,
            capacity,
        }
    }
}
