//! Public Pages
//!
//! Read-only views for visitors: the fact-check feed and detail page, the
//! "Haiti Unveiled" positive content feed, and the home page carousel.
//! Failures here never toast; the view shows an inline message instead.

use parking_lot::RwLock;
use std::time::Duration;
use tracing::error;

use crate::api::{ApiClient, ApiError, ErrorKind, UNEXPECTED_FORMAT};
use crate::models::{ContentCategory, FactCheck, PositiveContent};

pub const FACT_CHECKS_UNAVAILABLE: &str = "Could not load fact-checks. Please try again later.";
pub const CONTENT_UNAVAILABLE: &str = "Could not load positive content. Please try again later.";

#[derive(Debug)]
struct FeedState<T> {
    items: Vec<T>,
    error: Option<String>,
    loading: bool,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            loading: true,
        }
    }
}

// ============================================
// Fact-checks
// ============================================

pub struct FactCheckFeed {
    api: ApiClient,
    state: RwLock<FeedState<FactCheck>>,
}

impl FactCheckFeed {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RwLock::new(FeedState::default()),
        }
    }

    pub async fn load(&self) -> bool {
        self.state.write().loading = true;
        let result = self.api.fact_checks().await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(items) => {
                state.items = items;
                state.error = None;
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching fact-checks");
                state.error = Some(FACT_CHECKS_UNAVAILABLE.to_string());
                false
            }
        }
    }

    pub fn items(&self) -> Vec<FactCheck> {
        self.state.read().items.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }
}

/// Outcome of loading one fact-check
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Found(FactCheck),
    NotFound,
    Failed(String),
}

/// `GET /api/factchecks/{id}/`; a 404 is reported as [`Detail::NotFound`]
pub async fn load_fact_check(api: &ApiClient, id: i64) -> Detail {
    match api.fact_check(id).await {
        Ok(fact_check) => Detail::Found(fact_check),
        Err(e) if e.kind() == ErrorKind::NotFound => Detail::NotFound,
        Err(e) => {
            error!(id, error = %e, "Error fetching fact-check");
            Detail::Failed(e.message_or("Could not load this fact-check. Please try again later."))
        }
    }
}

// ============================================
// Positive content
// ============================================

pub struct PositiveContentFeed {
    api: ApiClient,
    state: RwLock<FeedState<PositiveContent>>,
    category: RwLock<Option<ContentCategory>>,
}

impl PositiveContentFeed {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RwLock::new(FeedState::default()),
            category: RwLock::new(None),
        }
    }

    pub async fn load(&self) -> bool {
        self.state.write().loading = true;
        let result = self.api.positive_content().await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(items) => {
                state.items = items;
                state.error = None;
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching positive content");
                state.items.clear();
                state.error = Some(Self::describe(&e).to_string());
                false
            }
        }
    }

    fn describe(err: &ApiError) -> &'static str {
        match err {
            ApiError::Decode(message) if message == UNEXPECTED_FORMAT => UNEXPECTED_FORMAT,
            _ => CONTENT_UNAVAILABLE,
        }
    }

    pub fn category(&self) -> Option<ContentCategory> {
        *self.category.read()
    }

    /// `None` shows every category
    pub fn set_category(&self, category: Option<ContentCategory>) {
        *self.category.write() = category;
    }

    /// Items in the selected category
    pub fn visible(&self) -> Vec<PositiveContent> {
        let category = self.category();
        self.state
            .read()
            .items
            .iter()
            .filter(|item| category.map_or(true, |c| item.content_type == c))
            .cloned()
            .collect()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }
}

// ============================================
// Carousel
// ============================================

/// Delay between automatic slide changes
pub const CAROUSEL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub cta: &'static str,
    /// Page anchor the call to action scrolls to
    pub target: &'static str,
}

pub const SLIDES: [Slide; 3] = [
    Slide {
        title: "Promoting Truth in Haiti",
        description: "Ayiti Vérité is dedicated to verifying information and combating misinformation in Haitian communities.",
        image: "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&w=1770&q=80",
        cta: "Submit a Claim",
        target: "submit",
    },
    Slide {
        title: "Celebrating Haitian Culture",
        description: "Discover the rich cultural heritage and positive stories from across Haiti.",
        image: "https://images.unsplash.com/photo-1516483638261-f4dbaf036963?auto=format&fit=crop&w=1776&q=80",
        cta: "Explore Stories",
        target: "haiti-unveiled",
    },
    Slide {
        title: "Verified Information",
        description: "Access our database of fact-checked claims to stay informed with accurate information.",
        image: "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b?auto=format&fit=crop&w=1770&q=80",
        cta: "View Fact-Checks",
        target: "fact-checks",
    },
];

/// Slide position; the caller drives [`Carousel::tick`] from a timer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    paused: bool,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide(&self) -> &'static Slide {
        &SLIDES[self.current]
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % SLIDES.len();
    }

    pub fn previous(&mut self) {
        self.current = (self.current + SLIDES.len() - 1) % SLIDES.len();
    }

    pub fn go_to(&mut self, index: usize) {
        if index < SLIDES.len() {
            self.current = index;
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Timer callback: advance unless the pointer is over the carousel
    pub fn tick(&mut self) {
        if !self.paused {
            self.next();
        }
    }
}
