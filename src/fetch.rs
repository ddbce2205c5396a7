//! Bounded, token-continued pagination over a remote log stream.
//!
//! CloudWatch Logs signals the end of a stream by echoing the request's
//! continuation token back unchanged, but in degenerate cases it can keep
//! handing out fresh-looking tokens that make no real progress. The
//! [`Paginator`] encodes both termination rules (token repeated back, and
//! a fixed cap on page requests) as a pure transition that the live fetch
//! loop drives, so the logic is testable with scripted token sequences.

/// Log records requested per page.
pub const PAGE_LIMIT: i32 = 50;

/// Upper bound on page requests per stream fetch.
///
/// Guarantees termination within a fixed cost no matter what tokens the
/// remote store returns. Hitting the cap is informational, not an error.
pub const MAX_PAGES: u32 = 10;

/// Decision taken after one page response has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Request another page with the paginator's current token
    Next,
    /// The stream made no forward progress; retrieval is complete
    Done,
    /// The request cap was reached before the stream repeated a token
    Capped,
}

/// How a stream fetch finished. `Capped` means retrieval may be
/// incomplete; whatever was collected is kept either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Complete,
    Capped,
}

/// Continuation-token state for one stream fetch.
#[derive(Debug, Default)]
pub struct Paginator {
    token: Option<String>,
    pages: u32,
}

impl Paginator {
    /// Creates a paginator positioned before the first request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token to send with the next page request.
    ///
    /// `None` means no page has produced a token yet and the request
    /// should read from the head of the stream instead.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Feeds the token returned by the page that was just processed and
    /// decides whether to keep fetching.
    ///
    /// Tokens are opaque; they are compared only for equality against the
    /// token the request was made with.
    pub fn advance(&mut self, next_token: Option<String>) -> Step {
        self.pages += 1;
        match next_token {
            None => Step::Done,
            Some(t) if self.token.as_deref() == Some(t.as_str()) => Step::Done,
            Some(t) => {
                self.token = Some(t);
                if self.pages >= MAX_PAGES {
                    Step::Capped
                } else {
                    Step::Next
                }
            }
        }
    }
}
