//! # Integration Tests
//!
//! Flows that cross container boundaries, driven through `CoreContainer`
//! over in-memory repositories and a manual clock.

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod concurrency;
#[cfg(test)]
mod course_flows;
