//! bizlens-ci library - Census Ingest module
//!
//! Fetches population and income figures per postal code from the US Census
//! ACS API and upserts them into the zipcode reference table.

pub mod census;
