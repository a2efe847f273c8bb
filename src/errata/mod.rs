/// Errata domain: advisory records, publishable advisories, the advisory
/// cache, and the announcement parsers that produce records.
pub mod domain;
pub mod parsers;
pub mod services;
