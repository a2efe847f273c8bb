/// Filesystem adapters for reading local packages
mod rpm_header;

pub use rpm_header::RpmHeaderReader;
#[cfg(test)]
pub(crate) use rpm_header::test_support;
