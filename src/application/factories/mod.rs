mod resolver_factory;
mod source_factory;

pub use resolver_factory::ResolverFactory;
pub use source_factory::{SourceFactory, SourceOptions};
