/// Use cases module containing application business logic orchestration
mod import_errata;

pub use import_errata::ImportErrataUseCase;
