pub mod privatbank;

pub use privatbank::PrivatBankFetcher;
