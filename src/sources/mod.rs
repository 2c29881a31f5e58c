pub mod bittrex;

pub use bittrex::BittrexSource;
