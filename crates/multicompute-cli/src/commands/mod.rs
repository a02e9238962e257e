pub mod channels;
pub mod pins;
pub mod query;
pub mod serve;
