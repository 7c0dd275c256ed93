pub use serde;
pub use smol_str::SmolStr;
pub use string_macros::StringIdentifierError;

#[macro_use]
mod string_macros;

string_type!(DistributionName);
string_type!(InvalidationId);
