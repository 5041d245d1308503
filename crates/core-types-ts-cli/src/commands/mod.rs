pub mod from_ts;
pub mod io;
pub mod to_ts;
