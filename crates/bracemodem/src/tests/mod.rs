mod arbitrary;
mod parse_good;
mod property_resume;
pub(crate) mod utils;
