pub mod name_utils;
pub mod time_utils;
