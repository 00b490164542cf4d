pub mod rgb;
pub mod rgba;
