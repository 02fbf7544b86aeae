mod extract_tests;
mod utils;
