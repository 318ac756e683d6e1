mod json_error_response;

pub use json_error_response::{HELP, json_error_response};
