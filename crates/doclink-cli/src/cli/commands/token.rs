//! `doclink sanitize-token` and `doclink append-token`.

use doclink_core::token;

pub fn run_sanitize_token(raw: &str) {
    println!("{}", token::sanitize(raw));
}

pub fn run_append_token(url: &str, raw: &str) {
    println!("{}", token::append_token(url, &token::sanitize(raw)));
}
