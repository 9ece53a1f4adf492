use alloc::format;
use alloc::string::{String, ToString};

/// Three character counter display, clamped to `-99..=999`.
pub fn format_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}
