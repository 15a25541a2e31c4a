//! 数据模型模块

pub mod auth;
pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

/// 去除首尾空白
pub(crate) fn trimmed(s: String) -> String {
    let t = s.trim();
    if t.len() == s.len() {
        s
    } else {
        t.to_string()
    }
}
