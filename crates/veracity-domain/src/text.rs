//! Text helpers shared by the pipeline stages

/// First `max_chars` characters of `text`, for log lines
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_is_char_safe() {
        assert_eq!(preview("héllo wörld", 4), "héll");
    }

    #[test]
    fn test_preview_shorter_than_limit() {
        assert_eq!(preview("short", 50), "short");
        assert_eq!(preview("", 5), "");
    }
}
